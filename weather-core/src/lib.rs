//! Core library for the weather fulfillment webhook.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Webhook payload parsing and date classification
//! - The OpenWeather client behind a provider trait
//! - Fulfillment: turning a webhook request into `fulfillmentText`
//!
//! It is used by `weather-fulfillment`, but can also be reused by other binaries or services.

pub mod config;
pub mod date;
pub mod forecast;
pub mod fulfillment;
pub mod model;
pub mod provider;
pub mod webhook;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use date::{DateParseError, DateRequest};
pub use fulfillment::Fulfillment;
pub use model::{CurrentConditions, ForecastEntry, FulfillmentResponse, WeatherQuery};
pub use provider::{FetchError, OpenWeatherProvider, WeatherProvider};
pub use webhook::WebhookRequest;
