use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{CurrentConditions, ForecastEntry};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Why a provider call produced no data.
///
/// `Status` is the provider answering with anything but 200 (unknown city,
/// bad key, outage). The rest are failures to get a usable answer at all.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("provider responded with status {0}")]
    Status(StatusCode),

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected provider response: {0}")]
    Decode(String),

    #[error("provider returned an empty forecast list")]
    EmptyForecast,
}

impl FetchError {
    /// True when the provider answered but refused; the city name is the usual suspect.
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status(_))
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Conditions right now.
    async fn current(&self, city: &str) -> Result<CurrentConditions, FetchError>;

    /// The whole 5-day/3-hour list, in provider order.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}
