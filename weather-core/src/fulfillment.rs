//! Turns a webhook request into `fulfillmentText`.
//!
//! Every path ends in a [`FulfillmentResponse`]: bad dates, unknown cities
//! and provider outages are all rendered as text, never as an error.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    date::{DateRequest, FORECAST_HORIZON_DAYS, classify_date},
    forecast::{local_time, nearest_entry},
    model::{CurrentConditions, ForecastEntry, FulfillmentResponse},
    provider::{FetchError, WeatherProvider},
    webhook::WebhookRequest,
};

pub fn current_text(city: &str, c: &CurrentConditions) -> String {
    format!(
        "Right now in {city}, it's {} with a temperature of {}°C. \
         Humidity is {}% and wind speed is {} m/s.",
        c.description, c.temperature_c, c.humidity_pct, c.wind_speed_mps
    )
}

pub fn forecast_text(city: &str, e: &ForecastEntry) -> String {
    format!(
        "The forecast for {city} on {} is {} with a temperature of {}°C, \
         humidity at {}%, and wind speed of {} m/s.",
        local_time(&e.timestamp).format("%Y-%m-%d %H:%M"),
        e.description,
        e.temperature_c,
        e.humidity_pct,
        e.wind_speed_mps
    )
}

pub fn invalid_date_text(reason: &str) -> String {
    format!(
        "Invalid date format or error: {reason}. Please use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS."
    )
}

pub fn out_of_range_prefix(date: NaiveDate) -> String {
    format!(
        "The date {} is out of forecast range (today to {FORECAST_HORIZON_DAYS} days ahead). \
         Showing current weather instead.\n",
        date.format("%Y-%m-%d")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    Weather,
    Forecast,
}

fn failure_text(city: &str, what: Fetch, err: &FetchError) -> String {
    let noun = match what {
        Fetch::Weather => "weather",
        Fetch::Forecast => "forecast",
    };

    if err.is_status() {
        format!("Sorry, I couldn't fetch the {noun} for {city}. Please check the city name.")
    } else {
        format!("Sorry, I couldn't reach the weather service for {city} right now. Please try again later.")
    }
}

/// Webhook fulfillment over any [`WeatherProvider`].
#[derive(Debug, Clone)]
pub struct Fulfillment {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
}

impl Fulfillment {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }

    /// Answer using the server's local date as "today".
    pub async fn respond(&self, request: &WebhookRequest) -> FulfillmentResponse {
        self.respond_on(request, Local::now().date_naive()).await
    }

    pub async fn respond_on(&self, request: &WebhookRequest, today: NaiveDate) -> FulfillmentResponse {
        FulfillmentResponse::new(self.fulfillment_text(request, today).await)
    }

    async fn fulfillment_text(&self, request: &WebhookRequest, today: NaiveDate) -> String {
        let query = match request.to_query(&self.default_city) {
            Ok(query) => query,
            Err(e) => {
                info!(error = %e, "rejecting unparseable date");
                return invalid_date_text(&e.to_string());
            }
        };

        let route = classify_date(today, query.requested_date);
        debug!(city = %query.city, target = ?query.requested_date, %today, ?route, "classified request");

        match route {
            DateRequest::Current => self.current(&query.city).await,
            DateRequest::Forecast(target) => self.forecast(&query.city, target).await,
            DateRequest::OutOfRange(date) => {
                out_of_range_prefix(date) + &self.current(&query.city).await
            }
        }
    }

    /// Current-conditions text, or the matching failure text.
    pub async fn current(&self, city: &str) -> String {
        match self.provider.current(city).await {
            Ok(conditions) => current_text(city, &conditions),
            Err(e) => {
                warn!(city, error = %e, "current weather unavailable");
                failure_text(city, Fetch::Weather, &e)
            }
        }
    }

    /// Forecast text for the slot nearest `target`, or the matching failure text.
    pub async fn forecast(&self, city: &str, target: NaiveDateTime) -> String {
        let result = self.provider.forecast(city).await.and_then(|entries| {
            nearest_entry(&entries, target)
                .map(|entry| forecast_text(city, entry))
                .ok_or(FetchError::EmptyForecast)
        });

        result.unwrap_or_else(|e| {
            warn!(city, error = %e, "forecast unavailable");
            failure_text(city, Fetch::Forecast, &e)
        })
    }
}
