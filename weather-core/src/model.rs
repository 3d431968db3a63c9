use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// What the webhook asked for: a city and, optionally, a moment in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub requested_date: Option<NaiveDateTime>,
}

/// Current conditions as reported by the provider.
///
/// Temperature and wind speed keep the provider's JSON number so they are
/// rendered exactly as reported (`18.5`, `3.2`, `18`).
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub description: String,
    pub temperature_c: Number,
    pub humidity_pct: u8,
    pub wind_speed_mps: Number,
}

/// One 3-hour slot of the 5-day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub temperature_c: Number,
    pub humidity_pct: u8,
    pub wind_speed_mps: Number,
}

/// The only shape the webhook ever answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl FulfillmentResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}
