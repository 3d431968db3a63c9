//! Inbound webhook payload and parameter extraction.
//!
//! Only `queryResult.parameters` is read; every level is optional so a
//! sparse request still resolves to "current weather in the default city".

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    date::{DateParseError, parse_requested_date},
    model::WeatherQuery,
};

const CITY_PARAM: &str = "city";
const DATE_TIME_PARAM: &str = "date-time";
const DATE_PARAM: &str = "date";

/// Keys the platform uses when a date parameter resolves to a period or an
/// object instead of a plain string.
const NESTED_DATE_KEYS: [&str; 2] = ["startDateTime", "date_time"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl WebhookRequest {
    /// Build a request carrying just the given parameters.
    pub fn with_parameters(city: Option<&str>, date: Option<&str>) -> Self {
        let mut parameters = Map::new();
        if let Some(city) = city {
            parameters.insert(CITY_PARAM.into(), Value::String(city.into()));
        }
        if let Some(date) = date {
            parameters.insert(DATE_TIME_PARAM.into(), Value::String(date.into()));
        }

        Self {
            query_result: QueryResult { parameters },
        }
    }

    fn parameters(&self) -> &Map<String, Value> {
        &self.query_result.parameters
    }

    /// `city` if present and non-empty.
    pub fn city(&self) -> Option<&str> {
        self.parameters()
            .get(CITY_PARAM)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// `date-time` if usable, else `date`.
    pub fn date_str(&self) -> Option<&str> {
        [DATE_TIME_PARAM, DATE_PARAM]
            .iter()
            .find_map(|key| self.parameters().get(*key).and_then(date_value))
    }

    /// Resolve the parameters into a query, parsing the date if one was sent.
    pub fn to_query(&self, default_city: &str) -> Result<WeatherQuery, DateParseError> {
        let city = self.city().unwrap_or(default_city).to_string();
        let requested_date = self.date_str().map(parse_requested_date).transpose()?;

        Ok(WeatherQuery {
            city,
            requested_date,
        })
    }
}

fn date_value(value: &Value) -> Option<&str> {
    let raw = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => NESTED_DATE_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str)),
        _ => None,
    };

    raw.filter(|s| !s.trim().is_empty())
}
