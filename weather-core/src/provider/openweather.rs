use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Number;
use tracing::{debug, warn};

use crate::{
    config::ProviderConfig,
    model::{CurrentConditions, ForecastEntry},
};

use super::{FetchError, WeatherProvider};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, "querying OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, city, endpoint, "OpenWeather request rejected");
            return Err(FetchError::Status(status));
        }

        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, city, endpoint, "OpenWeather response did not match expected shape");
            FetchError::Decode(e.to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_description(weather: Vec<OwWeather>) -> Result<String, FetchError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| FetchError::Decode("`weather` list is empty".to_string()))
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = FetchError;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        Ok(CurrentConditions {
            description: first_description(raw.weather)?,
            temperature_c: raw.main.temp,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = FetchError;

    fn try_from(raw: OwForecastEntry) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp(raw.dt, 0)
            .ok_or_else(|| FetchError::Decode(format!("timestamp {} out of range", raw.dt)))?;

        Ok(ForecastEntry {
            timestamp,
            description: first_description(raw.weather)?,
            temperature_c: raw.main.temp,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        parsed.try_into()
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        let entries = parsed
            .list
            .into_iter()
            .map(ForecastEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(city, entries = entries.len(), "OpenWeather forecast received");
        Ok(entries)
    }
}
