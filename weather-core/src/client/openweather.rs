use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::{Config, Units},
    error::WeatherError,
};

use super::{
    WeatherClient,
    wire::{CurrentWeatherResponse, ForecastResponse, WireErrorBody},
};

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

/// OpenWeatherMap 2.5 client for the current-weather and 5-day forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        timeout: Duration,
        units: Units,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
            http,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolved_api_key()?;
        Self::new(api_key, &config.base_url, config.request_timeout(), config.units)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city_name: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} for '{}'", url, city_name);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city_name),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city_name.to_string()));
        }

        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current(&self, city_name: &str) -> Result<CurrentWeatherResponse, WeatherError> {
        self.get_json(CURRENT_ENDPOINT, city_name).await
    }

    async fn fetch_forecast(&self, city_name: &str) -> Result<ForecastResponse, WeatherError> {
        self.get_json(FORECAST_ENDPOINT, city_name).await
    }

    fn units(&self) -> Units {
        self.units
    }
}

/// Prefer the provider's `message` field, else a truncated raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<WireErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
