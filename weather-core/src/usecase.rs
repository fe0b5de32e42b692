//! Input validation in front of the repository.
//!
//! This is the only place city names are checked; everything below trusts its callers.

use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    error::WeatherError,
    model::{CurrentWeather, Forecast, LastSearchedCity},
    repository::WeatherRepository,
};

pub const EMPTY_CITY_MESSAGE: &str = "City name cannot be empty";

/// Trimmed city name, or an error when nothing is left.
fn require_city_name(city_name: &str) -> Result<&str, WeatherError> {
    let city_name = city_name.trim();
    if city_name.is_empty() {
        return Err(WeatherError::invalid_argument(EMPTY_CITY_MESSAGE));
    }
    Ok(city_name)
}

#[derive(Clone)]
pub struct GetCurrentWeather {
    repository: Arc<dyn WeatherRepository>,
}

impl GetCurrentWeather {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, city_name: &str) -> Result<CurrentWeather, WeatherError> {
        let city_name = require_city_name(city_name)?;
        self.repository.get_current_weather(city_name).await
    }
}

#[derive(Clone)]
pub struct GetForecast {
    repository: Arc<dyn WeatherRepository>,
}

impl GetForecast {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, city_name: &str) -> Result<Forecast, WeatherError> {
        let city_name = require_city_name(city_name)?;
        self.repository.get_forecast(city_name).await
    }
}

#[derive(Clone)]
pub struct GetLastSearchedCity {
    repository: Arc<dyn WeatherRepository>,
}

impl GetLastSearchedCity {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> watch::Receiver<Option<LastSearchedCity>> {
        self.repository.get_last_searched_city()
    }
}
