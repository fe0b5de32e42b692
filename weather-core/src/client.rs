use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::Units,
    error::WeatherError,
};

pub mod openweather;
pub mod wire;

pub use openweather::OpenWeatherClient;
pub use wire::{CurrentWeatherResponse, ForecastResponse};

/// Remote source of raw weather payloads.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(&self, city_name: &str) -> Result<CurrentWeatherResponse, WeatherError>;

    async fn fetch_forecast(&self, city_name: &str) -> Result<ForecastResponse, WeatherError>;

    /// Unit system the returned temperatures are expressed in.
    fn units(&self) -> Units;
}
