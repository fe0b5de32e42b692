//! Core library for the `weather` app.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeather client and its wire formats
//! - Persistence of the last searched city
//! - Domain models, the mapper and the repository façade
//! - Validating use cases and per-screen view-state controllers
//!
//! It is used by `weather-cli`, but any presentation layer can drive the
//! controllers directly.

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod store;
pub mod usecase;

#[cfg(test)]
mod testing;

pub use app::WeatherServices;
pub use client::{OpenWeatherClient, WeatherClient};
pub use config::{Config, Units};
pub use controller::{
    CityInputController, CityInputEvent, CurrentWeatherController, ForecastController,
    ForecastEvent, ForecastIntent, ViewState,
};
pub use error::{ErrorKind, WeatherError};
pub use model::{
    City, CurrentWeather, Forecast, ForecastItem, LastSearchedCity, MainReadings, SysInfo,
    WeatherCondition, Wind,
};
pub use repository::{DefaultWeatherRepository, WeatherRepository};
pub use store::{CityStore, SqliteCityStore};
pub use usecase::{GetCurrentWeather, GetForecast, GetLastSearchedCity};
