use anyhow::Context;
use std::sync::Arc;

use crate::{
    client::{OpenWeatherClient, WeatherClient},
    config::Config,
    controller::{CityInputController, CurrentWeatherController, ForecastController},
    repository::{DefaultWeatherRepository, WeatherRepository},
    store::{CityStore, SqliteCityStore},
    usecase::{GetCurrentWeather, GetForecast, GetLastSearchedCity},
};

/// Composition root: owns the wired-up collaborators and builds controllers.
#[derive(Clone)]
pub struct WeatherServices {
    repository: Arc<dyn WeatherRepository>,
    get_current_weather: GetCurrentWeather,
    get_forecast: GetForecast,
    get_last_searched_city: GetLastSearchedCity,
}

impl WeatherServices {
    pub fn new(client: Arc<dyn WeatherClient>, store: Arc<dyn CityStore>) -> Self {
        let repository: Arc<dyn WeatherRepository> =
            Arc::new(DefaultWeatherRepository::new(client, store));

        Self {
            get_current_weather: GetCurrentWeather::new(Arc::clone(&repository)),
            get_forecast: GetForecast::new(Arc::clone(&repository)),
            get_last_searched_city: GetLastSearchedCity::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// OpenWeather client plus the on-disk city store described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = OpenWeatherClient::from_config(config)?;

        let db_path = config.resolved_database_path()?;
        let store = SqliteCityStore::open(&db_path)
            .with_context(|| format!("Failed to open city store: {}", db_path.display()))?;

        tracing::debug!("Services wired against {}", config.base_url);
        Ok(Self::new(Arc::new(client), Arc::new(store)))
    }

    pub fn repository(&self) -> &Arc<dyn WeatherRepository> {
        &self.repository
    }

    pub fn get_current_weather(&self) -> &GetCurrentWeather {
        &self.get_current_weather
    }

    pub fn get_forecast(&self) -> &GetForecast {
        &self.get_forecast
    }

    pub fn get_last_searched_city(&self) -> &GetLastSearchedCity {
        &self.get_last_searched_city
    }

    pub fn city_input(&self) -> CityInputController {
        CityInputController::new(self.get_current_weather.clone(), &self.get_last_searched_city)
    }

    pub fn current_weather(&self, city_name: impl Into<String>) -> CurrentWeatherController {
        CurrentWeatherController::new(city_name, self.get_current_weather.clone())
    }

    pub fn forecast(&self, city_name: impl Into<String>) -> ForecastController {
        ForecastController::new(city_name, self.get_forecast.clone())
    }
}
