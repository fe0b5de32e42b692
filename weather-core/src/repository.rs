use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    client::WeatherClient,
    error::WeatherError,
    mapper,
    model::{CurrentWeather, Forecast, LastSearchedCity},
    store::CityStore,
};

/// Uniform façade over the remote client, the city store and the mapper.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// On success the city is remembered as last searched, best-effort.
    async fn get_current_weather(&self, city_name: &str) -> Result<CurrentWeather, WeatherError>;

    async fn get_forecast(&self, city_name: &str) -> Result<Forecast, WeatherError>;

    fn get_last_searched_city(&self) -> watch::Receiver<Option<LastSearchedCity>>;

    async fn save_city(&self, city_name: &str) -> Result<(), WeatherError>;

    async fn forget_city(&self, city_name: &str) -> Result<(), WeatherError>;

    async fn forget_all(&self) -> Result<(), WeatherError>;
}

pub struct DefaultWeatherRepository {
    client: Arc<dyn WeatherClient>,
    store: Arc<dyn CityStore>,
}

impl DefaultWeatherRepository {
    pub fn new(client: Arc<dyn WeatherClient>, store: Arc<dyn CityStore>) -> Self {
        Self { client, store }
    }

    /// Fire-and-forget save; a failure here never reaches the caller.
    fn remember_in_background(&self, city_name: &str) {
        let store = Arc::clone(&self.store);
        let city_name = city_name.to_string();

        tokio::spawn(async move {
            if let Err(e) = store.upsert(&city_name).await {
                tracing::warn!("Failed to remember last searched city '{}': {}", city_name, e);
            }
        });
    }
}

#[async_trait]
impl WeatherRepository for DefaultWeatherRepository {
    async fn get_current_weather(&self, city_name: &str) -> Result<CurrentWeather, WeatherError> {
        let wire = self.client.fetch_current(city_name).await.inspect_err(|e| {
            tracing::warn!("Current weather lookup for '{}' failed: {}", city_name, e);
        })?;

        let weather = mapper::map_current_weather(wire, self.client.units());
        tracing::info!("Fetched current weather for {}", weather.name);

        self.remember_in_background(city_name);
        Ok(weather)
    }

    async fn get_forecast(&self, city_name: &str) -> Result<Forecast, WeatherError> {
        let wire = self.client.fetch_forecast(city_name).await.inspect_err(|e| {
            tracing::warn!("Forecast lookup for '{}' failed: {}", city_name, e);
        })?;

        let forecast = mapper::map_forecast(wire, self.client.units());
        tracing::info!(
            "Fetched {} forecast entries for {}",
            forecast.list.len(),
            forecast.city.name
        );
        Ok(forecast)
    }

    fn get_last_searched_city(&self) -> watch::Receiver<Option<LastSearchedCity>> {
        self.store.observe_last_searched()
    }

    async fn save_city(&self, city_name: &str) -> Result<(), WeatherError> {
        self.store.upsert(city_name).await
    }

    async fn forget_city(&self, city_name: &str) -> Result<(), WeatherError> {
        self.store.delete(city_name).await
    }

    async fn forget_all(&self) -> Result<(), WeatherError> {
        self.store.delete_all().await
    }
}
