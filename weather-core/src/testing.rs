//! In-crate fakes shared by unit tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};
use tokio::sync::watch;

use crate::{
    client::{
        WeatherClient,
        wire::{
            CurrentWeatherResponse, ForecastResponse, WireCity, WireCondition, WireForecastItem,
            WireMain, WireSys, WireWind,
        },
    },
    config::Units,
    error::WeatherError,
    model::LastSearchedCity,
    store::CityStore,
};

/// 2023-11-14T00:00:00Z
pub(crate) const FORECAST_START: i64 = 1_699_920_000;
pub(crate) const FORECAST_ENTRIES: i64 = 24;

/// Client that answers from memory, in Kelvin, echoing the requested city name.
#[derive(Debug, Default)]
pub(crate) struct FakeWeatherClient {
    failure: Option<WeatherError>,
    failures: HashMap<String, WeatherError>,
    delays: HashMap<String, Duration>,
    current_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
}

impl FakeWeatherClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_with(mut self, err: WeatherError) -> Self {
        self.failure = Some(err);
        self
    }

    pub(crate) fn failing_for(mut self, city: &str, err: WeatherError) -> Self {
        self.failures.insert(city.to_string(), err);
        self
    }

    pub(crate) fn delayed(mut self, city: &str, delay: Duration) -> Self {
        self.delays.insert(city.to_string(), delay);
        self
    }

    pub(crate) fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, city_name: &str) -> Result<(), WeatherError> {
        if let Some(delay) = self.delays.get(city_name) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = self.failures.get(city_name).or(self.failure.as_ref()) {
            return Err(err.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherClient for FakeWeatherClient {
    async fn fetch_current(&self, city_name: &str) -> Result<CurrentWeatherResponse, WeatherError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(city_name).await?;

        Ok(CurrentWeatherResponse {
            name: city_name.to_string(),
            weather: vec![condition(800, "Clear", "clear sky", "01d")],
            main: main(300.15),
            visibility: 10_000,
            wind: WireWind { speed: 5.0 },
            sys: WireSys {
                country: "GB".into(),
                sunrise: FORECAST_START + 6 * 3600,
                sunset: FORECAST_START + 18 * 3600,
            },
        })
    }

    async fn fetch_forecast(&self, city_name: &str) -> Result<ForecastResponse, WeatherError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(city_name).await?;

        let list = (0..FORECAST_ENTRIES)
            .map(|i| WireForecastItem {
                dt: FORECAST_START + i * 3 * 3600,
                main: main(280.0 + i as f64),
                weather: vec![condition(500, "Rain", "light rain", "10d")],
                wind: WireWind { speed: 3.5 },
            })
            .collect();

        Ok(ForecastResponse {
            list,
            city: WireCity {
                name: city_name.to_string(),
            },
        })
    }

    fn units(&self) -> Units {
        Units::Standard
    }
}

fn condition(id: i32, main: &str, description: &str, icon: &str) -> WireCondition {
    WireCondition {
        id,
        main: main.into(),
        description: description.into(),
        icon: icon.into(),
    }
}

fn main(temp: f64) -> WireMain {
    WireMain {
        temp,
        feels_like: temp - 1.0,
        temp_min: temp - 2.0,
        temp_max: temp + 2.0,
        pressure: 1013,
        humidity: 65,
    }
}

/// Store whose writes always fail.
pub(crate) struct FailingCityStore {
    latest: watch::Sender<Option<LastSearchedCity>>,
}

impl Default for FailingCityStore {
    fn default() -> Self {
        let (latest, _) = watch::channel(None);
        Self { latest }
    }
}

#[async_trait]
impl CityStore for FailingCityStore {
    fn observe_last_searched(&self) -> watch::Receiver<Option<LastSearchedCity>> {
        self.latest.subscribe()
    }

    async fn upsert(&self, _city_name: &str) -> Result<(), WeatherError> {
        Err(WeatherError::Storage("disk full".into()))
    }

    async fn delete(&self, _city_name: &str) -> Result<(), WeatherError> {
        Err(WeatherError::Storage("disk full".into()))
    }

    async fn delete_all(&self) -> Result<(), WeatherError> {
        Err(WeatherError::Storage("disk full".into()))
    }
}
