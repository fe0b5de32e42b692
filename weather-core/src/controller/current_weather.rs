use std::sync::Arc;
use tokio::sync::watch;

use crate::{model::CurrentWeather, usecase::GetCurrentWeather};

use super::{ViewState, fetch::FetchGuard};

struct Shared {
    city_name: String,
    get_current_weather: GetCurrentWeather,
    state: watch::Sender<ViewState<CurrentWeather>>,
    guard: FetchGuard,
}

/// Current weather screen for a city chosen by navigation. Loads on creation.
pub struct CurrentWeatherController {
    shared: Arc<Shared>,
}

impl CurrentWeatherController {
    pub fn new(city_name: impl Into<String>, get_current_weather: GetCurrentWeather) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        let controller = Self {
            shared: Arc::new(Shared {
                city_name: city_name.into(),
                get_current_weather,
                state,
                guard: FetchGuard::default(),
            }),
        };
        controller.load();
        controller
    }

    pub fn city_name(&self) -> &str {
        &self.shared.city_name
    }

    pub fn state(&self) -> ViewState<CurrentWeather> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<CurrentWeather>> {
        self.shared.state.subscribe()
    }

    pub fn refresh(&self) {
        self.load();
    }

    pub fn retry(&self) {
        self.load();
    }

    pub fn clear_error(&self) {
        self.shared.state.send_if_modified(|state| {
            if state.error().is_none() {
                return false;
            }
            *state = ViewState::Idle;
            true
        });
    }

    fn load(&self) {
        let ticket = self.shared.guard.begin();
        self.shared.state.send_replace(ViewState::Loading);

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let next = match shared.get_current_weather.execute(&shared.city_name).await {
                Ok(weather) => ViewState::Success(Arc::new(weather)),
                Err(e) => ViewState::Error(e.to_string()),
            };
            shared.guard.commit(&shared.state, ticket, next);
        });
        self.shared.guard.track(handle);
    }
}

impl Drop for CurrentWeatherController {
    fn drop(&mut self) {
        self.shared.guard.cancel();
    }
}
