use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    model::CurrentWeather,
    usecase::{GetCurrentWeather, GetLastSearchedCity},
};

use super::{EventQueue, ViewState, fetch::FetchGuard};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityInputEvent {
    /// A lookup succeeded; show the weather screen for this city.
    NavigateToWeather(String),
}

struct Shared {
    get_current_weather: GetCurrentWeather,
    input: watch::Sender<String>,
    state: watch::Sender<ViewState<CurrentWeather>>,
    events: EventQueue<CityInputEvent>,
    guard: FetchGuard,
}

/// City search screen: free-text input plus the state of the last lookup.
pub struct CityInputController {
    shared: Arc<Shared>,
}

impl CityInputController {
    /// Pre-fills the input with the last searched city, without fetching.
    pub fn new(
        get_current_weather: GetCurrentWeather,
        get_last_searched_city: &GetLastSearchedCity,
    ) -> Self {
        let initial_input = get_last_searched_city
            .execute()
            .borrow()
            .as_ref()
            .map(|city| city.name.clone())
            .unwrap_or_default();

        if !initial_input.is_empty() {
            tracing::debug!("Pre-filled city input with '{}'", initial_input);
        }

        let (input, _) = watch::channel(initial_input);
        let (state, _) = watch::channel(ViewState::Idle);

        Self {
            shared: Arc::new(Shared {
                get_current_weather,
                input,
                state,
                events: EventQueue::new(),
                guard: FetchGuard::default(),
            }),
        }
    }

    pub fn input(&self) -> String {
        self.shared.input.borrow().clone()
    }

    pub fn subscribe_input(&self) -> watch::Receiver<String> {
        self.shared.input.subscribe()
    }

    pub fn state(&self) -> ViewState<CurrentWeather> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<CurrentWeather>> {
        self.shared.state.subscribe()
    }

    pub fn events(&self) -> &EventQueue<CityInputEvent> {
        &self.shared.events
    }

    /// Editing away from the fetched city drops the cached result; any error is cleared.
    pub fn on_input_change(&self, text: impl Into<String>) {
        let text = text.into();

        self.shared.state.send_if_modified(|state| {
            let stale = match &*state {
                ViewState::Success(weather) => weather.name != text,
                ViewState::Error(_) => true,
                _ => false,
            };
            if stale {
                *state = ViewState::Idle;
            }
            stale
        });

        self.shared.input.send_replace(text);
    }

    pub fn search(&self) {
        let city_name = self.shared.input.borrow().trim().to_string();

        if city_name.is_empty() {
            self.shared.guard.cancel();
            self.shared
                .state
                .send_replace(ViewState::Error(EMPTY_INPUT_MESSAGE.to_string()));
            return;
        }

        let ticket = self.shared.guard.begin();
        self.shared.state.send_replace(ViewState::Loading);
        tracing::debug!("Searching weather for '{}'", city_name);

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            match shared.get_current_weather.execute(&city_name).await {
                Ok(weather) => {
                    let name = weather.name.clone();
                    let next = ViewState::Success(Arc::new(weather));
                    if shared.guard.commit(&shared.state, ticket, next) {
                        shared.events.push(CityInputEvent::NavigateToWeather(name));
                    }
                }
                Err(e) => {
                    shared.guard.commit(&shared.state, ticket, ViewState::Error(e.to_string()));
                }
            }
        });
        self.shared.guard.track(handle);
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

    /// The UI acted on (or no longer cares about) a pending navigation.
    pub fn on_navigation_handled(&self) {
        self.shared
            .events
            .discard(|event| matches!(event, CityInputEvent::NavigateToWeather(_)));
    }
}

impl Drop for CityInputController {
    fn drop(&mut self) {
        self.shared.guard.cancel();
    }
}
