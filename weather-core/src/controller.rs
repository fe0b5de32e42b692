//! View-state controllers, one per screen.
//!
//! Each controller owns observable state (`tokio::sync::watch`) plus a queue
//! of one-shot events, and exposes the imperative actions a UI calls.
//! Controllers spawn their fetches, so they must be created and driven from
//! inside a Tokio runtime.

use std::sync::Arc;

pub mod city_input;
pub mod current_weather;
pub mod events;
pub mod forecast;
mod fetch;

pub use city_input::{CityInputController, CityInputEvent, EMPTY_INPUT_MESSAGE};
pub use current_weather::CurrentWeatherController;
pub use events::EventQueue;
pub use forecast::{ForecastController, ForecastEvent, ForecastIntent};

/// Fetch lifecycle of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(Arc<T>),
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Success or Error.
    pub fn is_settled(&self) -> bool {
        matches!(self, ViewState::Success(_) | ViewState::Error(_))
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            ViewState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}
