use std::sync::Arc;
use tokio::sync::watch;

use crate::{model::Forecast, usecase::GetForecast};

use super::{EventQueue, ViewState, fetch::FetchGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastIntent {
    Load,
    Refresh,
    Retry,
}

/// Transient notifications, separate from the sticky error in [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastEvent {
    ShowError(String),
    NavigateBack,
}

struct Shared {
    city_name: String,
    get_forecast: GetForecast,
    state: watch::Sender<ViewState<Forecast>>,
    events: EventQueue<ForecastEvent>,
    guard: FetchGuard,
}

/// Forecast screen for a city chosen by navigation. Loads on creation.
pub struct ForecastController {
    shared: Arc<Shared>,
}

impl ForecastController {
    pub fn new(city_name: impl Into<String>, get_forecast: GetForecast) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        let controller = Self {
            shared: Arc::new(Shared {
                city_name: city_name.into(),
                get_forecast,
                state,
                events: EventQueue::new(),
                guard: FetchGuard::default(),
            }),
        };
        controller.process_intent(ForecastIntent::Load);
        controller
    }

    pub fn city_name(&self) -> &str {
        &self.shared.city_name
    }

    pub fn state(&self) -> ViewState<Forecast> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Forecast>> {
        self.shared.state.subscribe()
    }

    pub fn events(&self) -> &EventQueue<ForecastEvent> {
        &self.shared.events
    }

    pub fn process_intent(&self, intent: ForecastIntent) {
        tracing::debug!("Forecast intent {:?} for '{}'", intent, self.shared.city_name);
        match intent {
            ForecastIntent::Load | ForecastIntent::Refresh | ForecastIntent::Retry => self.load(),
        }
    }

    pub fn refresh(&self) {
        self.process_intent(ForecastIntent::Refresh);
    }

    pub fn retry(&self) {
        self.process_intent(ForecastIntent::Retry);
    }

    pub fn navigate_back(&self) {
        self.shared.events.push(ForecastEvent::NavigateBack);
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
            match shared.get_forecast.execute(&shared.city_name).await {
                Ok(forecast) => {
                    shared.guard.commit(&shared.state, ticket, ViewState::Success(Arc::new(forecast)));
                }
                Err(e) => {
                    let message = e.to_string();
                    if shared.guard.commit(&shared.state, ticket, ViewState::Error(message.clone())) {
                        shared.events.push(ForecastEvent::ShowError(message));
                    }
                }
            }
        });
        self.shared.guard.track(handle);
    }
}

impl Drop for ForecastController {
    fn drop(&mut self) {
        self.shared.guard.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        repository::{DefaultWeatherRepository, WeatherRepository},
        store::SqliteCityStore,
        testing::{FORECAST_ENTRIES, FakeWeatherClient},
    };
    use std::time::Duration;

    fn use_case(client: Arc<FakeWeatherClient>) -> GetForecast {
        let store = Arc::new(SqliteCityStore::in_memory().unwrap());
        let repo: Arc<dyn WeatherRepository> =
            Arc::new(DefaultWeatherRepository::new(client, store));
        GetForecast::new(repo)
    }

    async fn settled(controller: &ForecastController) -> ViewState<Forecast> {
        let mut rx = controller.subscribe();
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| s.is_settled()))
            .await
            .expect("controller never settled")
            .unwrap()
            .clone()
    }

    #[tokio::test]
    async fn loads_on_creation() {
        let client = Arc::new(FakeWeatherClient::new());
        let controller = ForecastController::new("Oslo", use_case(client.clone()));

        let state = settled(&controller).await;
        let forecast = state.data().unwrap();
        assert_eq!(forecast.city.name, "Oslo");
        assert_eq!(forecast.list.len() as i64, FORECAST_ENTRIES);
        assert!(controller.events().is_empty());
        assert_eq!(client.forecast_calls(), 1);
    }

    #[tokio::test]
    async fn error_is_sticky_and_notified_once() {
        let client = Arc::new(
            FakeWeatherClient::new().failing_with(WeatherError::Http {
                status: 500,
                message: "boom".into(),
            }),
        );
        let controller = ForecastController::new("Oslo", use_case(client));

        let state = settled(&controller).await;
        let message = state.error().unwrap().to_string();
        assert!(message.contains("500"));

        let events = controller.events().drain();
        assert_eq!(events, vec![ForecastEvent::ShowError(message.clone())]);
        assert!(controller.events().is_empty());

        // The inline error stays after the toast is consumed.
        assert_eq!(controller.state().error(), Some(message.as_str()));
    }

    #[tokio::test]
    async fn intents_all_trigger_a_fetch() {
        let client = Arc::new(FakeWeatherClient::new());
        let controller = ForecastController::new("Oslo", use_case(client.clone()));
        settled(&controller).await;

        controller.refresh();
        settled(&controller).await;
        controller.retry();
        settled(&controller).await;
        controller.process_intent(ForecastIntent::Load);
        settled(&controller).await;

        assert_eq!(client.forecast_calls(), 4);
    }

    #[tokio::test]
    async fn clear_error_then_navigate_back() {
        let client = Arc::new(FakeWeatherClient::new().failing_for(
            "Oslo",
            WeatherError::Network("offline".into()),
        ));
        let controller = ForecastController::new("Oslo", use_case(client));
        assert!(settled(&controller).await.error().is_some());

        controller.clear_error();
        assert!(controller.state().is_idle());

        controller.navigate_back();
        assert_eq!(controller.events().drain().last(), Some(&ForecastEvent::NavigateBack));
    }
}
