use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tokio::sync::watch;
use weather_core::{CityInputEvent, Config, ForecastEvent, Units, ViewState, WeatherServices};

use crate::render;

/// Upper bound on how long the CLI waits for a screen to settle.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);
const EVENT_TIMEOUT: Duration = Duration::from_secs(1);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optionally the unit system).
    Configure {
        /// Unit system requested from the provider: "metric" or "standard".
        #[arg(long)]
        units: Option<String>,
    },

    /// Search a city; without CITY the last searched city is used.
    Search {
        city: Option<String>,
    },

    /// Show current weather for a city.
    Current {
        city: String,
    },

    /// Show the multi-day forecast for a city.
    Forecast {
        city: String,

        /// Group by fixed blocks of 8 samples instead of calendar days.
        #[arg(long)]
        fixed_chunks: bool,
    },

    /// Print the last searched city.
    Last,

    /// Remember a city as last searched without fetching weather.
    Remember {
        city: String,
    },

    /// Forget the remembered city.
    Forget {
        /// Only forget this city if it is the remembered one.
        city: Option<String>,

        #[arg(long, conflicts_with = "city")]
        all: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { units } => configure(units.as_deref()),
            command => {
                let config = Config::load()?;
                run_with_config(command, &config).await
            }
        }
    }
}

async fn run_with_config(command: Command, config: &Config) -> anyhow::Result<()> {
    let services = WeatherServices::from_config(config)?;

    match command {
        Command::Configure { .. } => Ok(()),
        Command::Search { city } => search(&services, city, config).await,
        Command::Current { city } => current(&services, &city, config).await,
        Command::Forecast { city, fixed_chunks } => forecast(&services, &city, fixed_chunks).await,
        Command::Last => {
            let last = services.get_last_searched_city().execute().borrow().clone();
            render::print_last_searched(last.as_ref());
            Ok(())
        }
        Command::Remember { city } => {
            let city = city.trim();
            if city.is_empty() {
                bail!("City name cannot be empty");
            }
            services.repository().save_city(city).await?;
            println!("Remembered {city}");
            Ok(())
        }
        Command::Forget { city, all } => {
            let city = city.filter(|_| !all);
            println!("{}", forget(&services, city.as_deref()).await?);
            Ok(())
        }
    }
}

fn configure(units: Option<&str>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key cannot be empty");
    }
    config.set_api_key(api_key);

    if let Some(units) = units {
        config.units = match units.to_lowercase().as_str() {
            "metric" => Units::Metric,
            "standard" => Units::Standard,
            other => return Err(anyhow!("Unknown unit system '{other}'. Use metric or standard.")),
        };
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Deletes the remembered city. With `city`, only when it is the stored one.
async fn forget(services: &WeatherServices, city: Option<&str>) -> anyhow::Result<String> {
    let stored = services.get_last_searched_city().execute().borrow().clone();

    let Some(stored) = stored else {
        return Ok("No city searched yet".to_string());
    };

    match city.map(str::trim) {
        Some(city) if city != stored.name => Ok(format!(
            "{city} is not the last searched city ({}); nothing forgotten",
            stored.name
        )),
        Some(city) => {
            services.repository().forget_city(city).await?;
            Ok(format!("Forgot {city}"))
        }
        None => {
            services.repository().forget_all().await?;
            Ok(format!("Forgot {}", stored.name))
        }
    }
}

async fn search(
    services: &WeatherServices,
    city: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let controller = services.city_input();
    if let Some(city) = city {
        controller.on_input_change(city);
    } else if !controller.input().is_empty() {
        println!("Using last searched city: {}", controller.input());
    }

    controller.search();

    match wait_settled(controller.subscribe()).await? {
        ViewState::Success(weather) => {
            let event = tokio::time::timeout(EVENT_TIMEOUT, controller.events().next()).await;
            if let Ok(CityInputEvent::NavigateToWeather(name)) = event {
                tracing::debug!("Navigating to weather for {}", name);
            }
            controller.on_navigation_handled();
            render::print_current(&weather, &config.icon_base_url);
            wait_remembered(services, controller.input().trim()).await;
            Ok(())
        }
        ViewState::Error(message) => bail!(message),
        _ => Err(anyhow!("Search finished without a result")),
    }
}

async fn current(services: &WeatherServices, city: &str, config: &Config) -> anyhow::Result<()> {
    let controller = services.current_weather(city);

    match wait_settled(controller.subscribe()).await? {
        ViewState::Success(weather) => {
            render::print_current(&weather, &config.icon_base_url);
            wait_remembered(services, city.trim()).await;
            Ok(())
        }
        ViewState::Error(message) => bail!(message),
        _ => Err(anyhow!("Unexpected state for {}", controller.city_name())),
    }
}

async fn forecast(services: &WeatherServices, city: &str, fixed_chunks: bool) -> anyhow::Result<()> {
    let controller = services.forecast(city);

    match wait_settled(controller.subscribe()).await? {
        ViewState::Success(forecast) => {
            render::print_forecast(&forecast, fixed_chunks);
            Ok(())
        }
        ViewState::Error(message) => {
            // The toast and the inline error carry the same text in a terminal.
            for event in controller.events().drain() {
                if let ForecastEvent::ShowError(toast) = event {
                    tracing::debug!("Forecast notification: {}", toast);
                }
            }
            bail!(message)
        }
        _ => Err(anyhow!("Unexpected state for {}", controller.city_name())),
    }
}

async fn wait_settled<T: Clone>(
    mut rx: watch::Receiver<ViewState<T>>,
) -> anyhow::Result<ViewState<T>> {
    let state = tokio::time::timeout(SETTLE_TIMEOUT, rx.wait_for(|s| s.is_settled()))
        .await
        .context("Timed out waiting for the weather service")?
        .context("Screen was closed before the lookup finished")?;
    Ok(state.clone())
}

/// The last-searched city is saved in the background; give it a moment to
/// land before the process exits.
async fn wait_remembered(services: &WeatherServices, city: &str) {
    let mut rx = services.get_last_searched_city().execute();
    let saved = tokio::time::timeout(
        EVENT_TIMEOUT,
        rx.wait_for(|last| last.as_ref().is_some_and(|c| c.name == city)),
    )
    .await;

    if !matches!(saved, Ok(Ok(_))) {
        tracing::warn!("Could not confirm {} was remembered", city);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_without_city() {
        let cli = Cli::try_parse_from(["weather", "search"]).unwrap();
        assert!(matches!(cli.command, Command::Search { city: None }));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_forecast_flags_and_verbosity() {
        let cli = Cli::try_parse_from(["weather", "-vv", "forecast", "Oslo", "--fixed-chunks"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Forecast { city, fixed_chunks } => {
                assert_eq!(city, "Oslo");
                assert!(fixed_chunks);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn offline_services() -> WeatherServices {
        let client = weather_core::OpenWeatherClient::new(
            "TEST_KEY".into(),
            "http://127.0.0.1:1",
            Duration::from_secs(1),
            Units::Metric,
        )
        .unwrap();
        let store = weather_core::SqliteCityStore::in_memory().unwrap();
        WeatherServices::new(std::sync::Arc::new(client), std::sync::Arc::new(store))
    }

    #[tokio::test]
    async fn forget_named_city_only_when_it_is_stored() {
        let services = offline_services();
        services.repository().save_city("Lisbon").await.unwrap();

        let message = forget(&services, Some("Oslo")).await.unwrap();
        assert!(message.contains("nothing forgotten"));
        assert!(services.get_last_searched_city().execute().borrow().is_some());

        let message = forget(&services, Some(" Lisbon ")).await.unwrap();
        assert_eq!(message, "Forgot Lisbon");
        assert!(services.get_last_searched_city().execute().borrow().is_none());

        let message = forget(&services, None).await.unwrap();
        assert_eq!(message, "No city searched yet");
    }

    #[test]
    fn forget_rejects_city_with_all() {
        assert!(Cli::try_parse_from(["weather", "forget", "Oslo", "--all"]).is_err());
        assert!(Cli::try_parse_from(["weather", "forget", "--all"]).is_ok());
    }
}
