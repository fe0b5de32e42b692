use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather condition entry (the provider may report several).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Main readings. Temperatures are Kelvin; convert only when formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: i32,
    /// percent
    pub humidity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Snapshot of a single current-weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: Wind,
    pub sys: SysInfo,
    /// meters
    pub visibility: i32,
}

impl CurrentWeather {
    /// First reported condition, which the provider orders as primary.
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Unix timestamp (seconds, UTC).
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<WeatherCondition>,
    pub wind: Wind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

/// Forecast samples in provider order (chronological, several per day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    pub list: Vec<ForecastItem>,
}

/// The single remembered city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSearchedCity {
    pub name: String,
    /// Unix millis.
    pub last_searched_at: i64,
}

impl LastSearchedCity {
    pub fn searched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.last_searched_at)
    }
}
