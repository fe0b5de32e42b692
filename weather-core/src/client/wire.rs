//! Provider JSON shapes. Only the fields the mapper reads are declared;
//! serde ignores the rest.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCondition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub weather: Vec<WireCondition>,
    pub main: WireMain,
    #[serde(default)]
    pub visibility: i32,
    pub wind: WireWind,
    pub sys: WireSys,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireForecastItem {
    pub dt: i64,
    pub main: WireMain,
    pub weather: Vec<WireCondition>,
    pub wind: WireWind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCity {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<WireForecastItem>,
    pub city: WireCity,
}

/// Error body the provider sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireErrorBody {
    pub message: String,
}
