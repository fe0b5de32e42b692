//! Wire → domain translation.
//!
//! Pure and total: a payload that reached this point already deserialized,
//! so nothing here can fail. Fields the presentation never reads are dropped.
//! Temperatures are normalized to Kelvin using the unit system the payload
//! was requested in.

use crate::{
    client::wire::{
        CurrentWeatherResponse, ForecastResponse, WireCity, WireCondition, WireForecastItem,
        WireMain, WireSys, WireWind,
    },
    config::Units,
    model::{
        City, CurrentWeather, Forecast, ForecastItem, MainReadings, SysInfo, WeatherCondition,
        Wind,
    },
};

pub fn map_current_weather(wire: CurrentWeatherResponse, units: Units) -> CurrentWeather {
    CurrentWeather {
        name: wire.name,
        weather: map_conditions(wire.weather),
        main: map_main(wire.main, units),
        wind: map_wind(wire.wind),
        sys: map_sys(wire.sys),
        visibility: wire.visibility,
    }
}

pub fn map_forecast(wire: ForecastResponse, units: Units) -> Forecast {
    Forecast {
        city: map_city(wire.city),
        list: wire
            .list
            .into_iter()
            .map(|item| map_forecast_item(item, units))
            .collect(),
    }
}

pub fn map_forecast_item(wire: WireForecastItem, units: Units) -> ForecastItem {
    ForecastItem {
        dt: wire.dt,
        main: map_main(wire.main, units),
        weather: map_conditions(wire.weather),
        wind: map_wind(wire.wind),
    }
}

pub fn map_city(wire: WireCity) -> City {
    City { name: wire.name }
}

pub fn map_condition(wire: WireCondition) -> WeatherCondition {
    WeatherCondition {
        id: wire.id,
        main: wire.main,
        description: wire.description,
        icon: wire.icon,
    }
}

pub fn map_main(wire: WireMain, units: Units) -> MainReadings {
    MainReadings {
        temp: units.to_kelvin(wire.temp),
        feels_like: units.to_kelvin(wire.feels_like),
        temp_min: units.to_kelvin(wire.temp_min),
        temp_max: units.to_kelvin(wire.temp_max),
        pressure: wire.pressure,
        humidity: wire.humidity,
    }
}

pub fn map_wind(wire: WireWind) -> Wind {
    Wind { speed: wire.speed }
}

pub fn map_sys(wire: WireSys) -> SysInfo {
    SysInfo {
        country: wire.country,
        sunrise: wire.sunrise,
        sunset: wire.sunset,
    }
}

fn map_conditions(wire: Vec<WireCondition>) -> Vec<WeatherCondition> {
    wire.into_iter().map(map_condition).collect()
}
