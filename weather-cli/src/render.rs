//! Terminal output for the three screens.

use chrono::Local;
use weather_core::{
    CurrentWeather, Forecast, LastSearchedCity,
    format::{
        self, IconSize, SAMPLES_PER_DAY, capitalize_first, condition_category, format_humidity,
        format_pressure, format_temperature, format_time, format_wind_speed,
    },
};

pub fn print_current(weather: &CurrentWeather, icon_base_url: &str) {
    println!("{}, {}", weather.name, weather.sys.country);

    if let Some(condition) = weather.primary_condition() {
        println!(
            "  {} ({})",
            capitalize_first(&condition.description),
            condition_category(condition.id)
        );
        println!("  Icon:        {}", format::icon_url(icon_base_url, &condition.icon, IconSize::Medium));
    }

    println!(
        "  Temperature: {} (feels like {})",
        format_temperature(weather.main.temp),
        format_temperature(weather.main.feels_like)
    );
    println!(
        "  Min / Max:   {} / {}",
        format_temperature(weather.main.temp_min),
        format_temperature(weather.main.temp_max)
    );
    println!("  Humidity:    {}", format_humidity(weather.main.humidity));
    println!("  Pressure:    {}", format_pressure(weather.main.pressure));
    println!("  Wind:        {}", format_wind_speed(weather.wind.speed));
    println!("  Visibility:  {:.1} km", f64::from(weather.visibility) / 1000.0);
    println!(
        "  Sunrise:     {} UTC, sunset {} UTC",
        format_time(weather.sys.sunrise),
        format_time(weather.sys.sunset)
    );
}

pub fn print_forecast(forecast: &Forecast, fixed_chunks: bool) {
    println!("Forecast for {}", forecast.city.name);

    if forecast.list.is_empty() {
        println!("  No forecast data available");
        return;
    }

    if fixed_chunks {
        for (i, chunk) in format::chunk_daily(&forecast.list, SAMPLES_PER_DAY).iter().enumerate() {
            let Some(first) = chunk.first() else { continue };
            println!("  Day {} ({})", i + 1, format::format_date(first.dt));
            for item in chunk.iter() {
                print_sample(item);
            }
        }
        return;
    }

    for day in format::group_by_day(&forecast.list) {
        let range = day
            .temp_range()
            .map(|(lo, hi)| format!("{} .. {}", format_temperature(lo), format_temperature(hi)))
            .unwrap_or_default();
        let summary = day.dominant_condition().map(capitalize_first).unwrap_or_default();

        println!("  {}  {}  {}", day.date.format("%a, %b %d"), range, summary);
        for item in day.items {
            print_sample(item);
        }
    }
}

fn print_sample(item: &weather_core::ForecastItem) {
    let description = item
        .weather
        .first()
        .map(|w| capitalize_first(&w.description))
        .unwrap_or_default();

    println!(
        "    {}  {:>8}  {:>10}  {}",
        format_time(item.dt),
        format_temperature(item.main.temp),
        format_wind_speed(item.wind.speed),
        description
    );
}

pub fn print_last_searched(last: Option<&LastSearchedCity>) {
    match last {
        Some(city) => {
            let when = city
                .searched_at()
                .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown time".to_string());
            println!("{} (searched {})", city.name, when);
        }
        None => println!("No city searched yet"),
    }
}
