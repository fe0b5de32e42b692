//! Presentation helpers. Domain temperatures are Kelvin; these render Celsius.

use chrono::{DateTime, NaiveDate};

use crate::model::ForecastItem;

/// Samples per day at the provider's 3-hour cadence.
pub const SAMPLES_PER_DAY: usize = 8;

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// `300.15` → `"27.0°C"`
pub fn format_temperature(kelvin: f64) -> String {
    format!("{:.1}°C", kelvin_to_celsius(kelvin))
}

pub fn format_humidity(humidity: i32) -> String {
    format!("{humidity}%")
}

pub fn format_pressure(pressure: i32) -> String {
    format!("{pressure}hPa")
}

/// m/s in, km/h out.
pub fn format_wind_speed(speed: f64) -> String {
    format!("{:.1} km/h", speed * 3.6)
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"Tue, Nov 14"` (UTC).
pub fn format_date(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.format("%a, %b %d").to_string())
        .unwrap_or_default()
}

/// `"06:00"` (UTC).
pub fn format_time(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl IconSize {
    fn suffix(&self) -> &'static str {
        match self {
            IconSize::Small => "@1x.png",
            IconSize::Medium => "@2x.png",
            IconSize::Large => "@4x.png",
        }
    }
}

pub fn icon_url(base_url: &str, icon_code: &str, size: IconSize) -> String {
    format!("{}/{}{}", base_url.trim_end_matches('/'), icon_code, size.suffix())
}

/// Broad category for a provider condition code.
pub fn condition_category(id: i32) -> &'static str {
    match id {
        200..=299 => "thunderstorm",
        300..=399 => "drizzle",
        500..=599 => "rain",
        600..=699 => "snow",
        700..=799 => "atmosphere",
        800 => "clear",
        801..=899 => "clouds",
        _ => "unknown",
    }
}

/// Fixed-size grouping. Assumes exactly [`SAMPLES_PER_DAY`] samples per day,
/// which drifts when the first sample isn't at midnight; prefer [`group_by_day`].
pub fn chunk_daily(items: &[ForecastItem], size: usize) -> Vec<&[ForecastItem]> {
    items.chunks(size.max(1)).collect()
}

/// Forecast samples sharing one UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay<'a> {
    pub date: NaiveDate,
    pub items: &'a [ForecastItem],
}

impl ForecastDay<'_> {
    /// (min, max) in Kelvin over the day's samples.
    pub fn temp_range(&self) -> Option<(f64, f64)> {
        self.items.iter().fold(None, |acc, item| {
            let (lo, hi) = acc.unwrap_or((item.main.temp_min, item.main.temp_max));
            Some((lo.min(item.main.temp_min), hi.max(item.main.temp_max)))
        })
    }

    /// Most frequent condition description of the day.
    pub fn dominant_condition(&self) -> Option<&str> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for condition in self.items.iter().filter_map(|i| i.weather.first()) {
            match counts.iter_mut().find(|(d, _)| *d == condition.description) {
                Some((_, n)) => *n += 1,
                None => counts.push((condition.description.as_str(), 1)),
            }
        }
        // max_by_key keeps the last maximum; reverse so ties go to the earliest.
        counts.into_iter().rev().max_by_key(|(_, n)| *n).map(|(d, _)| d)
    }
}

/// Groups consecutive samples by the UTC date of their timestamp.
pub fn group_by_day(items: &[ForecastItem]) -> Vec<ForecastDay<'_>> {
    items
        .chunk_by(|a, b| utc_date(a.dt) == utc_date(b.dt))
        .filter_map(|chunk| {
            chunk.first().map(|first| ForecastDay {
                date: utc_date(first.dt),
                items: chunk,
            })
        })
        .collect()
}

fn utc_date(unix: i64) -> NaiveDate {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MainReadings, WeatherCondition, Wind};

    fn item(dt: i64, temp: f64, description: &str) -> ForecastItem {
        ForecastItem {
            dt,
            main: MainReadings {
                temp,
                feels_like: temp,
                temp_min: temp - 1.0,
                temp_max: temp + 1.0,
                pressure: 1000,
                humidity: 50,
            },
            weather: vec![WeatherCondition {
                id: 800,
                main: "Clear".into(),
                description: description.into(),
                icon: "01d".into(),
            }],
            wind: Wind { speed: 1.0 },
        }
    }

    /// 2023-11-14T00:00:00Z
    const MIDNIGHT: i64 = 1_699_920_000;

    fn series(start: i64, count: i64) -> Vec<ForecastItem> {
        (0..count).map(|i| item(start + i * 10_800, 280.0, "clear sky")).collect()
    }

    #[test]
    fn temperature_is_rendered_in_celsius() {
        assert_eq!(format_temperature(300.15), "27.0°C");
        assert_eq!(format_temperature(273.15), "0.0°C");
        assert_eq!(format_temperature(263.15), "-10.0°C");
    }

    #[test]
    fn simple_formatters() {
        assert_eq!(format_humidity(65), "65%");
        assert_eq!(format_pressure(1013), "1013hPa");
        assert_eq!(format_wind_speed(5.0), "18.0 km/h");
        assert_eq!(capitalize_first("light rain"), "Light rain");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(format_date(MIDNIGHT), "Tue, Nov 14");
        assert_eq!(format_time(MIDNIGHT + 6 * 3600), "06:00");
    }

    #[test]
    fn icon_urls() {
        let base = "https://openweathermap.org/img/wn/";
        assert_eq!(
            icon_url(base, "10d", IconSize::Large),
            "https://openweathermap.org/img/wn/10d@4x.png"
        );
        assert_eq!(
            icon_url(base, "01n", IconSize::Small),
            "https://openweathermap.org/img/wn/01n@1x.png"
        );
    }

    #[test]
    fn condition_categories() {
        assert_eq!(condition_category(211), "thunderstorm");
        assert_eq!(condition_category(310), "drizzle");
        assert_eq!(condition_category(502), "rain");
        assert_eq!(condition_category(601), "snow");
        assert_eq!(condition_category(741), "atmosphere");
        assert_eq!(condition_category(800), "clear");
        assert_eq!(condition_category(804), "clouds");
        assert_eq!(condition_category(42), "unknown");
    }

    #[test]
    fn twenty_four_items_chunk_into_three_days() {
        let items = series(MIDNIGHT, 24);
        let chunks = chunk_daily(&items, SAMPLES_PER_DAY);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 8));
    }

    #[test]
    fn zero_chunk_size_does_not_panic() {
        let items = series(MIDNIGHT, 3);
        assert_eq!(chunk_daily(&items, 0).len(), 3);
    }

    #[test]
    fn group_by_day_follows_calendar_dates() {
        // Starts at 15:00, so fixed chunks of 8 would straddle midnight.
        let items = series(MIDNIGHT + 15 * 3600, 10);
        let days = group_by_day(&items);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].items.len(), 3);
        assert_eq!(days[1].items.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
    }

    #[test]
    fn day_summaries() {
        let items = vec![
            item(MIDNIGHT, 280.0, "light rain"),
            item(MIDNIGHT + 10_800, 285.0, "clear sky"),
            item(MIDNIGHT + 21_600, 283.0, "light rain"),
        ];
        let days = group_by_day(&items);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temp_range(), Some((279.0, 286.0)));
        assert_eq!(days[0].dominant_condition(), Some("light rain"));
    }
}
