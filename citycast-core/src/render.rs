//! Pure view-model production from a [`WeatherSnapshot`].
//!
//! Nothing here touches the network or any presentation layer. Values are
//! converted from the units the snapshot was fetched in to the caller's
//! current [`UnitPreferences`], so a unit toggle only needs a re-render.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

use crate::{
    icon::{IconCategory, map_code},
    model::WeatherSnapshot,
    units::{PrecipitationUnit, TemperatureUnit, UnitPreferences},
};

pub const HOURLY_ROWS: usize = 12;
pub const DAILY_ROWS: usize = 7;

const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub place_label: String,
    pub date_label: String,
    pub icon: IconCategory,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub time_label: String,
    pub icon: IconCategory,
    pub temperature: String,
    pub precipitation_probability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub day_label: String,
    pub icon: IconCategory,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: CurrentView,
    pub hourly: Vec<HourlyRow>,
    pub daily: Vec<DailyRow>,
}

pub fn render(
    snapshot: &WeatherSnapshot,
    preferences: &UnitPreferences,
    now: DateTime<Utc>,
) -> WeatherView {
    WeatherView {
        current: render_current(snapshot, preferences, now),
        hourly: render_hourly(snapshot, preferences, now),
        daily: render_daily(snapshot, preferences),
    }
}

pub fn render_current(
    snapshot: &WeatherSnapshot,
    preferences: &UnitPreferences,
    now: DateTime<Utc>,
) -> CurrentView {
    let current = &snapshot.forecast.current;
    let from = snapshot.units;

    CurrentView {
        place_label: snapshot.place_label.clone(),
        date_label: local_now(snapshot, now)
            .format("%A, %b %-d, %Y")
            .to_string(),
        icon: map_code(current.weather_code),
        temperature: degrees(current.temperature, from.temperature, preferences.temperature),
        feels_like: degrees(
            current.apparent_temperature,
            from.temperature,
            preferences.temperature,
        ),
        humidity: current
            .humidity_percent
            .map(|v| format!("{v}%"))
            .unwrap_or_else(|| MISSING.to_string()),
        wind: current
            .wind_speed
            .map(|v| {
                let v = from.wind.convert(v, preferences.wind);
                format!("{} {}", round_half_up(v), preferences.wind.label())
            })
            .unwrap_or_else(|| MISSING.to_string()),
        precipitation: current
            .precipitation
            .map(|v| {
                format!(
                    "{} {}",
                    precipitation(v, from.precipitation, preferences.precipitation),
                    preferences.precipitation.label()
                )
            })
            .unwrap_or_else(|| MISSING.to_string()),
    }
}

/// Up to twelve rows starting at the current local hour. Clipped at the end
/// of the series, never wrapped.
pub fn render_hourly(
    snapshot: &WeatherSnapshot,
    preferences: &UnitPreferences,
    now: DateTime<Utc>,
) -> Vec<HourlyRow> {
    let local = local_now(snapshot, now);
    let hour_start = local
        .date()
        .and_hms_opt(local.hour(), 0, 0)
        .unwrap_or(local);
    let from = snapshot.units.temperature;

    snapshot
        .forecast
        .hourly
        .iter()
        .skip_while(|p| p.timestamp < hour_start)
        .take(HOURLY_ROWS)
        .map(|p| HourlyRow {
            time_label: p.timestamp.format("%I:%M %p").to_string(),
            icon: map_code(p.weather_code),
            temperature: degrees(p.temperature, from, preferences.temperature),
            precipitation_probability: p
                .precipitation_probability
                .map(|v| format!("{}%", round_half_up(v)))
                .unwrap_or_else(|| MISSING.to_string()),
        })
        .collect()
}

/// Seven rows, or fewer when the series is shorter.
pub fn render_daily(snapshot: &WeatherSnapshot, preferences: &UnitPreferences) -> Vec<DailyRow> {
    let from = snapshot.units.temperature;

    snapshot
        .forecast
        .daily
        .iter()
        .take(DAILY_ROWS)
        .map(|d| DailyRow {
            day_label: d.date.format("%a").to_string(),
            icon: map_code(d.weather_code),
            high: degrees(d.temp_max, from, preferences.temperature),
            low: degrees(d.temp_min, from, preferences.temperature),
        })
        .collect()
}

/// Wall-clock time at the snapshot's location.
fn local_now(snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> NaiveDateTime {
    match FixedOffset::east_opt(snapshot.forecast.utc_offset_seconds) {
        Some(offset) => now.with_timezone(&offset).naive_local(),
        None => now.naive_utc(),
    }
}

/// Half-up rounding, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn degrees(value: Option<f64>, from: TemperatureUnit, to: TemperatureUnit) -> String {
    match value {
        Some(v) => format!("{}°", round_half_up(from.convert(v, to))),
        None => MISSING.to_string(),
    }
}

/// Provider precision when no conversion is needed; otherwise two decimals
/// for inches and one for millimetres.
fn precipitation(value: f64, from: PrecipitationUnit, to: PrecipitationUnit) -> String {
    if from == to {
        return value.to_string();
    }
    let scale = match to {
        PrecipitationUnit::Inches => 100.0,
        PrecipitationUnit::Millimeters => 10.0,
    };
    ((from.convert(value, to) * scale).round() / scale).to_string()
}
