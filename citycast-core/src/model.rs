use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::UnitPreferences;

/// A place returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub admin_region: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceCandidate {
    /// Label shown for a resolved place, e.g. "Paris, France".
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }

    /// Secondary suggestion line: "Île-de-France, France", or just the country.
    pub fn region_line(&self) -> String {
        match self.admin_region.as_deref().filter(|a| !a.is_empty()) {
            Some(admin) if !self.country.is_empty() => format!("{admin}, {}", self.country),
            Some(admin) => admin.to_string(),
            None => self.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Wall-clock time in the place's own timezone.
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub weather_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
}

/// Parsed forecast payload for one coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// IANA zone name reported by the provider.
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

/// Everything displayed for one resolved location.
///
/// Replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place_label: String,
    pub place: PlaceCandidate,
    /// Units the provider used for the numbers in `forecast`.
    pub units: UnitPreferences,
    pub forecast: Forecast,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(place: PlaceCandidate, units: UnitPreferences, forecast: Forecast) -> Self {
        Self {
            place_label: place.label(),
            place,
            units,
            forecast,
            fetched_at: Utc::now(),
        }
    }

    pub fn timezone(&self) -> &str {
        &self.forecast.timezone
    }
}
