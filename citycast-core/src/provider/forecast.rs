use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    model::{CurrentConditions, DailyPoint, Forecast, HourlyPoint},
    provider::{http_client, truncate_body},
    units::UnitPreferences,
};

use super::ForecastProvider;

const CURRENT_FIELDS: &str =
    "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m,apparent_temperature,precipitation";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,precipitation_probability";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

const HOUR_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    timezone: String,
    #[serde(default)]
    utc_offset_seconds: i32,
    current: OmCurrent,
    hourly: OmHourly,
    daily: OmDaily,
}

/// Value at `idx` of a parallel array; short arrays and nulls both read as `None`.
fn at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

impl OmResponse {
    fn into_forecast(self) -> Result<Forecast> {
        let hourly = self
            .hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let timestamp = NaiveDateTime::parse_from_str(t, HOUR_FORMAT)
                    .with_context(|| format!("Invalid hourly timestamp '{t}'"))?;
                Ok(HourlyPoint {
                    timestamp,
                    temperature: at(&self.hourly.temperature_2m, i),
                    precipitation_probability: at(&self.hourly.precipitation_probability, i),
                    weather_code: at(&self.hourly.weather_code, i),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let daily = self
            .daily
            .time
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let date = NaiveDate::parse_from_str(d, DATE_FORMAT)
                    .with_context(|| format!("Invalid daily date '{d}'"))?;
                Ok(DailyPoint {
                    date,
                    weather_code: at(&self.daily.weather_code, i),
                    temp_max: at(&self.daily.temperature_2m_max, i),
                    temp_min: at(&self.daily.temperature_2m_min, i),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Forecast {
            timezone: self.timezone,
            utc_offset_seconds: self.utc_offset_seconds,
            current: CurrentConditions {
                temperature: self.current.temperature_2m,
                apparent_temperature: self.current.apparent_temperature,
                humidity_percent: self.current.relative_humidity_2m,
                wind_speed: self.current.wind_speed_10m,
                precipitation: self.current.precipitation,
                weather_code: self.current.weather_code,
            },
            hourly,
            daily,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecast {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        units: &UnitPreferences,
    ) -> Result<Forecast> {
        debug!(latitude, longitude, ?units, "forecast request");

        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("temperature_unit", units.temperature.as_query()),
                ("wind_speed_unit", units.wind.as_query()),
                ("precipitation_unit", units.precipitation.as_query()),
            ])
            .send()
            .await
            .context("Failed to send forecast request")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OmResponse =
            serde_json::from_str(&body).context("Failed to parse forecast JSON")?;

        parsed.into_forecast()
    }
}
