use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

const KM_PER_MILE: f64 = 1.609_344;
const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Value of the forecast `temperature_unit` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn convert(self, value: f64, to: TemperatureUnit) -> f64 {
        match (self, to) {
            (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
            (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
            _ => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindSpeedUnit {
    #[default]
    KmPerHour,
    MilesPerHour,
}

impl WindSpeedUnit {
    /// Value of the forecast `wind_speed_unit` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            WindSpeedUnit::KmPerHour => "kmh",
            WindSpeedUnit::MilesPerHour => "mph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindSpeedUnit::KmPerHour => "km/h",
            WindSpeedUnit::MilesPerHour => "mph",
        }
    }

    pub fn convert(self, value: f64, to: WindSpeedUnit) -> f64 {
        match (self, to) {
            (WindSpeedUnit::KmPerHour, WindSpeedUnit::MilesPerHour) => value / KM_PER_MILE,
            (WindSpeedUnit::MilesPerHour, WindSpeedUnit::KmPerHour) => value * KM_PER_MILE,
            _ => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    Millimeters,
    Inches,
}

impl PrecipitationUnit {
    /// Value of the forecast `precipitation_unit` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            PrecipitationUnit::Millimeters => "mm",
            PrecipitationUnit::Inches => "inch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecipitationUnit::Millimeters => "mm",
            PrecipitationUnit::Inches => "in",
        }
    }

    pub fn convert(self, value: f64, to: PrecipitationUnit) -> f64 {
        match (self, to) {
            (PrecipitationUnit::Millimeters, PrecipitationUnit::Inches) => value / MM_PER_INCH,
            (PrecipitationUnit::Inches, PrecipitationUnit::Millimeters) => value * MM_PER_INCH,
            _ => value,
        }
    }
}

/// The three measurement units the user has selected.
///
/// Lives for the whole session and is only changed by explicit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind: WindSpeedUnit,
    pub precipitation: PrecipitationUnit,
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

impl TryFrom<&str> for WindSpeedUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "kmh" | "km/h" => Ok(WindSpeedUnit::KmPerHour),
            "mph" => Ok(WindSpeedUnit::MilesPerHour),
            _ => Err(anyhow::anyhow!(
                "Unknown wind speed unit '{value}'. Supported units: kmh, mph."
            )),
        }
    }
}

impl TryFrom<&str> for PrecipitationUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "mm" => Ok(PrecipitationUnit::Millimeters),
            "in" | "inch" | "inches" => Ok(PrecipitationUnit::Inches),
            _ => Err(anyhow::anyhow!(
                "Unknown precipitation unit '{value}'. Supported units: mm, inch."
            )),
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for PrecipitationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
