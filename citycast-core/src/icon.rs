use serde::{Deserialize, Serialize};

/// Display category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    #[default]
    Unknown,
}

/// Map a WMO weather code to its icon category.
///
/// Drizzle and rain showers share the rain bucket, snow showers share the
/// snow bucket. Anything unmapped, including a missing code, is `Unknown`.
pub fn map_code(code: Option<i32>) -> IconCategory {
    let Some(code) = code else {
        return IconCategory::Unknown;
    };

    match code {
        0 | 1 => IconCategory::Clear,
        2 => IconCategory::PartlyCloudy,
        3 => IconCategory::Overcast,
        45 | 48 => IconCategory::Fog,
        51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => IconCategory::Rain,
        71 | 73 | 75 | 85 | 86 => IconCategory::Snow,
        95 | 96 | 99 => IconCategory::Thunderstorm,
        _ => IconCategory::Unknown,
    }
}

impl IconCategory {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Clear => "☀️",
            IconCategory::PartlyCloudy => "⛅",
            IconCategory::Overcast => "☁️",
            IconCategory::Fog => "🌫️",
            IconCategory::Rain => "🌧️",
            IconCategory::Snow => "❄️",
            IconCategory::Thunderstorm => "⛈️",
            IconCategory::Unknown => "❓",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IconCategory::Clear => "Clear",
            IconCategory::PartlyCloudy => "Partly cloudy",
            IconCategory::Overcast => "Overcast",
            IconCategory::Fog => "Fog",
            IconCategory::Rain => "Rain",
            IconCategory::Snow => "Snow",
            IconCategory::Thunderstorm => "Thunderstorm",
            IconCategory::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_codes() {
        assert_eq!(map_code(Some(0)), IconCategory::Clear);
        assert_eq!(map_code(Some(1)), IconCategory::Clear);
    }

    #[test]
    fn cloud_codes() {
        assert_eq!(map_code(Some(2)), IconCategory::PartlyCloudy);
        assert_eq!(map_code(Some(3)), IconCategory::Overcast);
    }

    #[test]
    fn fog_codes() {
        assert_eq!(map_code(Some(45)), IconCategory::Fog);
        assert_eq!(map_code(Some(48)), IconCategory::Fog);
    }

    #[test]
    fn drizzle_rain_and_showers_share_rain() {
        for code in [51, 53, 55, 61, 63, 65, 80, 81, 82] {
            assert_eq!(map_code(Some(code)), IconCategory::Rain, "code {code}");
        }
    }

    #[test]
    fn snow_codes() {
        for code in [71, 73, 75, 85, 86] {
            assert_eq!(map_code(Some(code)), IconCategory::Snow, "code {code}");
        }
    }

    #[test]
    fn thunderstorm_codes() {
        for code in [95, 96, 99] {
            assert_eq!(map_code(Some(code)), IconCategory::Thunderstorm, "code {code}");
        }
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        for code in [-1, 4, 56, 57, 66, 67, 77, 98, 100, 999] {
            assert_eq!(map_code(Some(code)), IconCategory::Unknown, "code {code}");
        }
        assert_eq!(map_code(None), IconCategory::Unknown);
    }

    #[test]
    fn glyph_and_description() {
        assert_eq!(IconCategory::Clear.glyph(), "☀️");
        assert_eq!(IconCategory::Unknown.glyph(), "❓");
        assert_eq!(IconCategory::PartlyCloudy.description(), "Partly cloudy");
    }
}
