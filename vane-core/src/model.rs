use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather lookup, addressed either by place name or by coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    ByName(String),
    ByCoords { latitude: f64, longitude: f64 },
}

impl WeatherQuery {
    /// Build a name query from user input, carrying the text verbatim.
    /// Empty input means there is nothing to ask for and yields `None`.
    pub fn by_name(text: &str) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(Self::ByName(text.to_string()))
        }
    }
}

/// Current conditions for one location, as returned by the provider.
///
/// Only built from a fully parsed provider response; a failed fetch
/// produces no report at all, never a partial one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// First of the provider's condition entries, if it sent any.
    pub condition: Option<String>,
    pub wind_speed: f64,
    pub cloud_cover_pct: u8,
    pub observation_time: DateTime<Utc>,
}
