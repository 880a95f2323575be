use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system sent to the upstream API as the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one city. Immutable once fetched; a new search
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// hPa.
    pub pressure: u32,
    pub wind_speed: f64,
    /// Meters, as reported upstream.
    pub visibility: u32,
    /// Primary condition label, e.g. "Clouds".
    pub condition: String,
    /// Longer condition text, e.g. "scattered clouds".
    pub description: String,
    /// Upstream icon code, e.g. "03d".
    pub icon: String,
    pub observed_at: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
}

impl CurrentConditions {
    /// Full-size icon for the current-conditions block.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@4x.png", self.icon)
    }
}

/// One raw 3-hourly forecast sample, upstream-provided and read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds.
    pub dt: i64,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

/// Aggregated forecast for one calendar day. Derived on every fetch, never
/// persisted.
#[derive(Debug, Clone)]
pub struct DaySummary {
    /// Day label, e.g. "Jan 5".
    pub date_label: String,
    /// Short weekday label, e.g. "Mon".
    pub weekday: String,
    /// The day's samples in chronological order.
    pub samples: Vec<ForecastSample>,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Arithmetic mean, unrounded; rounding happens at render time.
    pub temp_avg: f64,
    /// Icon of the midday-ish sample.
    pub icon: String,
    /// Label of the day's first sample. Can disagree with `icon`; the
    /// upstream app behaves the same way.
    pub condition: String,
}

impl DaySummary {
    /// Smaller icon used in forecast rows.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}
