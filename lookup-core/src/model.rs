use serde::{Deserialize, Serialize};

/// Default forecast horizon requested from the provider.
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    /// Trimmed location query.
    pub query: String,
    pub days: u8,
    pub air_quality: bool,
    pub alerts: bool,
}

impl ForecastRequest {
    pub fn new(query: impl Into<String>, days: u8) -> Self {
        Self { query: query.into(), days, air_quality: false, alerts: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: Location,
    pub current: CurrentConditions,
    /// Short-term daily outlook; empty when the provider omits it.
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Provider local time, e.g. `2024-06-01 14:30`.
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub condition: String,
    /// Absolute icon URL (scheme already applied).
    pub icon_url: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity: f64,
    pub pressure_mb: f64,
    pub uv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: String,
    pub icon_url: String,
    pub chance_of_rain: Option<f64>,
}
