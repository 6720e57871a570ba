use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt, time::Duration};

use crate::{
    error::FetchError,
    model::{CurrentConditions, ForecastDay, ForecastRequest, ForecastResult, Location},
};

use super::ForecastProvider;

#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiProvider").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}/forecast.json", base_url.trim_end_matches('/'));

        Ok(Self { api_key, endpoint, http })
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult, FetchError> {
        let days = request.days.to_string();

        tracing::debug!(query = %request.query, days = request.days, "requesting forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.query.as_str()),
                ("days", days.as_str()),
                ("aqi", yes_no(request.air_quality)),
                ("alerts", yes_no(request.alerts)),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaForecastResponse = serde_json::from_str(&body)?;

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    condition: WaCondition,
    wind_kph: f64,
    wind_dir: String,
    humidity: f64,
    pressure_mb: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
    daily_chance_of_rain: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

#[derive(Debug, Default, Deserialize)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    #[serde(default)]
    forecast: WaForecast,
}

impl From<WaForecastResponse> for ForecastResult {
    fn from(parsed: WaForecastResponse) -> Self {
        let WaForecastResponse { location, current, forecast } = parsed;

        Self {
            location: Location {
                name: location.name,
                country: location.country,
                localtime: location.localtime,
            },
            current: CurrentConditions {
                icon_url: absolute_icon_url(&current.condition.icon),
                condition: current.condition.text,
                temp_c: current.temp_c,
                feelslike_c: current.feelslike_c,
                wind_kph: current.wind_kph,
                wind_dir: current.wind_dir,
                humidity: current.humidity,
                pressure_mb: current.pressure_mb,
                uv: current.uv,
            },
            days: forecast
                .forecastday
                .into_iter()
                .map(|fd| ForecastDay {
                    date: fd.date,
                    max_temp_c: fd.day.maxtemp_c,
                    min_temp_c: fd.day.mintemp_c,
                    icon_url: absolute_icon_url(&fd.day.condition.icon),
                    condition: fd.day.condition.text,
                    chance_of_rain: fd.day.daily_chance_of_rain,
                })
                .collect(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Icons come back protocol-relative (`//cdn.weatherapi.com/...`).
fn absolute_icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "location": {"name": "Paris", "country": "France", "localtime": "2024-06-01 14:30"},
        "current": {
            "temp_c": 22, "feelslike_c": 21,
            "condition": {"text": "Sunny", "icon": "//cdn/sunny.png"},
            "wind_kph": 10, "wind_dir": "NW", "humidity": 40, "pressure_mb": 1013, "uv": 5
        }
    }"#;

    #[test]
    fn maps_payload_without_forecast_block() {
        let parsed: WaForecastResponse = serde_json::from_str(PARIS).expect("parse");
        let result = ForecastResult::from(parsed);

        assert_eq!(result.location.name, "Paris");
        assert_eq!(result.location.country, "France");
        assert_eq!(result.location.localtime, "2024-06-01 14:30");
        assert_eq!(result.current.condition, "Sunny");
        assert_eq!(result.current.icon_url, "https://cdn/sunny.png");
        assert_eq!(result.current.temp_c, 22.0);
        assert_eq!(result.current.wind_dir, "NW");
        assert_eq!(result.current.pressure_mb, 1013.0);
        assert!(result.days.is_empty());
    }

    #[test]
    fn missing_current_is_a_decode_error() {
        let body = r#"{"location": {"name": "Paris", "country": "France", "localtime": "x"}}"#;
        assert!(serde_json::from_str::<WaForecastResponse>(body).is_err());
    }

    #[test]
    fn maps_forecast_days() {
        let body = r#"{
            "location": {"name": "Oslo", "country": "Norway", "localtime": "2024-01-05 8:00"},
            "current": {
                "temp_c": -3.5, "feelslike_c": -8.1,
                "condition": {"text": "Light snow", "icon": "//cdn/snow.png"},
                "wind_kph": 14.4, "wind_dir": "N", "humidity": 86, "pressure_mb": 1002, "uv": 1
            },
            "forecast": {"forecastday": [
                {"date": "2024-01-05", "day": {"maxtemp_c": -1.2, "mintemp_c": -6.0,
                    "condition": {"text": "Snow", "icon": "//cdn/snow.png"}, "daily_chance_of_rain": 0}},
                {"date": "2024-01-06", "day": {"maxtemp_c": 0.4, "mintemp_c": -4.0,
                    "condition": {"text": "Cloudy", "icon": "https://cdn/cloud.png"}}}
            ]}
        }"#;

        let result = ForecastResult::from(serde_json::from_str::<WaForecastResponse>(body).expect("parse"));

        assert_eq!(result.days.len(), 2);
        assert_eq!(result.days[0].date, "2024-01-05");
        assert_eq!(result.days[0].chance_of_rain, Some(0.0));
        assert_eq!(result.days[1].icon_url, "https://cdn/cloud.png");
        assert_eq!(result.days[1].chance_of_rain, None);
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
