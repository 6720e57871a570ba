//! Presentation mapping: forecast result -> display strings.

use chrono::{Locale, NaiveDate, NaiveDateTime};

use crate::model::{ForecastDay, ForecastResult};

const TIMESTAMP_INPUT_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

const LONG_DATETIME_FORMAT: &str = "%A, %B %-d, %Y %H:%M";
const SHORT_DAY_FORMAT: &str = "%a %-d %b";

/// Presentation hint derived from the condition text, used to tint the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMood {
    Sunny,
    Night,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Foggy,
    Neutral,
}

impl BackgroundMood {
    pub fn from_condition(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["thunder"]) {
            BackgroundMood::Stormy
        } else if has(&["snow", "sleet", "blizzard", "ice"]) {
            BackgroundMood::Snowy
        } else if has(&["rain", "drizzle", "shower"]) {
            BackgroundMood::Rainy
        } else if has(&["fog", "mist", "haze"]) {
            BackgroundMood::Foggy
        } else if has(&["cloud", "overcast"]) {
            BackgroundMood::Cloudy
        } else if has(&["sunny"]) {
            BackgroundMood::Sunny
        } else if has(&["clear"]) {
            // The provider says "Clear" instead of "Sunny" after dark.
            BackgroundMood::Night
        } else {
            BackgroundMood::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Temperature,
    Wind,
    Humidity,
    Pressure,
    UvIndex,
    WindDirection,
}

impl DetailKind {
    pub fn label(&self) -> &'static str {
        match self {
            DetailKind::Temperature => "Temperature",
            DetailKind::Wind => "Wind",
            DetailKind::Humidity => "Humidity",
            DetailKind::Pressure => "Pressure",
            DetailKind::UvIndex => "UV Index",
            DetailKind::WindDirection => "Wind Direction",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub kind: DetailKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub label: String,
    pub high: String,
    pub low: String,
    pub condition: String,
    pub chance_of_rain: Option<String>,
}

/// Everything the result card shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub headline: String,
    pub local_time: String,
    pub temperature: String,
    pub condition: String,
    pub feels_like: String,
    pub icon_url: String,
    pub details: Vec<Detail>,
    pub days: Vec<DayView>,
    pub mood: BackgroundMood,
}

impl ForecastView {
    pub fn from_result(result: &ForecastResult, locale: Locale) -> Self {
        let location = &result.location;
        let current = &result.current;

        let details = vec![
            Detail { kind: DetailKind::Temperature, value: format!("{}°C", current.temp_c) },
            Detail { kind: DetailKind::Wind, value: format!("{} km/h", current.wind_kph) },
            Detail { kind: DetailKind::Humidity, value: format!("{}%", current.humidity) },
            Detail { kind: DetailKind::Pressure, value: format!("{} mb", current.pressure_mb) },
            Detail { kind: DetailKind::UvIndex, value: current.uv.to_string() },
            Detail { kind: DetailKind::WindDirection, value: current.wind_dir.clone() },
        ];

        Self {
            headline: format!("{}, {}", location.name, location.country),
            local_time: format_timestamp(&location.localtime, locale),
            temperature: format!("{}°", current.temp_c),
            condition: current.condition.clone(),
            feels_like: format!("Feels like {}°", current.feelslike_c),
            icon_url: current.icon_url.clone(),
            details,
            days: result.days.iter().map(|day| day_view(day, locale)).collect(),
            mood: BackgroundMood::from_condition(&current.condition),
        }
    }

    pub fn detail(&self, kind: DetailKind) -> Option<&str> {
        self.details.iter().find(|d| d.kind == kind).map(|d| d.value.as_str())
    }
}

fn day_view(day: &ForecastDay, locale: Locale) -> DayView {
    let label = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().format_localized(SHORT_DAY_FORMAT, locale).to_string())
        .unwrap_or_else(|| day.date.clone());

    DayView {
        label,
        high: format!("{}°", day.max_temp_c),
        low: format!("{}°", day.min_temp_c),
        condition: day.condition.clone(),
        chance_of_rain: day.chance_of_rain.map(|p| format!("{p}%")),
    }
}

/// Render a provider local-time string as a long date/time in `locale`.
///
/// No timezone conversion: the provider already reports local time.
pub fn format_timestamp(raw: &str, locale: Locale) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let parsed = TIMESTAMP_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok());

    match parsed {
        Some(dt) => dt.and_utc().format_localized(LONG_DATETIME_FORMAT, locale).to_string(),
        None => {
            tracing::debug!(raw, "unrecognized provider timestamp, showing it as-is");
            raw.to_string()
        }
    }
}
