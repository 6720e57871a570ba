use std::fmt::Write;

use chrono::Locale;
use lookup_core::{BackgroundMood, ForecastResult, ForecastView, LookupState};

const WELCOME_TITLE: &str = "Welcome to Weather Forecast";
const WELCOME_BODY: &str = "Enter a city name to get current weather information";

/// Text for the whole widget body in its current state.
pub fn render_state(state: &LookupState, locale: Locale) -> String {
    match state {
        LookupState::Idle => format!("{WELCOME_TITLE}\n{WELCOME_BODY}\n"),
        LookupState::Loading { previous: None } => "⏳ Loading...\n".to_string(),
        LookupState::Loading { previous: Some(result) } => {
            let mut out = render_card(result, locale);
            out.push_str("↻ Refreshing...\n");
            out
        }
        LookupState::Success(result) => render_card(result, locale),
        LookupState::Failed(err) => format!("✖ {err}\n"),
    }
}

fn mood_glyph(mood: BackgroundMood) -> &'static str {
    match mood {
        BackgroundMood::Sunny => "☀",
        BackgroundMood::Night => "☾",
        BackgroundMood::Cloudy => "☁",
        BackgroundMood::Rainy => "☂",
        BackgroundMood::Snowy => "❄",
        BackgroundMood::Stormy => "⚡",
        BackgroundMood::Foggy => "≋",
        BackgroundMood::Neutral => "•",
    }
}

fn render_card(result: &ForecastResult, locale: Locale) -> String {
    let view = ForecastView::from_result(result, locale);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", mood_glyph(view.mood), view.headline);
    if !view.local_time.is_empty() {
        let _ = writeln!(out, "  {}", view.local_time);
    }
    out.push('\n');

    let _ = writeln!(out, "  {}  {}", view.temperature, view.condition);
    let _ = writeln!(out, "  {:width$}  {}", "", view.feels_like, width = view.temperature.chars().count());
    let _ = writeln!(out, "  Icon: {}", view.icon_url);
    out.push('\n');

    for detail in &view.details {
        let _ = writeln!(out, "  {:<16}{}", detail.kind.label(), detail.value);
    }

    if !view.days.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "  Outlook");
        for day in &view.days {
            let _ = write!(out, "  {:<12}{} / {}  {}", day.label, day.high, day.low, day.condition);
            if let Some(rain) = &day.chance_of_rain {
                let _ = write!(out, " ({rain} rain)");
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_core::{CurrentConditions, LookupError, model::Location};

    fn paris() -> ForecastResult {
        ForecastResult {
            location: Location {
                name: "Paris".into(),
                country: "France".into(),
                localtime: "2024-06-01 14:30".into(),
            },
            current: CurrentConditions {
                condition: "Sunny".into(),
                icon_url: "https://cdn/sunny.png".into(),
                temp_c: 21.5,
                feelslike_c: 21.0,
                wind_kph: 10.0,
                wind_dir: "NW".into(),
                humidity: 40.0,
                pressure_mb: 1013.0,
                uv: 5.0,
            },
            days: Vec::new(),
        }
    }

    #[test]
    fn idle_shows_welcome() {
        let out = render_state(&LookupState::Idle, Locale::en_US);
        assert!(out.contains(WELCOME_TITLE));
        assert!(out.contains(WELCOME_BODY));
    }

    #[test]
    fn spinner_only_without_previous_result() {
        let out = render_state(&LookupState::Loading { previous: None }, Locale::en_US);
        assert_eq!(out, "⏳ Loading...\n");

        let out = render_state(&LookupState::Loading { previous: Some(paris()) }, Locale::en_US);
        assert!(out.contains("Paris, France"));
        assert!(out.contains("Refreshing"));
    }

    #[test]
    fn card_lists_every_field() {
        let out = render_state(&LookupState::Success(paris()), Locale::en_US);

        for expected in [
            "☀ Paris, France",
            "Saturday, June 1, 2024 14:30",
            "21.5°  Sunny",
            "Feels like 21°",
            "https://cdn/sunny.png",
            "21.5°C",
            "10 km/h",
            "40%",
            "1013 mb",
            "UV Index",
            "NW",
        ] {
            assert!(out.contains(expected), "missing {expected:?} in:\n{out}");
        }
    }

    #[test]
    fn failure_shows_message_only() {
        let out = render_state(&LookupState::Failed(LookupError::EmptyQuery), Locale::en_US);
        assert_eq!(out, "✖ Please enter a city name\n");
    }
}
