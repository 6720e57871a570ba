use thiserror::Error;

/// Provider-side failure. Logged for operators, never shown to the user verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to forecast provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("forecast provider returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("failed to decode forecast payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two error kinds a user can ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("Failed to fetch weather data. Please try another location.")]
    FetchFailure,
}

/// Problems with the resolved configuration. Raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "No WeatherAPI key configured.\n\
         Hint: export WEATHERAPI_KEY or run `weather-lookup configure` and enter your API key."
    )]
    MissingApiKey,

    #[error("Unknown locale '{0}'. Use a POSIX-style name such as en_US or fr_FR.")]
    UnknownLocale(String),

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,

    #[error("forecast_days must be between 1 and 14, got {0}")]
    InvalidForecastDays(u8),
}
