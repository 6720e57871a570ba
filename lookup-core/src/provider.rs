use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    config::Settings,
    error::FetchError,
    model::{ForecastRequest, ForecastResult},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// The external forecast service, reduced to the one call the widget needs.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult, FetchError>;
}

/// Construct the weatherapi.com provider from resolved settings.
pub fn provider_from_settings(settings: &Settings) -> Result<Arc<dyn ForecastProvider>, FetchError> {
    let provider = WeatherApiProvider::new(
        settings.api_key.clone(),
        settings.base_url.clone(),
        settings.timeout,
    )?;

    Ok(Arc::new(provider))
}
