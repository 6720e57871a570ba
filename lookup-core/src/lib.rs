//! Core library for the weather lookup widget.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The forecast provider contract and its weatherapi.com client
//! - The lookup state machine (reducer + controller)
//! - Presentation mapping for the result card
//!
//! It is used by `lookup-cli`, but any front end can drive a [`LookupController`].

pub mod action;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use config::{Config, Settings};
pub use controller::{LookupController, Outcomes};
pub use error::{ConfigError, FetchError, LookupError};
pub use model::{CurrentConditions, ForecastDay, ForecastRequest, ForecastResult, Location};
pub use presentation::{BackgroundMood, ForecastView, format_timestamp};
pub use provider::{ForecastProvider, WeatherApiProvider, provider_from_settings};
pub use state::LookupState;
