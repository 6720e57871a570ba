//! Lookup state - single source of truth for what the view renders

use crate::error::LookupError;
use crate::model::{DEFAULT_FORECAST_DAYS, ForecastResult};

/// Lifecycle of one lookup: Idle → Loading → Success/Failed.
///
/// Replaced wholesale on every transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LookupState {
    #[default]
    Idle,

    /// A request is in flight. `previous` keeps the last successful result on
    /// screen until the new one replaces it.
    Loading { previous: Option<ForecastResult> },

    Success(ForecastResult),

    Failed(LookupError),
}

impl LookupState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LookupState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }

    /// The result worth showing right now, if any (stale while loading).
    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            LookupState::Success(result) => Some(result),
            LookupState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<LookupError> {
        match self {
            LookupState::Failed(err) => Some(*err),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(|err| err.to_string())
    }
}

/// Monotonic id attached to each provider request.
pub type RequestToken = u64;

/// Everything the controller owns: the query text plus the lookup state.
#[derive(Clone, Debug)]
pub struct LookupModel {
    /// Raw text as typed; trimmed only on submit.
    pub query: String,

    pub state: LookupState,

    /// Token handed to the next request.
    pub next_token: RequestToken,

    /// Token of the only request whose response will be applied.
    pub pending: Option<RequestToken>,

    /// Forecast horizon sent with every request.
    pub forecast_days: u8,
}

impl LookupModel {
    pub fn new(forecast_days: u8) -> Self {
        Self {
            query: String::new(),
            state: LookupState::Idle,
            next_token: 0,
            pending: None,
            forecast_days,
        }
    }
}

impl Default for LookupModel {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_DAYS)
    }
}
