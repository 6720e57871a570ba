//! Actions - the only way the lookup state changes

use crate::model::ForecastResult;
use crate::state::RequestToken;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Query text changed (every keystroke / line)
    QueryChanged(String),

    /// Intent: look up the current query (may trigger a fetch)
    Submit,

    /// Result: provider answered for `token`
    ForecastLoaded { token: RequestToken, result: ForecastResult },

    /// Result: provider failed for `token` (cause already logged)
    ForecastFailed { token: RequestToken },
}
