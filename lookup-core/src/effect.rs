//! Effects - side effects declared by the reducer

use crate::model::ForecastRequest;
use crate::state::RequestToken;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch a forecast, replacing any request still in flight
    FetchForecast { token: RequestToken, request: ForecastRequest },
    /// Drop the in-flight request, if any
    CancelFetch,
}
