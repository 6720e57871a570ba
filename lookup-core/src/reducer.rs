//! Reducer - pure function: (model, action) -> DispatchResult

use crate::action::Action;
use crate::effect::Effect;
use crate::error::LookupError;
use crate::model::ForecastRequest;
use crate::state::{LookupModel, LookupState, RequestToken};

/// Outcome of one reducer step: whether observers should re-render, and the
/// side effects to run.
#[derive(Debug, Default, PartialEq)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self { changed: true, effects: Vec::new() }
    }

    pub fn changed_with(effect: Effect) -> Self {
        Self { changed: true, effects: vec![effect] }
    }
}

/// The reducer handles all state transitions
pub fn reducer(model: &mut LookupModel, action: Action) -> DispatchResult {
    match action {
        Action::QueryChanged(text) => {
            let clears_error = !text.is_empty() && matches!(model.state, LookupState::Failed(_));
            if text == model.query && !clears_error {
                return DispatchResult::unchanged();
            }
            model.query = text;
            if clears_error {
                model.state = LookupState::Idle;
            }
            DispatchResult::changed()
        }

        Action::Submit => {
            let query = model.query.trim();
            if query.is_empty() {
                model.state = LookupState::Failed(LookupError::EmptyQuery);
                return match model.pending.take() {
                    Some(_) => DispatchResult::changed_with(Effect::CancelFetch),
                    None => DispatchResult::changed(),
                };
            }

            let request = ForecastRequest::new(query, model.forecast_days);
            let previous = model.state.result().cloned();
            let token = next_token(model);

            model.state = LookupState::Loading { previous };
            model.pending = Some(token);
            DispatchResult::changed_with(Effect::FetchForecast { token, request })
        }

        Action::ForecastLoaded { token, result } => {
            if !take_pending(model, token) {
                return DispatchResult::unchanged();
            }
            model.state = LookupState::Success(result);
            DispatchResult::changed()
        }

        Action::ForecastFailed { token } => {
            if !take_pending(model, token) {
                return DispatchResult::unchanged();
            }
            model.state = LookupState::Failed(LookupError::FetchFailure);
            DispatchResult::changed()
        }
    }
}

fn next_token(model: &mut LookupModel) -> RequestToken {
    let token = model.next_token;
    model.next_token = model.next_token.wrapping_add(1);
    token
}

/// Clears `pending` when `token` is the request we are waiting for.
fn take_pending(model: &mut LookupModel, token: RequestToken) -> bool {
    if model.pending == Some(token) {
        model.pending = None;
        true
    } else {
        tracing::debug!(token, pending = ?model.pending, "discarding superseded forecast response");
        false
    }
}
