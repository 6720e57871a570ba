//! Lookup controller - owns the model, runs effects on tokio tasks

use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::action::Action;
use crate::effect::Effect;
use crate::model::ForecastRequest;
use crate::provider::ForecastProvider;
use crate::reducer::reducer;
use crate::state::{LookupModel, LookupState, RequestToken};

/// Receiving end for provider outcomes. Feed each one back with
/// [`LookupController::dispatch`].
#[derive(Debug)]
pub struct Outcomes {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Outcomes {
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }
}

/// Drives one lookup widget.
///
/// All mutation goes through [`dispatch`](Self::dispatch). A new fetch aborts
/// the one it supersedes, and responses carry a token so a late answer from an
/// older request is never applied.
#[derive(Debug)]
pub struct LookupController {
    provider: Arc<dyn ForecastProvider>,
    model: LookupModel,
    in_flight: Option<JoinHandle<()>>,
    outcomes_tx: mpsc::UnboundedSender<Action>,
    state_tx: watch::Sender<LookupState>,
}

impl LookupController {
    pub fn new(provider: Arc<dyn ForecastProvider>, forecast_days: u8) -> (Self, Outcomes) {
        let (outcomes_tx, rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(LookupState::Idle);

        let controller = Self {
            provider,
            model: LookupModel::new(forecast_days),
            in_flight: None,
            outcomes_tx,
            state_tx,
        };

        (controller, Outcomes { rx })
    }

    pub fn query(&self) -> &str {
        &self.model.query
    }

    pub fn state(&self) -> &LookupState {
        &self.model.state
    }

    /// Observe every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state_tx.subscribe()
    }

    pub fn update_query(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Action::QueryChanged(text.into()))
    }

    pub fn submit(&mut self) -> bool {
        self.dispatch(Action::Submit)
    }

    /// Run the reducer, then its effects. Returns whether the state changed.
    ///
    /// Must be called from within a tokio runtime when the action can start a fetch.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = reducer(&mut self.model, action);

        for effect in result.effects {
            self.run_effect(effect);
        }

        if result.changed {
            self.state_tx.send_replace(self.model.state.clone());
        }

        result.changed
    }

    /// Apply outcomes until no request is pending.
    pub async fn resolve(&mut self, outcomes: &mut Outcomes) {
        while self.model.pending.is_some() {
            match outcomes.recv().await {
                Some(action) => {
                    self.dispatch(action);
                }
                None => break,
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchForecast { token, request } => {
                self.cancel_in_flight();
                self.in_flight = Some(self.spawn_fetch(token, request));
            }
            Effect::CancelFetch => self.cancel_in_flight(),
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::debug!("cancelling superseded forecast request");
            }
            handle.abort();
        }
    }

    fn spawn_fetch(&self, token: RequestToken, request: ForecastRequest) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let tx = self.outcomes_tx.clone();

        tokio::spawn(async move {
            let action = match provider.fetch_forecast(&request).await {
                Ok(result) => {
                    tracing::info!(
                        query = %request.query,
                        location = %result.location.name,
                        "forecast loaded"
                    );
                    Action::ForecastLoaded { token, result }
                }
                Err(e) => {
                    tracing::warn!(query = %request.query, error = %e, "forecast fetch failed");
                    Action::ForecastFailed { token }
                }
            };
            // Receiver gone means the widget was torn down.
            let _ = tx.send(action);
        })
    }
}

impl Drop for LookupController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
