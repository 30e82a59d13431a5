//! Controller: store + effect execution + action channel
//!
//! Owns the [`Store`] and turns declared effects into keyed tokio tasks.
//! Task results come back as `*Did*` actions on the action channel and are
//! dispatched like any other action.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::api::{FetchError, WeatherApi};
use crate::effect::Effect;
use crate::geo::Geolocator;
use crate::location::LocationQuery;
use crate::state::AppState;
use crate::store::Store;
use crate::tasks::{TaskKey, TaskManager};

/// Runs effects against the injected capabilities
pub struct EffectExecutor {
    api: Arc<dyn WeatherApi>,
    geo: Arc<dyn Geolocator>,
    tasks: TaskManager,
}

impl EffectExecutor {
    pub fn new(
        api: Arc<dyn WeatherApi>,
        geo: Arc<dyn Geolocator>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            api,
            geo,
            tasks: TaskManager::new(action_tx),
        }
    }

    pub fn execute(&mut self, effect: Effect) {
        let key = TaskKey::from(&effect);
        match effect {
            Effect::Locate { request } => {
                let geo = Arc::clone(&self.geo);
                self.tasks.spawn(key, async move {
                    match geo.locate().await {
                        Ok(coords) => Action::GeoDidLocate { request, coords },
                        Err(error) => Action::GeoDidFail { request, error },
                    }
                });
            }

            Effect::FetchCurrent {
                request,
                query,
                unit,
            } => {
                let api = Arc::clone(&self.api);
                self.tasks.spawn(key, async move {
                    let result = match &query {
                        LocationQuery::Coordinates(coords) => {
                            api.current_by_coordinates(*coords, unit).await
                        }
                        LocationQuery::City(name) => api.current_by_city(name, unit).await,
                    };
                    match result {
                        Ok(snapshot) => Action::WeatherDidLoad { request, snapshot },
                        Err(e) => {
                            debug!(%request, %query, error = %e, "current weather request failed");
                            Action::WeatherDidError {
                                request,
                                error: FetchError::from(e),
                            }
                        }
                    }
                });
            }

            Effect::FetchForecast {
                request,
                coords,
                unit,
            } => {
                let api = Arc::clone(&self.api);
                self.tasks.spawn(key, async move {
                    match api.daily_forecast(coords, unit).await {
                        Ok(entries) => Action::ForecastDidLoad { request, entries },
                        Err(e) => {
                            debug!(%request, %coords, error = %e, "forecast request failed");
                            Action::ForecastDidError {
                                request,
                                error: FetchError::from(e),
                            }
                        }
                    }
                });
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.tasks.cancel_all();
    }
}

/// The weather fetch coordinator as a running unit
pub struct WeatherController {
    store: Store,
    executor: EffectExecutor,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl WeatherController {
    pub fn new(state: AppState, api: Arc<dyn WeatherApi>, geo: Arc<dyn Geolocator>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(state),
            executor: EffectExecutor::new(api, geo, action_tx.clone()),
            action_tx,
            action_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Sender for subscriptions and other action sources
    pub fn action_tx(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Dispatch an action and start its effects. Returns whether the state
    /// changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.executor.execute(effect);
        }
        result.changed
    }

    /// Next action from tasks or subscriptions
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Process incoming actions until no request is outstanding
    pub async fn settle(&mut self) {
        while self.has_outstanding() {
            match self.action_rx.recv().await {
                Some(action) => {
                    self.dispatch(action);
                }
                None => break,
            }
        }
    }

    fn has_outstanding(&self) -> bool {
        let requests = &self.state().requests;
        requests.locate.is_some() || requests.current.is_some() || requests.forecast.is_some()
    }

    pub fn shutdown(&mut self) {
        info!("cancelling outstanding requests");
        self.executor.cancel_all();
    }
}
