//! Timer subscriptions
//!
//! Long-lived action sources: the spinner tick, the clock and the optional
//! auto-refresh interval.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::Action;

pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SubKey {
    Spinner,
    Clock,
    Refresh,
}

/// Manages subscriptions that continuously emit actions.
pub struct Subscriptions {
    handles: HashMap<SubKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Subscriptions {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Spinner, clock and (if `refresh` is set) auto-refresh.
    pub fn standard(action_tx: mpsc::UnboundedSender<Action>, refresh: Option<Duration>) -> Self {
        let mut subs = Self::new(action_tx);
        subs.interval(SubKey::Spinner, SPINNER_INTERVAL, || Action::Tick);
        subs.interval_immediate(SubKey::Clock, CLOCK_INTERVAL, || {
            Action::ClockTick(Local::now())
        });
        if let Some(every) = refresh {
            subs.interval(SubKey::Refresh, every, || Action::WeatherRefresh);
        }
        subs
    }

    /// Emit an action every `duration`, first one after one period.
    ///
    /// Replaces any subscription under the same key.
    pub fn interval<F>(&mut self, key: SubKey, duration: Duration, action_fn: F) -> &mut Self
    where
        F: Fn() -> Action + Send + 'static,
    {
        self.start(key, duration, true, action_fn)
    }

    /// Like [`Subscriptions::interval`] but emits right away.
    pub fn interval_immediate<F>(
        &mut self,
        key: SubKey,
        duration: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> Action + Send + 'static,
    {
        self.start(key, duration, false, action_fn)
    }

    fn start<F>(&mut self, key: SubKey, duration: Duration, skip_first: bool, action_fn: F) -> &mut Self
    where
        F: Fn() -> Action + Send + 'static,
    {
        self.cancel(key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(duration);
            if skip_first {
                // the first tick completes immediately
                interval.tick().await;
            }

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    // channel closed
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    pub fn cancel(&mut self, key: SubKey) {
        if let Some(handle) = self.handles.remove(&key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_active(&self, key: SubKey) -> bool {
        self.handles.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
