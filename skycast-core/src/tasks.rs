//! Keyed async task lifecycle
//!
//! One task per [`TaskKey`]: spawning a new fetch for a stream aborts the
//! one still running. Completed tasks send their result action back over
//! the action channel; aborted tasks send nothing.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;

/// Request stream a task belongs to
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskKey {
    Locate,
    Current,
    Forecast,
}

impl TaskKey {
    pub fn name(self) -> &'static str {
        match self {
            TaskKey::Locate => "locate",
            TaskKey::Current => "current",
            TaskKey::Forecast => "forecast",
        }
    }
}

impl From<&Effect> for TaskKey {
    fn from(effect: &Effect) -> Self {
        match effect {
            Effect::Locate { .. } => TaskKey::Locate,
            Effect::FetchCurrent { .. } => TaskKey::Current,
            Effect::FetchForecast { .. } => TaskKey::Forecast,
        }
    }
}

/// Manages running fetch tasks by key.
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// The action the future resolves to is sent to the action channel.
    pub fn spawn<F>(&mut self, key: TaskKey, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.cancel(key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key. No-op if nothing runs under it.
    pub fn cancel(&mut self, key: TaskKey) {
        if let Some(handle) = self.tasks.remove(&key) {
            if !handle.is_finished() {
                debug!(task = key.name(), "aborting superseded task");
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task under `key` is registered and has not finished
    pub fn is_running(&self, key: TaskKey) -> bool {
        self.tasks.get(&key).is_some_and(|h| !h.is_finished())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
