//! Effect-aware state store
//!
//! The reducer returns a [`DispatchResult`]: whether the state changed (so
//! the view re-renders) plus any effects to execute.

use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::state::AppState;

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Owns [`AppState`]; the only way to change it is [`Store::dispatch`].
#[derive(Debug)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the reducer and log the transition
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        let noisy = action.is_noisy();
        if !noisy {
            debug!(action = %action.summary(), "dispatch");
        }
        let before = self.state.phase;
        let result = reducer(&mut self.state, action);
        if before != self.state.phase {
            debug!(from = ?before, to = ?self.state.phase, "phase transition");
        }
        if !noisy && result.has_effects() {
            debug!(effects = ?result.effects, "effects declared");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<Effect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r: DispatchResult<Effect> = DispatchResult::changed();
        assert!(r.changed);
        assert!(r.effects.is_empty());
    }

    #[test]
    fn test_store_dispatch_runs_reducer() {
        let mut store = Store::new(AppState::default());
        let result = store.dispatch(Action::AppInit);

        assert!(result.changed);
        assert_eq!(result.effects.len(), 1);
        assert_eq!(store.state().phase, Phase::LocatingUser);
    }
}
