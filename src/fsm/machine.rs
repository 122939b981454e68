//! The state machine controller

use std::fmt;

use rustc_hash::FxHashMap;

use super::{FsmError, State, StateId, TransitionId};

/// A finite state machine that owns its states and the current-state pointer.
///
/// States are registered once and never recreated; transitions only move the
/// pointer. Once the first state is added the machine always has a current
/// state.
///
/// # Type Parameters
///
/// - `Ctx`: Context type passed to state methods (e.g., sensors, actuators)
pub struct StateMachine<Ctx = ()> {
    /// Registered states by id
    states: FxHashMap<StateId, Box<dyn State<Ctx>>>,
    /// Id of the active state, `Null` only while `states` is empty
    current: StateId,
}

impl<Ctx> StateMachine<Ctx> {
    /// Create an empty state machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: FxHashMap::default(),
            current: StateId::Null,
        }
    }

    /// Register a state under its own id.
    ///
    /// The first state added becomes the current state.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::DuplicateState` if the id is taken, leaving the
    /// existing registration untouched, or `FsmError::NullState` for a state
    /// that reports the null id.
    pub fn add_state<S: State<Ctx> + 'static>(&mut self, state: S) -> Result<(), FsmError> {
        let id = state.id();
        if id.is_null() {
            return Err(FsmError::NullState);
        }
        if self.states.contains_key(&id) {
            return Err(FsmError::DuplicateState(id));
        }

        self.states.insert(id, Box::new(state));
        if self.current.is_null() {
            self.current = id;
        }
        Ok(())
    }

    /// Leave the current state through `transition`.
    ///
    /// Returns the id of the newly current state. On error the current state
    /// is unchanged; errors are also logged so missing edges show up during
    /// development.
    ///
    /// # Errors
    ///
    /// - `FsmError::NullTransition` for the null transition
    /// - `FsmError::NoActiveState` if no state was ever added
    /// - `FsmError::MissingTransition` if the current state has no such edge
    /// - `FsmError::DanglingTarget` if the edge leads to an unregistered state
    pub fn perform_transition(&mut self, transition: TransitionId) -> Result<StateId, FsmError> {
        let result = self.resolve(transition);
        match result {
            Ok(target) => {
                log::info!("{} --{}--> {}", self.current, transition, target);
                self.current = target;
            }
            Err(err) => log::warn!("Ignoring transition: {err}"),
        }
        result
    }

    fn resolve(&self, transition: TransitionId) -> Result<StateId, FsmError> {
        if transition.is_null() {
            return Err(FsmError::NullTransition);
        }

        let current = self.current_state().ok_or(FsmError::NoActiveState)?;
        let target = current.get_transition(transition);
        if target.is_null() {
            return Err(FsmError::MissingTransition {
                state: self.current,
                transition,
            });
        }
        if !self.states.contains_key(&target) {
            return Err(FsmError::DanglingTarget {
                state: self.current,
                transition,
                target,
            });
        }
        Ok(target)
    }

    /// The active state, `None` only before the first state is added.
    #[must_use]
    pub fn current_state(&self) -> Option<&dyn State<Ctx>> {
        self.state(self.current)
    }

    /// The active state, mutably.
    pub fn current_state_mut(&mut self) -> Option<&mut (dyn State<Ctx> + 'static)> {
        self.state_mut(self.current)
    }

    /// Id of the active state, `StateId::Null` before the first state is added.
    #[must_use]
    pub fn current_state_id(&self) -> StateId {
        self.current
    }

    /// Get the name of the current state.
    #[must_use]
    pub fn current_state_name(&self) -> &'static str {
        self.current_state()
            .map_or(StateId::Null.name(), |state| state.name())
    }

    /// Check if the FSM is in the given state.
    #[must_use]
    pub fn is_in_state(&self, id: StateId) -> bool {
        !id.is_null() && self.current == id
    }

    /// Look up a registered state.
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&dyn State<Ctx>> {
        self.states.get(&id).map(|state| state.as_ref())
    }

    /// Look up a registered state mutably.
    pub fn state_mut(&mut self, id: StateId) -> Option<&mut (dyn State<Ctx> + 'static)> {
        self.states.get_mut(&id).map(|state| state.as_mut())
    }

    /// Check if a state is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no state is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<Ctx> Default for StateMachine<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> fmt::Debug for StateMachine<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("states", &self.states.len())
            .finish()
    }
}
