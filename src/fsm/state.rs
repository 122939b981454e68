//! State trait and per-state transition tables

use std::fmt;

use smallvec::SmallVec;

use super::{FsmError, StateId, TransitionId};

// ============================================================================
// Transition Table
// ============================================================================

/// Map from transition to target state, owned by a single state.
///
/// States rarely declare more than a handful of edges, so entries live
/// inline. Keys are unique and never `TransitionId::Null`.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    entries: SmallVec<[(TransitionId, StateId); 4]>,
}

impl TransitionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transition` to lead to `target`.
    ///
    /// An existing entry for the same transition is overwritten and its old
    /// target returned.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::NullTransition` or `FsmError::NullState` if either
    /// argument is the reserved null value. The table is left untouched.
    pub fn insert(
        &mut self,
        transition: TransitionId,
        target: StateId,
    ) -> Result<Option<StateId>, FsmError> {
        if transition.is_null() {
            return Err(FsmError::NullTransition);
        }
        if target.is_null() {
            return Err(FsmError::NullState);
        }

        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == transition) {
            let previous = entry.1;
            entry.1 = target;
            return Ok(Some(previous));
        }

        self.entries.push((transition, target));
        Ok(None)
    }

    /// Target for `transition`, or `StateId::Null` if unregistered.
    #[must_use]
    pub fn get(&self, transition: TransitionId) -> StateId {
        self.entries
            .iter()
            .find(|(t, _)| *t == transition)
            .map_or(StateId::Null, |(_, target)| *target)
    }

    /// Remove `transition` if present, returning its target.
    pub fn remove(&mut self, transition: TransitionId) -> Option<StateId> {
        let index = self.entries.iter().position(|(t, _)| *t == transition)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of registered transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no transition is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(transition, target)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TransitionId, StateId)> + '_ {
        self.entries.iter().copied()
    }
}

// ============================================================================
// State Trait
// ============================================================================

/// A state in the finite state machine.
///
/// Each tick the driver calls `decide()` and then `act()` on the active
/// state. Both may ask to leave the state by returning a transition; the
/// machine looks the transition up in this state's own table.
///
/// States receive their long-lived collaborators at construction and the
/// per-tick world through `Ctx`.
pub trait State<Ctx = ()>: fmt::Debug {
    /// Identifier this state is registered under. Must never change.
    fn id(&self) -> StateId;

    /// Outward transitions declared by this state.
    fn transitions(&self) -> &TransitionTable;

    /// Mutable access to the declared transitions.
    fn transitions_mut(&mut self) -> &mut TransitionTable;

    /// Inspect the world and optionally request a transition.
    ///
    /// Only a shared borrow of the context is handed out: commanding the
    /// agent is `act()`'s job.
    fn decide(&self, ctx: &Ctx) -> Option<TransitionId>;

    /// Perform this state's behavior, optionally requesting a transition.
    fn act(&mut self, ctx: &mut Ctx) -> Option<TransitionId>;

    /// State name for debugging and logging.
    fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Register or overwrite an outward transition.
    ///
    /// # Errors
    ///
    /// See [`TransitionTable::insert`].
    fn add_transition(
        &mut self,
        transition: TransitionId,
        target: StateId,
    ) -> Result<Option<StateId>, FsmError> {
        self.transitions_mut().insert(transition, target)
    }

    /// Target for `transition`, or `StateId::Null` if unregistered.
    fn get_transition(&self, transition: TransitionId) -> StateId {
        self.transitions().get(transition)
    }

    /// Remove an outward transition. No-op if it was never registered.
    fn delete_transition(&mut self, transition: TransitionId) {
        self.transitions_mut().remove(transition);
    }
}
