//! Errors reported by the state machine

use super::{StateId, TransitionId};

/// Errors that can occur while building or driving a state machine.
///
/// None of these are fatal to a running agent: registration errors are
/// returned to the builder, transition errors leave the current state as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmError {
    /// A state with this id is already registered
    DuplicateState(StateId),
    /// The null state id was used as a state id or transition target
    NullState,
    /// The null transition was registered or performed
    NullTransition,
    /// A transition was performed before any state was added
    NoActiveState,
    /// The current state has no entry for this transition
    MissingTransition {
        /// State that was current
        state: StateId,
        /// Transition that was requested
        transition: TransitionId,
    },
    /// The transition points at a state that was never added
    DanglingTarget {
        /// State that was current
        state: StateId,
        /// Transition that was requested
        transition: TransitionId,
        /// Unregistered target
        target: StateId,
    },
}

impl std::fmt::Display for FsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateState(id) => write!(f, "state {id} is already registered"),
            Self::NullState => write!(f, "the null state id is not a valid state"),
            Self::NullTransition => write!(f, "the null transition is not allowed"),
            Self::NoActiveState => write!(f, "state machine has no states"),
            Self::MissingTransition { state, transition } => {
                write!(f, "state {state} has no transition {transition}")
            }
            Self::DanglingTarget {
                state,
                transition,
                target,
            } => write!(
                f,
                "transition {transition} of state {state} targets unregistered state {target}"
            ),
        }
    }
}

impl std::error::Error for FsmError {}
