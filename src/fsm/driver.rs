//! Per-tick pump: decide, then act, on the active state

use super::{StateId, StateMachine, TransitionId};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// State whose `decide()` and `act()` ran, `Null` for an empty machine
    pub state: StateId,
    /// Transition applied this tick and the state it entered
    pub transition: Option<(TransitionId, StateId)>,
}

impl Tick {
    /// Check whether the tick moved the machine to another state.
    #[must_use]
    pub fn changed_state(&self) -> bool {
        self.transition.is_some()
    }
}

/// Run one decide pass and one act pass.
///
/// The active state is read once at the start of the tick and both passes
/// run against it, even when `decide()` already moved the machine on. At
/// most one transition is applied per tick: a request from `act()` is only
/// honoured when `decide()` applied none.
///
/// Transition errors are logged by the machine and otherwise ignored, so a
/// misconfigured edge leaves the agent in its current state.
pub fn tick<Ctx>(fsm: &mut StateMachine<Ctx>, ctx: &mut Ctx) -> Tick {
    let active = fsm.current_state_id();
    let mut report = Tick {
        state: active,
        transition: None,
    };

    let Some(state) = fsm.state(active) else {
        return report;
    };

    if let Some(request) = state.decide(ctx) {
        if let Ok(target) = fsm.perform_transition(request) {
            report.transition = Some((request, target));
        }
    }

    let Some(state) = fsm.state_mut(active) else {
        return report;
    };

    if let Some(request) = state.act(ctx) {
        if report.transition.is_some() {
            log::debug!("{active}: dropping {request} requested by act, already transitioned");
        } else if let Ok(target) = fsm.perform_transition(request) {
            report.transition = Some((request, target));
        }
    }

    report
}
