//! Finite State Machine for AI Behavior
//!
//! A machine owns a fixed set of states, each registered once under its
//! `StateId`. Every state declares its own outward edges as a table from
//! `TransitionId` to target `StateId`, and the machine only ever moves its
//! current-state pointer along those edges.
//!
//! # Example
//!
//! ```ignore
//! let mut patrol = PatrolState::new(waypoints, sight.clone(), &config);
//! patrol.add_transition(TransitionId::SawPlayer, StateId::ChasingPlayer)?;
//!
//! let mut fsm = StateMachine::new();
//! fsm.add_state(patrol)?; // first state becomes current
//! fsm.add_state(chase)?;
//!
//! // Each frame
//! let report = fsm::tick(&mut fsm, &mut ctx);
//! ```

mod driver;
mod error;
mod ids;
mod machine;
mod state;

pub use driver::{Tick, tick};
pub use error::FsmError;
pub use ids::{StateId, TransitionId};
pub use machine::StateMachine;
pub use state::{State, TransitionTable};
