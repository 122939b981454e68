//! Enemy AI module
//!
//! Provides the patrol, chase and death states, the sight tests they rely on,
//! and the `Enemy` agent that wires them into a state machine.

mod body;
mod enemy;
mod senses;
mod states;

pub use body::{Actuator, EnemyContext, Health, Pose};
pub use enemy::Enemy;
pub use senses::{ConeSight, LineCast, SightTest};
pub use states::{ChaseState, DeathState, PatrolState};
