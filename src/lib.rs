//! Finite state machines for non-player characters
//!
//! This crate provides:
//! - A generic state machine with per-state transition tables
//! - A per-tick driver running decide and act passes
//! - Patrol, chase and death states for a simple enemy
//! - A headless arena for running encounters without an engine

pub mod ai;
pub mod config;
pub mod fsm;
pub mod sim;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{Actuator, ConeSight, Enemy, EnemyContext, Health, Pose, SightTest};
    pub use crate::config::{ConfigError, EnemyConfig};
    pub use crate::fsm::{FsmError, State, StateId, StateMachine, Tick, TransitionId};
    pub use crate::sim::{AgentId, Arena, ArenaEvent, KinematicBody};
    pub use glam::Vec3;
}
