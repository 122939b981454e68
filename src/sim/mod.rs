//! Headless simulation host
//!
//! Plays the role of the game engine around the enemy AI: bodies that follow
//! movement commands, weapon contacts delivered as events, and a per-frame
//! step that ticks every enemy.

mod arena;
mod body;
mod events;

pub use arena::Arena;
pub use body::KinematicBody;
pub use events::{AgentId, ArenaEvent, EventQueue};
