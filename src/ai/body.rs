//! What an enemy can sense and command each tick

use glam::Vec3;

/// Position and facing of an agent or its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world space
    pub position: Vec3,
    /// Facing direction, not necessarily normalized
    pub forward: Vec3,
}

impl Pose {
    /// Create a pose at `position` facing `forward`.
    #[must_use]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Create a pose facing negative Z.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::NEG_Z)
    }

    /// Distance between two poses.
    #[must_use]
    pub fn distance(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Movement and animation sink driven by the enemy's states.
///
/// Implemented by the host (animation controller, character body, ...).
pub trait Actuator {
    /// Current pose of the body.
    fn pose(&self) -> Pose;

    /// Head for `destination` at `speed` units per second.
    fn move_to(&mut self, destination: Vec3, speed: f32);

    /// Trigger an attack.
    fn attack(&mut self);

    /// Play the death animation. Called every tick once dead.
    fn play_death(&mut self);

    /// Whether the death animation has started.
    fn is_dead(&self) -> bool;
}

/// Integer hit points, as counted by weapon contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

impl Health {
    /// Current hit points.
    #[must_use]
    pub fn points(self) -> i32 {
        self.0
    }

    /// Subtract `amount` hit points. Health may go negative.
    pub fn apply_damage(&mut self, amount: i32) {
        self.0 = self.0.saturating_sub(amount);
    }

    /// Dead once health drops below zero; exactly zero is still alive.
    #[must_use]
    pub fn is_depleted(self) -> bool {
        self.0 < 0
    }
}

/// Per-agent world handed to the enemy states.
#[derive(Debug)]
pub struct EnemyContext<A> {
    /// The enemy's own pose, refreshed from the actuator each tick
    pub npc: Pose,
    /// The tracked target's pose, refreshed by the driver each tick
    pub target: Pose,
    /// Remaining hit points
    pub health: Health,
    /// Body the states command
    pub actuator: A,
}

impl<A: Actuator> EnemyContext<A> {
    /// Create a context around an actuator.
    pub fn new(actuator: A, health: Health) -> Self {
        let npc = actuator.pose();
        Self {
            npc,
            target: npc,
            health,
            actuator,
        }
    }

    /// Distance from the enemy to its target.
    #[must_use]
    pub fn target_distance(&self) -> f32 {
        self.npc.distance(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_depletes_below_zero() {
        let mut health = Health(15);
        for _ in 0..3 {
            health.apply_damage(5);
        }
        assert_eq!(health.points(), 0);
        assert!(!health.is_depleted());

        health.apply_damage(5);
        assert_eq!(health.points(), -5);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_health_saturates() {
        let mut health = Health(i32::MIN + 1);
        health.apply_damage(10);
        assert_eq!(health.points(), i32::MIN);
    }

    #[test]
    fn test_pose_distance() {
        let a = Pose::at(Vec3::ZERO);
        let b = Pose::at(Vec3::new(3.0, 4.0, 0.0));
        assert!((a.distance(&b) - 5.0).abs() < 0.001);
    }
}
