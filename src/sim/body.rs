//! Kinematic stand-in for an animated character body

use glam::Vec3;

use crate::ai::{Actuator, Pose};

/// Body that slides straight toward its commanded destination.
///
/// Stops moving when attacking and for good once the death animation plays.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pose: Pose,
    /// Destination and speed of the last movement command
    destination: Option<(Vec3, f32)>,
    attacks: u32,
    death_plays: u32,
    dead: bool,
}

impl KinematicBody {
    /// Create a body standing at `position`.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            pose: Pose::at(position),
            destination: None,
            attacks: 0,
            death_plays: 0,
            dead: false,
        }
    }

    /// Advance the body by `dt` seconds toward its destination.
    pub fn integrate(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        let Some((destination, speed)) = self.destination else {
            return;
        };

        let to_destination = destination - self.pose.position;
        let distance = to_destination.length();
        let step = speed * dt;

        let direction = to_destination.normalize_or_zero();
        if direction != Vec3::ZERO {
            self.pose.forward = direction;
        }

        if step >= distance {
            self.pose.position = destination;
            self.destination = None;
        } else {
            self.pose.position += direction * step;
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Number of attacks triggered so far.
    #[must_use]
    pub fn attacks(&self) -> u32 {
        self.attacks
    }

    /// Number of times the death animation was requested.
    #[must_use]
    pub fn death_plays(&self) -> u32 {
        self.death_plays
    }
}

impl Actuator for KinematicBody {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn move_to(&mut self, destination: Vec3, speed: f32) {
        self.destination = Some((destination, speed));
    }

    fn attack(&mut self) {
        self.destination = None;
        self.attacks += 1;
    }

    fn play_death(&mut self) {
        self.destination = None;
        self.dead = true;
        self.death_plays += 1;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
