//! Sight tests for noticing a target

use std::fmt;

use glam::Vec3;

use super::Pose;

/// Decides whether an observer can currently perceive a target.
pub trait SightTest: fmt::Debug {
    /// Check whether `observer` sees `target`.
    fn can_see(&self, observer: &Pose, target: &Pose) -> bool;
}

/// Obstruction query between two points, usually backed by a physics raycast.
pub trait LineCast {
    /// Check whether anything blocks the segment from `from` to `to`.
    fn is_blocked(&self, from: Vec3, to: Vec3) -> bool;
}

impl<F: Fn(Vec3, Vec3) -> bool> LineCast for F {
    fn is_blocked(&self, from: Vec3, to: Vec3) -> bool {
        self(from, to)
    }
}

/// Vision cone: a range, an optional field of view and an optional occluder.
pub struct ConeSight {
    /// Maximum sight distance (exclusive)
    pub range: f32,
    /// Maximum angle between facing and target direction, in degrees
    pub fov_degrees: Option<f32>,
    /// Obstruction test, skipped when absent
    line_cast: Option<Box<dyn LineCast>>,
}

impl ConeSight {
    /// Create a cone with the given range and field of view.
    #[must_use]
    pub fn new(range: f32, fov_degrees: f32) -> Self {
        Self {
            range,
            fov_degrees: Some(fov_degrees),
            line_cast: None,
        }
    }

    /// Range check only, ignoring facing and obstacles.
    #[must_use]
    pub fn distance_only(range: f32) -> Self {
        Self {
            range,
            fov_degrees: None,
            line_cast: None,
        }
    }

    /// Block sight wherever `line_cast` reports an obstruction.
    #[must_use]
    pub fn with_line_cast(mut self, line_cast: impl LineCast + 'static) -> Self {
        self.line_cast = Some(Box::new(line_cast));
        self
    }

    fn within_fov(&self, observer: &Pose, to_target: Vec3) -> bool {
        let Some(fov) = self.fov_degrees else {
            return true;
        };

        let forward = observer.forward.normalize_or_zero();
        let direction = to_target.normalize_or_zero();
        // Standing on the target, or facing nowhere, leaves the angle undefined
        if forward == Vec3::ZERO || direction == Vec3::ZERO {
            return true;
        }

        forward.angle_between(direction).to_degrees() < fov
    }
}

impl SightTest for ConeSight {
    fn can_see(&self, observer: &Pose, target: &Pose) -> bool {
        let to_target = target.position - observer.position;
        if to_target.length() >= self.range {
            return false;
        }
        if !self.within_fov(observer, to_target) {
            return false;
        }

        self.line_cast
            .as_ref()
            .is_none_or(|cast| !cast.is_blocked(observer.position, target.position))
    }
}

impl fmt::Debug for ConeSight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConeSight")
            .field("range", &self.range)
            .field("fov_degrees", &self.fov_degrees)
            .field("line_cast", &self.line_cast.is_some())
            .finish()
    }
}
