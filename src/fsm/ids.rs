//! Identifiers for states and transitions

use std::fmt;

/// Reason for leaving a state.
///
/// `Null` stands for "no transition" and is rejected everywhere a real
/// transition is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionId {
    /// Non-existing transition
    Null,
    /// The tracked target came into sight
    SawPlayer,
    /// The tracked target is no longer in sight
    LostPlayer,
    /// Health ran out
    Dead,
}

impl TransitionId {
    /// Every non-null transition.
    pub const ALL: [Self; 3] = [Self::SawPlayer, Self::LostPlayer, Self::Dead];

    /// Check for the reserved null value.
    #[must_use]
    pub fn is_null(self) -> bool {
        self == Self::Null
    }

    /// Name for logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "NullTransition",
            Self::SawPlayer => "SawPlayer",
            Self::LostPlayer => "LostPlayer",
            Self::Dead => "Dead",
        }
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a registered state.
///
/// `Null` stands for "no such state".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Non-existing state
    Null,
    /// Walking the waypoint loop
    Patrolling,
    /// Pursuing and attacking the target
    ChasingPlayer,
    /// Terminal state
    Death,
}

impl StateId {
    /// Every non-null state.
    pub const ALL: [Self; 3] = [Self::Patrolling, Self::ChasingPlayer, Self::Death];

    /// Check for the reserved null value.
    #[must_use]
    pub fn is_null(self) -> bool {
        self == Self::Null
    }

    /// Name for logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "NullStateID",
            Self::Patrolling => "Patrolling",
            Self::ChasingPlayer => "ChasingPlayer",
            Self::Death => "Death",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_values() {
        assert!(TransitionId::Null.is_null());
        assert!(StateId::Null.is_null());
        assert!(TransitionId::ALL.iter().all(|t| !t.is_null()));
        assert!(StateId::ALL.iter().all(|s| !s.is_null()));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TransitionId::SawPlayer.to_string(), "SawPlayer");
        assert_eq!(StateId::ChasingPlayer.to_string(), "ChasingPlayer");
    }
}
