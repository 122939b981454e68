//! Patrol, chase and death states for an enemy agent

use std::rc::Rc;

use glam::Vec3;

use super::{Actuator, EnemyContext, SightTest};
use crate::config::EnemyConfig;
use crate::fsm::{State, StateId, TransitionId, TransitionTable};

// ============================================================================
// Patrol
// ============================================================================

/// Patrol state - walking a closed loop of waypoints.
#[derive(Debug)]
pub struct PatrolState {
    /// Waypoints visited in order, wrapping around
    waypoints: Vec<Vec3>,
    /// Index of the waypoint being walked to
    current: usize,
    /// Movement speed
    speed: f32,
    /// Distance at which a waypoint counts as reached
    threshold: f32,
    sight: Rc<dyn SightTest>,
    transitions: TransitionTable,
}

impl PatrolState {
    /// Create a patrol over `waypoints`, starting at the first one.
    #[must_use]
    pub fn new(waypoints: Vec<Vec3>, sight: Rc<dyn SightTest>, config: &EnemyConfig) -> Self {
        Self {
            waypoints,
            current: 0,
            speed: config.patrol_speed,
            threshold: config.waypoint_threshold,
            sight,
            transitions: TransitionTable::new(),
        }
    }

    /// Index of the waypoint being walked to.
    #[must_use]
    pub fn current_waypoint(&self) -> usize {
        self.current
    }

    /// Position being walked to, `None` without waypoints.
    #[must_use]
    pub fn target_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }
}

impl<A: Actuator> State<EnemyContext<A>> for PatrolState {
    fn id(&self) -> StateId {
        StateId::Patrolling
    }

    fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionTable {
        &mut self.transitions
    }

    fn decide(&self, ctx: &EnemyContext<A>) -> Option<TransitionId> {
        self.sight
            .can_see(&ctx.npc, &ctx.target)
            .then_some(TransitionId::SawPlayer)
    }

    fn act(&mut self, ctx: &mut EnemyContext<A>) -> Option<TransitionId> {
        let waypoint = self.target_waypoint()?;

        if ctx.npc.position.distance(waypoint) < self.threshold {
            self.current = (self.current + 1) % self.waypoints.len();
            log::debug!("Patrol: heading to waypoint {}", self.current);
        }

        if let Some(waypoint) = self.target_waypoint() {
            ctx.actuator.move_to(waypoint, self.speed);
        }
        None
    }
}

// ============================================================================
// Chase
// ============================================================================

/// Chase state - pursuing the target and attacking once close.
#[derive(Debug)]
pub struct ChaseState {
    /// Movement speed
    speed: f32,
    /// Distance at which the chase turns into attacks
    stop_distance: f32,
    sight: Rc<dyn SightTest>,
    transitions: TransitionTable,
}

impl ChaseState {
    /// Create a chase state.
    #[must_use]
    pub fn new(sight: Rc<dyn SightTest>, config: &EnemyConfig) -> Self {
        Self {
            speed: config.chase_speed,
            stop_distance: config.stop_distance,
            sight,
            transitions: TransitionTable::new(),
        }
    }
}

impl<A: Actuator> State<EnemyContext<A>> for ChaseState {
    fn id(&self) -> StateId {
        StateId::ChasingPlayer
    }

    fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionTable {
        &mut self.transitions
    }

    fn decide(&self, ctx: &EnemyContext<A>) -> Option<TransitionId> {
        let lost_target = !self.sight.can_see(&ctx.npc, &ctx.target);
        let dead = ctx.health.is_depleted();

        // Death wins when both fire in the same tick
        if dead {
            log::info!("Chase: health at {}, dying", ctx.health.points());
            Some(TransitionId::Dead)
        } else if lost_target {
            Some(TransitionId::LostPlayer)
        } else {
            None
        }
    }

    fn act(&mut self, ctx: &mut EnemyContext<A>) -> Option<TransitionId> {
        if ctx.actuator.is_dead() {
            return None;
        }

        if ctx.target_distance() > self.stop_distance {
            ctx.actuator.move_to(ctx.target.position, self.speed);
        } else {
            ctx.actuator.attack();
        }
        None
    }
}

// ============================================================================
// Death
// ============================================================================

/// Death state - terminal, keeps the death animation playing.
#[derive(Debug, Default)]
pub struct DeathState {
    transitions: TransitionTable,
}

impl DeathState {
    /// Create a death state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Actuator> State<EnemyContext<A>> for DeathState {
    fn id(&self) -> StateId {
        StateId::Death
    }

    fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    fn transitions_mut(&mut self) -> &mut TransitionTable {
        &mut self.transitions
    }

    fn decide(&self, _ctx: &EnemyContext<A>) -> Option<TransitionId> {
        None
    }

    fn act(&mut self, ctx: &mut EnemyContext<A>) -> Option<TransitionId> {
        ctx.actuator.play_death();
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::{ConeSight, Health, Pose};

    /// Command issued to a `Recorder`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) enum Command {
        MoveTo(Vec3, f32),
        Attack,
        PlayDeath,
    }

    /// Actuator that stands still and records every command.
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) pose: Pose,
        pub(crate) dead: bool,
        pub(crate) commands: Vec<Command>,
    }

    impl Actuator for Recorder {
        fn pose(&self) -> Pose {
            self.pose
        }

        fn move_to(&mut self, destination: Vec3, speed: f32) {
            self.commands.push(Command::MoveTo(destination, speed));
        }

        fn attack(&mut self) {
            self.commands.push(Command::Attack);
        }

        fn play_death(&mut self) {
            self.dead = true;
            self.commands.push(Command::PlayDeath);
        }

        fn is_dead(&self) -> bool {
            self.dead
        }
    }

    fn context(npc: Vec3, target: Vec3) -> EnemyContext<Recorder> {
        let mut ctx = EnemyContext::new(Recorder::default(), Health(15));
        ctx.npc = Pose::new(npc, Vec3::X);
        ctx.target = Pose::at(target);
        ctx
    }

    fn sight() -> Rc<dyn SightTest> {
        Rc::new(ConeSight::distance_only(20.0))
    }

    fn loop_of_three() -> Vec<Vec3> {
        vec![
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn test_patrol_sees_target() {
        let patrol = PatrolState::new(loop_of_three(), sight(), &EnemyConfig::default());

        let near = context(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        let far = context(Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0));

        assert_eq!(patrol.decide(&near), Some(TransitionId::SawPlayer));
        assert_eq!(patrol.decide(&far), None);
    }

    #[test]
    fn test_patrol_advances_and_wraps() {
        let config = EnemyConfig::default();
        let waypoints = loop_of_three();
        let mut patrol = PatrolState::new(waypoints.clone(), sight(), &config);
        let mut ctx = context(Vec3::new(0.5, 0.0, 0.0), Vec3::splat(100.0));

        // Within threshold of W0: target becomes W1
        patrol.act(&mut ctx);
        assert_eq!(patrol.current_waypoint(), 1);
        assert_eq!(
            ctx.actuator.commands.last(),
            Some(&Command::MoveTo(waypoints[1], config.patrol_speed))
        );

        ctx.npc.position = waypoints[1];
        patrol.act(&mut ctx);
        assert_eq!(patrol.current_waypoint(), 2);

        // Past W2 the loop wraps to W0
        ctx.npc.position = waypoints[2] + Vec3::new(0.0, 0.0, 1.5);
        patrol.act(&mut ctx);
        assert_eq!(patrol.current_waypoint(), 0);
        assert_eq!(patrol.target_waypoint(), Some(waypoints[0]));
    }

    #[test]
    fn test_patrol_keeps_waypoint_until_reached() {
        let config = EnemyConfig::default();
        let mut patrol = PatrolState::new(loop_of_three(), sight(), &config);
        let mut ctx = context(Vec3::new(5.0, 0.0, 5.0), Vec3::splat(100.0));

        patrol.act(&mut ctx);
        patrol.act(&mut ctx);

        assert_eq!(patrol.current_waypoint(), 0);
        assert_eq!(
            ctx.actuator.commands,
            vec![
                Command::MoveTo(Vec3::ZERO, config.patrol_speed),
                Command::MoveTo(Vec3::ZERO, config.patrol_speed),
            ]
        );
    }

    #[test]
    fn test_patrol_without_waypoints_is_idle() {
        let mut patrol = PatrolState::new(Vec::new(), sight(), &EnemyConfig::default());
        let mut ctx = context(Vec3::ZERO, Vec3::splat(100.0));

        assert_eq!(
            <PatrolState as State<EnemyContext<Recorder>>>::act(&mut patrol, &mut ctx),
            None
        );
        assert!(ctx.actuator.commands.is_empty());
        assert_eq!(patrol.target_waypoint(), None);
    }

    #[test]
    fn test_chase_loses_target() {
        let chase = ChaseState::new(sight(), &EnemyConfig::default());
        let ctx = context(Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(chase.decide(&ctx), Some(TransitionId::LostPlayer));
    }

    #[test]
    fn test_chase_keeps_visible_target() {
        let chase = ChaseState::new(sight(), &EnemyConfig::default());
        let ctx = context(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(chase.decide(&ctx), None);
    }

    #[test]
    fn test_chase_dies_on_negative_health() {
        let chase = ChaseState::new(sight(), &EnemyConfig::default());

        let mut ctx = context(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        ctx.health = Health(0);
        assert_eq!(chase.decide(&ctx), None);

        ctx.health = Health(-1);
        assert_eq!(chase.decide(&ctx), Some(TransitionId::Dead));

        // Out of sight as well: death still wins
        ctx.target = Pose::at(Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(chase.decide(&ctx), Some(TransitionId::Dead));
    }

    #[test]
    fn test_chase_moves_then_attacks() {
        let config = EnemyConfig::default();
        let mut chase = ChaseState::new(sight(), &config);
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut ctx = context(Vec3::ZERO, target);

        chase.act(&mut ctx);
        ctx.npc.position = Vec3::new(7.0, 0.0, 0.0);
        chase.act(&mut ctx);

        assert_eq!(
            ctx.actuator.commands,
            vec![Command::MoveTo(target, config.chase_speed), Command::Attack]
        );
    }

    #[test]
    fn test_chase_idle_once_dead_animation_started() {
        let mut chase = ChaseState::new(sight(), &EnemyConfig::default());
        let mut ctx = context(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        ctx.actuator.dead = true;

        chase.act(&mut ctx);
        assert!(ctx.actuator.commands.is_empty());
    }

    #[test]
    fn test_death_is_idempotent() {
        let mut death = DeathState::new();
        let mut ctx = context(Vec3::ZERO, Vec3::ZERO);
        ctx.health = Health(-5);

        for _ in 0..3 {
            assert_eq!(death.decide(&ctx), None);
            assert_eq!(death.act(&mut ctx), None);
        }

        assert_eq!(ctx.actuator.commands, vec![Command::PlayDeath; 3]);
    }
}
