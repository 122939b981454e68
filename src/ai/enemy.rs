//! Enemy agent: owns its state machine and pumps it every frame

use std::rc::Rc;

use super::{
    Actuator, ChaseState, ConeSight, DeathState, EnemyContext, Health, PatrolState, Pose,
    SightTest,
};
use crate::config::EnemyConfig;
use crate::fsm::{self, FsmError, StateId, StateMachine, Tick, TransitionId};

/// Edges of the enemy graph: Patrol <-> Chase -> Death.
const EDGES: [(StateId, TransitionId, StateId); 3] = [
    (StateId::Patrolling, TransitionId::SawPlayer, StateId::ChasingPlayer),
    (StateId::ChasingPlayer, TransitionId::LostPlayer, StateId::Patrolling),
    (StateId::ChasingPlayer, TransitionId::Dead, StateId::Death),
];

/// An enemy that patrols, chases what it sees and dies when out of health.
#[derive(Debug)]
pub struct Enemy<A> {
    fsm: StateMachine<EnemyContext<A>>,
    context: EnemyContext<A>,
    weapon_damage: i32,
}

impl<A: Actuator> Enemy<A> {
    /// Build an enemy with a vision cone taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state graph cannot be registered.
    pub fn new(config: &EnemyConfig, actuator: A) -> Result<Self, FsmError> {
        let sight = match config.fov_degrees {
            Some(fov) => ConeSight::new(config.sight_range, fov),
            None => ConeSight::distance_only(config.sight_range),
        };
        Self::with_sight(config, actuator, Rc::new(sight))
    }

    /// Build an enemy around a custom sight test (e.g. one backed by raycasts).
    ///
    /// Starts out patrolling.
    ///
    /// # Errors
    ///
    /// Returns an error if the state graph cannot be registered.
    pub fn with_sight(
        config: &EnemyConfig,
        actuator: A,
        sight: Rc<dyn SightTest>,
    ) -> Result<Self, FsmError> {
        let mut fsm: StateMachine<EnemyContext<A>> = StateMachine::new();
        fsm.add_state(PatrolState::new(
            config.waypoints.clone(),
            Rc::clone(&sight),
            config,
        ))?;
        fsm.add_state(ChaseState::new(sight, config))?;
        fsm.add_state(DeathState::new())?;

        for (from, transition, to) in EDGES {
            if let Some(state) = fsm.state_mut(from) {
                state.add_transition(transition, to)?;
            }
        }

        log::info!(
            "Enemy ready: {} waypoints, {} hp, starting in {}",
            config.waypoints.len(),
            config.health,
            fsm.current_state_name()
        );

        Ok(Self {
            fsm,
            context: EnemyContext::new(actuator, Health(config.health)),
            weapon_damage: config.weapon_damage,
        })
    }

    /// Run one frame of behavior against the target's current pose.
    pub fn tick(&mut self, target: Pose) -> Tick {
        self.context.npc = self.context.actuator.pose();
        self.context.target = target;
        fsm::tick(&mut self.fsm, &mut self.context)
    }

    /// Force a transition from outside the states.
    ///
    /// # Errors
    ///
    /// See [`StateMachine::perform_transition`]; the current state is kept on
    /// error.
    pub fn set_transition(&mut self, transition: TransitionId) -> Result<StateId, FsmError> {
        self.fsm.perform_transition(transition)
    }

    /// A weapon struck this enemy.
    pub fn on_weapon_hit(&mut self) {
        self.apply_damage(self.weapon_damage);
    }

    /// Remove hit points. Death is noticed on the next chase decision.
    pub fn apply_damage(&mut self, amount: i32) {
        self.context.health.apply_damage(amount);
        log::debug!("Enemy hit for {amount}, {} hp left", self.context.health.points());
    }

    /// Current state id.
    #[must_use]
    pub fn state(&self) -> StateId {
        self.fsm.current_state_id()
    }

    /// Check whether the enemy reached its terminal state.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.fsm.is_in_state(StateId::Death)
    }

    /// Remaining hit points.
    #[must_use]
    pub fn health(&self) -> Health {
        self.context.health
    }

    /// The underlying state machine.
    #[must_use]
    pub fn fsm(&self) -> &StateMachine<EnemyContext<A>> {
        &self.fsm
    }

    /// The body being commanded.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.context.actuator
    }

    /// The body being commanded, mutably (for the host to integrate it).
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.context.actuator
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::ai::states::tests::{Command, Recorder};

    fn config() -> EnemyConfig {
        EnemyConfig::default()
            .with_waypoints([Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)])
            .with_sight(15.0, None)
    }

    fn enemy() -> Enemy<Recorder> {
        Enemy::new(&config(), Recorder::default()).unwrap()
    }

    fn near() -> Pose {
        Pose::at(Vec3::new(6.0, 0.0, 0.0))
    }

    fn far() -> Pose {
        Pose::at(Vec3::new(100.0, 0.0, 0.0))
    }

    #[test]
    fn test_starts_patrolling() {
        let enemy = enemy();
        assert_eq!(enemy.state(), StateId::Patrolling);
        assert_eq!(enemy.fsm().len(), 3);
        assert_eq!(enemy.health(), Health(15));
    }

    #[test]
    fn test_graph_edges() {
        let enemy = enemy();
        let fsm = enemy.fsm();
        for (from, transition, to) in EDGES {
            assert_eq!(fsm.state(from).unwrap().get_transition(transition), to);
        }
        assert!(fsm.state(StateId::Death).unwrap().transitions().is_empty());
    }

    #[test]
    fn test_sighting_starts_chase() {
        let mut enemy = enemy();
        let report = enemy.tick(near());

        assert_eq!(
            report.transition,
            Some((TransitionId::SawPlayer, StateId::ChasingPlayer))
        );
        // The tick began in patrol, so patrol acted
        assert_eq!(report.state, StateId::Patrolling);
        assert!(matches!(
            enemy.actuator().commands.last(),
            Some(Command::MoveTo(_, _))
        ));

        enemy.tick(near());
        assert_eq!(
            enemy.actuator().commands.last(),
            Some(&Command::MoveTo(near().position, 4.0))
        );
    }

    #[test]
    fn test_losing_target_resumes_patrol() {
        let mut enemy = enemy();
        enemy.tick(near());
        assert_eq!(enemy.state(), StateId::ChasingPlayer);

        let report = enemy.tick(far());
        assert_eq!(
            report.transition,
            Some((TransitionId::LostPlayer, StateId::Patrolling))
        );
    }

    #[test]
    fn test_four_hits_kill_chasing_enemy() {
        let mut enemy = enemy();
        enemy.tick(near());

        for _ in 0..4 {
            enemy.on_weapon_hit();
        }
        assert_eq!(enemy.health(), Health(-5));

        let report = enemy.tick(near());
        assert_eq!(report.transition, Some((TransitionId::Dead, StateId::Death)));
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_death_is_terminal_and_animates() {
        let mut enemy = enemy();
        enemy.tick(near());
        enemy.apply_damage(100);
        enemy.tick(near());
        assert!(enemy.is_dead());

        let before = enemy.actuator().commands.len();
        for target in [near(), far(), near()] {
            let report = enemy.tick(target);
            assert!(!report.changed_state());
            assert!(enemy.is_dead());
        }

        let after = &enemy.actuator().commands[before..];
        assert_eq!(after, &[Command::PlayDeath; 3]);
    }

    #[test]
    fn test_damage_while_patrolling_waits_for_chase() {
        let mut enemy = enemy();
        enemy.apply_damage(100);

        enemy.tick(far());
        assert_eq!(enemy.state(), StateId::Patrolling);

        enemy.tick(near());
        assert_eq!(enemy.state(), StateId::ChasingPlayer);
        enemy.tick(near());
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_set_transition() {
        let mut enemy = enemy();
        assert!(enemy.set_transition(TransitionId::Dead).is_err());
        assert_eq!(enemy.state(), StateId::Patrolling);

        assert_eq!(
            enemy.set_transition(TransitionId::SawPlayer),
            Ok(StateId::ChasingPlayer)
        );
    }

    #[test]
    fn test_enemies_are_independent() {
        let mut first = enemy();
        let mut second = enemy();

        first.tick(near());
        second.tick(far());

        assert_eq!(first.state(), StateId::ChasingPlayer);
        assert_eq!(second.state(), StateId::Patrolling);
    }
}
