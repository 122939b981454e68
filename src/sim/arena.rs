//! Headless arena: one player, any number of independent enemies

use glam::Vec3;

use super::{AgentId, ArenaEvent, EventQueue, KinematicBody};
use crate::ai::{Enemy, Pose};
use crate::config::EnemyConfig;
use crate::fsm::FsmError;

/// A player and the enemies hunting them.
#[derive(Debug)]
pub struct Arena {
    /// Player pose, moved by the host
    pub player: Pose,
    enemies: Vec<Enemy<KinematicBody>>,
    events: EventQueue,
    frame: u64,
}

impl Arena {
    /// Create an empty arena with the player at `player`.
    #[must_use]
    pub fn new(player: Vec3) -> Self {
        Self {
            player: Pose::at(player),
            enemies: Vec::new(),
            events: EventQueue::new(),
            frame: 0,
        }
    }

    /// Add an enemy standing at `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if the enemy's state graph cannot be built.
    pub fn spawn(&mut self, config: &EnemyConfig, position: Vec3) -> Result<AgentId, FsmError> {
        let enemy = Enemy::new(config, KinematicBody::new(position))?;
        let id = AgentId(self.enemies.len());
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Report a weapon contact on `victim`, applied at the next step.
    pub fn weapon_hit(&mut self, victim: AgentId) {
        self.events.push(ArenaEvent::WeaponHit { victim });
    }

    /// Swing the player's weapon, hitting every living enemy within `reach`.
    ///
    /// Returns how many enemies were struck.
    pub fn player_attack(&mut self, reach: f32) -> usize {
        let player = self.player.position;
        let victims: Vec<AgentId> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| !enemy.is_dead())
            .filter(|(_, enemy)| enemy.actuator().position().distance(player) <= reach)
            .map(|(index, _)| AgentId(index))
            .collect();

        for &victim in &victims {
            self.weapon_hit(victim);
        }
        victims.len()
    }

    /// Advance every enemy by one frame of `dt` seconds.
    ///
    /// Contacts reported since the last step are applied first, then each
    /// enemy runs its decide and act passes and its body moves.
    pub fn step(&mut self, dt: f32) {
        self.events.swap();
        self.frame += 1;

        let hits: Vec<AgentId> = self
            .events
            .iter()
            .filter_map(|event| match event {
                ArenaEvent::WeaponHit { victim } => Some(*victim),
                _ => None,
            })
            .collect();
        for victim in hits {
            match self.enemies.get_mut(victim.0) {
                Some(enemy) => enemy.on_weapon_hit(),
                None => log::warn!("Weapon hit on unknown agent {}", victim.0),
            }
        }

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            let report = enemy.tick(self.player);
            if let Some((transition, to)) = report.transition {
                self.events.push(ArenaEvent::StateChanged {
                    agent: AgentId(index),
                    from: report.state,
                    transition,
                    to,
                });
            }
            enemy.actuator_mut().integrate(dt);
        }
    }

    /// Events delivered at the start of the latest step.
    ///
    /// State changes show up one step after they happen.
    pub fn events(&self) -> impl Iterator<Item = &ArenaEvent> {
        self.events.iter()
    }

    /// Look up an enemy.
    #[must_use]
    pub fn enemy(&self, id: AgentId) -> Option<&Enemy<KinematicBody>> {
        self.enemies.get(id.0)
    }

    /// Number of enemies, dead ones included.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Check whether every enemy has died.
    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.enemies.iter().all(Enemy::is_dead)
    }

    /// Number of steps taken.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
