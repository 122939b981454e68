//! Headless encounter demonstrating the enemy state machine
//!
//! Usage: `npc-fsm [enemy.ron | enemy.json]`

use npc_fsm::prelude::*;

/// Frame time of the simulated host
const DT: f32 = 1.0 / 30.0;
/// Frames before giving up
const MAX_FRAMES: u64 = 30 * 120;
/// Player walking speed
const PLAYER_SPEED: f32 = 3.0;
/// Player weapon reach
const PLAYER_REACH: f32 = 4.5;
/// Frames between player swings
const SWING_INTERVAL: u64 = 15;

fn default_config() -> EnemyConfig {
    EnemyConfig::default().with_waypoints([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(20.0, 0.0, 0.0),
        Vec3::new(20.0, 0.0, 20.0),
        Vec3::new(0.0, 0.0, 20.0),
    ])
}

fn load_config() -> Result<EnemyConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading enemy config from {path}");
            EnemyConfig::load(path)
        }
        None => Ok(default_config()),
    }
}

fn run(config: &EnemyConfig) -> Result<(), FsmError> {
    let mut arena = Arena::new(Vec3::new(-250.0, 0.0, 10.0));
    let guard = arena.spawn(config, Vec3::ZERO)?;
    arena.spawn(config, Vec3::new(20.0, 0.0, 20.0))?;

    while arena.frame() < MAX_FRAMES && !arena.all_dead() {
        // Walk toward the first guard and swing when in reach
        if let Some(target) = arena.enemy(guard).map(|enemy| enemy.actuator().position()) {
            let to_guard = target - arena.player.position;
            if to_guard.length() > PLAYER_REACH * 0.5 {
                let direction = to_guard.normalize_or_zero();
                arena.player.position += direction * PLAYER_SPEED * DT;
                arena.player.forward = direction;
            }
        }
        if arena.frame() % SWING_INTERVAL == 0 {
            arena.player_attack(PLAYER_REACH);
        }

        arena.step(DT);

        for event in arena.events() {
            if let ArenaEvent::StateChanged {
                agent,
                from,
                transition,
                to,
            } = event
            {
                log::info!(
                    "frame {}: enemy {} {from} --{transition}--> {to}",
                    arena.frame(),
                    agent.0
                );
            }
        }
    }

    for index in 0..arena.enemy_count() {
        if let Some(enemy) = arena.enemy(AgentId(index)) {
            log::info!(
                "enemy {index}: {} with {} hp after {} attacks",
                enemy.state(),
                enemy.health().points(),
                enemy.actuator().attacks()
            );
        }
    }
    log::info!("Encounter finished after {} frames", arena.frame());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Simulation error: {}", e);
        std::process::exit(1);
    }
}
