//! Variable timestep simulation tick
//!
//! Core game loop that advances the simulation by an elapsed time. Given the
//! same state, inputs, deltas and RNG rolls it always produces the same
//! result.

use super::collision::resolve_collisions;
use super::entities::palette;
use super::events::SoundEffect;
use super::progression;
use super::rng::SimRng;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_TICK_MS;

const MUZZLE_PARTICLES: usize = 3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Clamp a frame delta to something the simulation can integrate safely
pub fn sanitize_dt(dt_ms: f32) -> f32 {
    if !dt_ms.is_finite() {
        return 0.0;
    }
    dt_ms.clamp(0.0, MAX_TICK_MS)
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32, rng: &mut dyn SimRng) {
    let dt = sanitize_dt(dt_ms);

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                progression::pause(state);
                return;
            }
            GamePhase::Paused => {
                progression::resume(state);
            }
            _ => {}
        }
    }

    // Only active gameplay advances
    if state.phase != GamePhase::Playing {
        return;
    }
    state.ticks += 1;

    let arena = state.arena;
    let bullet_bounds = state.bullet_bounds();

    // Player movement and firing
    let fired = state
        .player
        .as_mut()
        .and_then(|player| player.update(dt, input, &arena));
    if let Some(bullet) = fired {
        let muzzle = bullet.pos;
        state.player_bullets.push(bullet);
        state.shots_fired += 1;
        state.spawn_particles(muzzle, palette::SPARK, MUZZLE_PARTICLES, rng);
        state.play(SoundEffect::Shoot);
    }

    for enemy in &mut state.enemies {
        if let Some(bullet) = enemy.update(dt, &arena) {
            state.enemy_bullets.push(bullet);
        }
    }
    for bullet in &mut state.player_bullets {
        bullet.update(dt, &bullet_bounds);
    }
    for bullet in &mut state.enemy_bullets {
        bullet.update(dt, &bullet_bounds);
    }
    for power_up in &mut state.power_ups {
        power_up.update(dt, &arena);
    }
    for particle in &mut state.particles {
        particle.update(dt);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }

    let spawned = state.spawner.update(
        dt,
        state.tuning.level(state.level),
        state.level,
        &arena,
        rng,
        &mut state.enemies,
    );
    if spawned > 0 {
        log::trace!("Spawned {spawned} enemies on tick {}", state.ticks);
    }

    resolve_collisions(state, rng);

    if state.phase == GamePhase::Playing {
        progression::check_level_complete(state);
    }

    state.compact();
}
