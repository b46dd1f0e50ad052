//! Timer-driven enemy spawning
//!
//! The accumulator carries its remainder across calls, so over any span of
//! simulated time `T` exactly `floor(T / spawn_rate)` enemies appear,
//! regardless of how the time was sliced into ticks. Levels faster than
//! `MIN_SPAWN_RATE_MS` spawn nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Enemy;
use super::rect::Rect;
use super::rng::SimRng;
use crate::consts::{SPAWN_MARGIN, SPAWN_Y};
use crate::tuning::{LevelConfig, MIN_SPAWN_RATE_MS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds accumulated toward the next spawn
    pub accumulator_ms: f32,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    /// Advance by `dt_ms` and push any enemies that came due.
    /// Returns how many were spawned.
    pub fn update(
        &mut self,
        dt_ms: f32,
        config: Option<&LevelConfig>,
        level: u32,
        arena: &Rect,
        rng: &mut dyn SimRng,
        enemies: &mut Vec<Enemy>,
    ) -> usize {
        let Some(config) = config else { return 0 };
        if config.enemy_types.is_empty() || !(config.spawn_rate_ms >= MIN_SPAWN_RATE_MS) {
            return 0;
        }

        self.accumulator_ms += dt_ms;
        let due = (self.accumulator_ms / config.spawn_rate_ms).floor();
        if due < 1.0 {
            return 0;
        }
        self.accumulator_ms -= due * config.spawn_rate_ms;

        let count = due as usize;
        let x_min = arena.min().x + SPAWN_MARGIN;
        let x_max = (arena.max().x - SPAWN_MARGIN).max(x_min);
        for _ in 0..count {
            let kind = config.enemy_types[rng.index(config.enemy_types.len())];
            let x = rng.range(x_min, x_max);
            enemies.push(Enemy::new(kind, Vec2::new(x, SPAWN_Y), level));
        }
        count
    }
}
