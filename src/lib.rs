//! Cosmic Defender - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, progression)
//! - `render`: Render-ready snapshots for an external drawing layer
//! - `platform`: Host clock and input abstraction
//! - `persistence`: Best-score storage (the only saved state)
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use sim::Simulation;
pub use tuning::{GameTuning, LevelConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame length. Per-frame movement constants are scaled by
    /// `dt_ms / FRAME_MS` so a 60 Hz host reproduces them exactly.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest delta a single tick accepts (stalls are not replayed)
    pub const MAX_TICK_MS: f32 = 100.0;

    /// Default play field dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Bullets survive this far outside the arena before removal
    pub const BULLET_BOUNDS_MARGIN: f32 = 20.0;
    /// Power-ups survive this far below the arena
    pub const POWERUP_BOUNDS_MARGIN: f32 = 20.0;
    /// Enemies are culled this far below the arena
    pub const ENEMY_OFFSCREEN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MAX_AMMO: f32 = 100.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;
    pub const PLAYER_FIRE_RATE_MS: f32 = 200.0;
    pub const MIN_FIRE_RATE_MS: f32 = 50.0;
    pub const SHOT_AMMO_COST: f32 = 10.0;
    pub const AMMO_REGEN_PER_MS: f32 = 0.05;
    pub const HIT_INVULNERABILITY_MS: f32 = 1000.0;
    pub const WEAPON_NAME: &str = "PULSE CANNON";

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const PLAYER_BULLET_DAMAGE: f32 = 25.0;
    pub const ENEMY_BULLET_SPEED: f32 = 3.0;
    pub const ENEMY_BULLET_DAMAGE: f32 = 15.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 1.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.15;
    pub const HEALTH_PICKUP_AMOUNT: f32 = 25.0;
    pub const WEAPON_FIRE_RATE_STEP: f32 = 20.0;
    pub const SHIELD_DURATION_MS: f32 = 3000.0;

    /// Spawning
    pub const SPAWN_MARGIN: f32 = 30.0;
    pub const SPAWN_Y: f32 = -30.0;

    /// Scoring and lives
    pub const STARTING_LIVES: u32 = 3;
    pub const COMPLETION_BONUS: u64 = 10_000;
    pub const LEVEL_BONUS_FRACTION: f64 = 0.1;

    /// Damage large enough to destroy any enemy on contact
    pub const LETHAL_DAMAGE: f32 = 999.0;
}

/// Convert a 0xRRGGBB color into normalized RGBA
#[inline]
pub fn rgb_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Scale factor turning a millisecond delta into reference frames
#[inline]
pub fn frames(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Center of a box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
