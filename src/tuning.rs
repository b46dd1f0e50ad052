//! Data-driven game balance
//!
//! The level table and arena dimensions live here rather than in code paths,
//! so a JSON file can override them. The built-in table is the shipped game.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, STARTING_LIVES};
use crate::sim::entities::EnemyKind;
use crate::sim::rect::Rect;

/// Fastest spawn interval a level may ask for. With deltas capped at 100 ms
/// this bounds spawning to 100 enemies per tick.
pub const MIN_SPAWN_RATE_MS: f32 = 1.0;

/// One level's spawn pool, pacing and kill quota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Visual theme key for the presentation layer
    pub theme: String,
    pub enemy_types: Vec<EnemyKind>,
    /// Milliseconds between spawns, at least `MIN_SPAWN_RATE_MS`
    pub spawn_rate_ms: f32,
    pub enemies_to_kill: u32,
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTuning {
    pub arena_width: f32,
    pub arena_height: f32,
    #[serde(default = "default_lives")]
    pub starting_lives: u32,
    /// Level 1 first
    pub levels: Vec<LevelConfig>,
}

fn default_lives() -> u32 {
    STARTING_LIVES
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            starting_lives: STARTING_LIVES,
            levels: vec![
                LevelConfig {
                    name: "Deep Space Patrol".into(),
                    theme: "space".into(),
                    enemy_types: vec![EnemyKind::Fighter],
                    spawn_rate_ms: 120.0,
                    enemies_to_kill: 15,
                },
                LevelConfig {
                    name: "Asteroid Field".into(),
                    theme: "asteroid".into(),
                    enemy_types: vec![EnemyKind::Fighter, EnemyKind::Asteroid],
                    spawn_rate_ms: 90.0,
                    enemies_to_kill: 20,
                },
                LevelConfig {
                    name: "Alien Mothership".into(),
                    theme: "alien".into(),
                    enemy_types: vec![EnemyKind::Fighter, EnemyKind::Interceptor, EnemyKind::Asteroid],
                    spawn_rate_ms: 70.0,
                    enemies_to_kill: 25,
                },
            ],
        }
    }
}

impl GameTuning {
    /// Config for a 1-based level number. `None` past the end of the table.
    pub fn level(&self, level: u32) -> Option<&LevelConfig> {
        let index = level.checked_sub(1)? as usize;
        self.levels.get(index)
    }

    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Play field with its top-left corner at the origin
    pub fn arena(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.arena_width, self.arena_height))
    }

    /// Parse and validate a JSON table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: GameTuning = serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON table from disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|e| TuningError::Io(e.to_string()))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {} ({} levels)", path.display(), tuning.levels.len());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(TuningError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.levels.is_empty() {
            return Err(TuningError::NoLevels);
        }
        if self.starting_lives == 0 {
            return Err(TuningError::NoLives);
        }
        for (i, level) in self.levels.iter().enumerate() {
            let number = i as u32 + 1;
            if level.enemy_types.is_empty() {
                return Err(TuningError::EmptyEnemyPool { level: number });
            }
            if !(level.spawn_rate_ms >= MIN_SPAWN_RATE_MS) {
                return Err(TuningError::InvalidSpawnRate {
                    level: number,
                    spawn_rate_ms: level.spawn_rate_ms,
                });
            }
            if level.enemies_to_kill == 0 {
                return Err(TuningError::ZeroKillQuota { level: number });
            }
        }
        Ok(())
    }
}

/// Reasons a tuning table is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Io(String),
    Parse(String),
    InvalidArena { width: f32, height: f32 },
    NoLevels,
    NoLives,
    EmptyEnemyPool { level: u32 },
    InvalidSpawnRate { level: u32, spawn_rate_ms: f32 },
    ZeroKillQuota { level: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read tuning file: {e}"),
            Self::Parse(e) => write!(f, "invalid tuning json: {e}"),
            Self::InvalidArena { width, height } => {
                write!(f, "arena must be positive, got {width}x{height}")
            }
            Self::NoLevels => write!(f, "tuning defines no levels"),
            Self::NoLives => write!(f, "starting lives must be at least 1"),
            Self::EmptyEnemyPool { level } => write!(f, "level {level} has no enemy types"),
            Self::InvalidSpawnRate { level, spawn_rate_ms } => {
                write!(
                    f,
                    "level {level} spawn rate must be at least {MIN_SPAWN_RATE_MS} ms, got {spawn_rate_ms}"
                )
            }
            Self::ZeroKillQuota { level } => write!(f, "level {level} has a zero kill quota"),
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_shipped_levels() {
        let tuning = GameTuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.level_count(), 3);
        assert_eq!(tuning.level(1).map(|l| l.enemies_to_kill), Some(15));
        assert_eq!(tuning.level(2).map(|l| l.spawn_rate_ms), Some(90.0));
        assert_eq!(tuning.level(3).map(|l| l.enemy_types.len()), Some(3));
    }

    #[test]
    fn test_level_lookup_out_of_range() {
        let tuning = GameTuning::default();
        assert!(tuning.level(0).is_none());
        assert!(tuning.level(4).is_none());
    }

    #[test]
    fn test_json_round_trip_and_defaults() {
        let json = r#"{
            "arena_width": 400.0,
            "arena_height": 300.0,
            "levels": [
                { "name": "Drill", "theme": "space", "enemy_types": ["Asteroid"],
                  "spawn_rate_ms": 500.0, "enemies_to_kill": 3 }
            ]
        }"#;
        let tuning = GameTuning::from_json(json).expect("valid table");
        assert_eq!(tuning.starting_lives, STARTING_LIVES);
        assert_eq!(tuning.arena().max(), Vec2::new(400.0, 300.0));
        assert_eq!(tuning.levels[0].enemy_types, vec![EnemyKind::Asteroid]);
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut tuning = GameTuning::default();
        tuning.levels[1].enemy_types.clear();
        assert_eq!(tuning.validate(), Err(TuningError::EmptyEnemyPool { level: 2 }));

        let mut tuning = GameTuning::default();
        tuning.levels[0].spawn_rate_ms = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidSpawnRate { level: 1, .. })
        ));

        let mut tuning = GameTuning::default();
        tuning.levels.clear();
        assert_eq!(tuning.validate(), Err(TuningError::NoLevels));

        assert!(matches!(GameTuning::from_json("{"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_spawn_rate_floor() {
        let mut tuning = GameTuning::default();
        tuning.levels[2].spawn_rate_ms = 1e-6;
        let err = tuning.validate().expect_err("sub-millisecond rate");
        assert!(matches!(err, TuningError::InvalidSpawnRate { level: 3, .. }));
        assert!(err.to_string().contains("at least 1 ms"));

        tuning.levels[2].spawn_rate_ms = f32::NAN;
        assert!(tuning.validate().is_err());

        tuning.levels[2].spawn_rate_ms = MIN_SPAWN_RATE_MS;
        assert!(tuning.validate().is_ok());
    }
}
