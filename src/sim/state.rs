//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`, which the caller
//! owns and passes explicitly. There is no ambient global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Bullet, Enemy, Entity, Explosion, ExplosionKind, Particle, Player, PowerUp};
use super::events::{GameEvent, LevelSummary, RunSummary, SoundEffect};
use super::rect::Rect;
use super::rng::SimRng;
use super::spawner::Spawner;
use crate::settings::Settings;
use crate::tuning::{GameTuning, LevelConfig};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay suspended by the player
    Paused,
    /// Kill quota reached, waiting for the next-level command
    LevelComplete,
    /// Run ended (lost all lives or cleared the final level)
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// 1-based level number
    pub level: u32,
    pub score: u64,
    /// Points earned in the current level
    pub level_score: u64,
    pub lives: u32,
    /// Shots fired this run
    pub shots_fired: u32,
    /// Kills in the current level
    pub enemies_killed: u32,
    /// Best score across sessions (only ever increases)
    pub high_score: u64,
    /// Simulation tick counter
    pub ticks: u64,

    pub tuning: GameTuning,
    pub arena: Rect,
    /// Cap on live particles (from settings)
    pub max_particles: usize,
    /// Whether screen shake events are emitted (from settings)
    pub screen_shake: bool,

    /// Present while a run is in progress
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub spawner: Spawner,

    /// Stats of the most recently cleared level
    pub last_level: Option<LevelSummary>,
    /// Set once the run ends
    pub outcome: Option<RunSummary>,
    /// Feedback queued since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state sitting on the menu
    pub fn new(tuning: GameTuning, high_score: u64) -> Self {
        let arena = tuning.arena();
        let settings = Settings::default();
        Self {
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            level_score: 0,
            lives: tuning.starting_lives,
            shots_fired: 0,
            enemies_killed: 0,
            high_score,
            ticks: 0,
            tuning,
            arena,
            max_particles: settings.max_particles(),
            screen_shake: settings.effective_screen_shake(),
            player: None,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            spawner: Spawner::default(),
            last_level: None,
            outcome: None,
            events: Vec::new(),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.max_particles = settings.max_particles();
        self.screen_shake = settings.effective_screen_shake();
        if self.particles.len() > self.max_particles {
            self.particles.truncate(self.max_particles);
        }
    }

    /// Config of the level being played, if the table has one
    pub fn level_config(&self) -> Option<&LevelConfig> {
        self.tuning.level(self.level)
    }

    /// Rectangle outside of which bullets are discarded
    pub fn bullet_bounds(&self) -> Rect {
        self.arena.expanded(crate::consts::BULLET_BOUNDS_MARGIN)
    }

    pub fn player_spawn_point(&self) -> Vec2 {
        Player::spawn_point(&self.arena)
    }

    // --- Feedback ---

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.emit(GameEvent::Sound(sound));
    }

    pub fn shake(&mut self, intensity: f32) {
        if self.screen_shake {
            self.emit(GameEvent::ScreenShake(intensity));
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Cosmetics ---

    /// Spawn up to `count` particles, stopping at the particle cap
    pub fn spawn_particles(&mut self, pos: Vec2, color: u32, count: usize, rng: &mut dyn SimRng) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            self.particles.push(Particle::new(pos, color, rng));
        }
    }

    pub fn spawn_explosion(&mut self, pos: Vec2, kind: ExplosionKind, rng: &mut dyn SimRng) {
        self.explosions.push(Explosion::new(pos, kind, rng));
    }

    // --- Lifecycle ---

    /// Drop every entity and the player
    pub fn clear_entities(&mut self) {
        self.player = None;
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.explosions.clear();
        self.spawner.reset();
    }

    /// Reset all per-run counters and entities
    pub fn reset_run(&mut self) {
        self.clear_entities();
        self.level = 1;
        self.score = 0;
        self.level_score = 0;
        self.lives = self.tuning.starting_lives;
        self.shots_fired = 0;
        self.enemies_killed = 0;
        self.last_level = None;
        self.outcome = None;
    }

    /// Remove dead entities, preserving the order of survivors
    pub fn compact(&mut self) {
        compact(&mut self.enemies, "enemy");
        compact(&mut self.player_bullets, "player bullet");
        compact(&mut self.enemy_bullets, "enemy bullet");
        compact(&mut self.power_ups, "power-up");
        compact(&mut self.particles, "particle");
        compact(&mut self.explosions, "explosion");

        let spawn = self.player_spawn_point();
        if let Some(player) = self.player.as_mut() {
            if !player.pos.is_finite() {
                log::warn!("Player position became non-finite, moving to spawn point");
                player.pos = spawn;
            }
        }
    }

    /// Raise the high score if the current score beats it
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

fn compact<T: Entity>(items: &mut Vec<T>, what: &str) {
    items.retain(|item| {
        if item.is_dead() {
            return false;
        }
        if !item.position().is_finite() {
            log::warn!("Dropping {what} with non-finite position");
            return false;
        }
        true
    });
}
