//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the delta passed to `tick`
//! - Randomness only through `SimRng`
//! - Stable iteration order (insertion order, compacted in place)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod events;
pub mod progression;
pub mod rect;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{collides, resolve_collisions};
pub use entities::{
    Bullet, BulletOwner, Enemy, EnemyKind, Entity, Explosion, ExplosionKind, Particle, Player, PowerUp,
    PowerUpKind,
};
pub use events::{GameEvent, LevelSummary, RunSummary, Screen, SoundEffect};
pub use rect::{Boxed, Rect};
pub use rng::{SimRng, seeded};
pub use spawner::Spawner;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, sanitize_dt, tick};

use rand_pcg::Pcg32;

use crate::persistence::ScoreStore;
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::tuning::GameTuning;

/// Owns a game session: state, randomness, settings and the score store.
///
/// Commands mirror the UI buttons. Out-of-phase commands return `false` and
/// change nothing.
pub struct Simulation<R: SimRng = Pcg32> {
    state: GameState,
    rng: R,
    settings: Settings,
    store: Box<dyn ScoreStore>,
    /// The current run's outcome has been handed to the store
    run_recorded: bool,
}

impl Simulation<Pcg32> {
    /// Session with a seeded PCG generator
    pub fn new(tuning: GameTuning, settings: Settings, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::with_rng(tuning, settings, store, seeded(seed))
    }
}

impl<R: SimRng> Simulation<R> {
    pub fn with_rng(tuning: GameTuning, settings: Settings, store: Box<dyn ScoreStore>, rng: R) -> Self {
        let high_score = store.load_high_score().unwrap_or_else(|e| {
            log::warn!("High score unavailable, starting from 0: {e}");
            0
        });
        let mut state = GameState::new(tuning, high_score);
        state.apply_settings(&settings);
        log::debug!("Session created (high score {high_score})");
        Self {
            state,
            rng,
            settings,
            store,
            run_recorded: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that stage specific situations
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.apply_settings(&settings);
        self.settings = settings;
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// A run is in progress (playing or paused)
    pub fn is_running(&self) -> bool {
        matches!(self.state.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn start(&mut self) -> bool {
        let started = progression::start_game(&mut self.state);
        if started {
            self.run_recorded = false;
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        progression::pause(&mut self.state)
    }

    pub fn resume(&mut self) -> bool {
        progression::resume(&mut self.state)
    }

    /// Advance past LevelComplete. Clearing the last level ends the run.
    pub fn next_level(&mut self) -> bool {
        let advanced = progression::next_level(&mut self.state);
        self.record_outcome();
        advanced
    }

    pub fn menu(&mut self) -> bool {
        progression::return_to_menu(&mut self.state)
    }

    /// Advance the simulation by `dt_ms`
    pub fn step(&mut self, input: &TickInput, dt_ms: f32) {
        tick(&mut self.state, input, dt_ms, &mut self.rng);
        self.record_outcome();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Persist the best score once per finished run, and only when the run
    /// beat it. Failures are logged, never surfaced to gameplay.
    fn record_outcome(&mut self) {
        if self.run_recorded {
            return;
        }
        let Some(run) = self.state.outcome else {
            return;
        };
        self.run_recorded = true;
        if !run.new_high_score {
            return;
        }
        if let Err(e) = self.store.save_high_score(self.state.high_score) {
            log::warn!("Could not save high score: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, PersistenceError};
    use crate::sim::rng::testing::ScriptedRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares every saved value with the test
    struct RecordingStore {
        best: u64,
        saves: Rc<RefCell<Vec<u64>>>,
    }

    impl ScoreStore for RecordingStore {
        fn load_high_score(&self) -> Result<u64, PersistenceError> {
            Ok(self.best)
        }

        fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
            self.saves.borrow_mut().push(score);
            Ok(())
        }
    }

    struct UnreadableStore;

    impl ScoreStore for UnreadableStore {
        fn load_high_score(&self) -> Result<u64, PersistenceError> {
            Err(PersistenceError::Corrupt("bad json".into()))
        }

        fn save_high_score(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    fn recording(best: u64) -> (Simulation<ScriptedRng>, Rc<RefCell<Vec<u64>>>) {
        let saves = Rc::new(RefCell::new(Vec::new()));
        let store = RecordingStore {
            best,
            saves: Rc::clone(&saves),
        };
        let sim = Simulation::with_rng(
            GameTuning::default(),
            Settings::default(),
            Box::new(store),
            ScriptedRng::constant(0.5),
        );
        (sim, saves)
    }

    /// Last life, low health, asteroid on the player
    fn lose_run<R: SimRng>(sim: &mut Simulation<R>, score: u64) {
        sim.start();
        let state = sim.state_mut();
        state.score = score;
        state.lives = 1;
        let pos = state.player.as_ref().map(|p| p.pos).unwrap_or_default();
        if let Some(player) = state.player.as_mut() {
            player.health = 1.0;
        }
        state.enemies.push(Enemy::new(EnemyKind::Asteroid, pos, 1));
        sim.step(&TickInput::default(), 1.0);
        assert_eq!(sim.phase(), GamePhase::GameOver);
    }

    fn session(store: MemoryStore) -> Simulation<ScriptedRng> {
        Simulation::with_rng(
            GameTuning::default(),
            Settings::default(),
            Box::new(store),
            ScriptedRng::constant(0.5),
        )
    }

    #[test]
    fn test_high_score_loaded_from_store() {
        let sim = session(MemoryStore::with_high_score(7_500));
        assert_eq!(sim.state().high_score, 7_500);
        assert_eq!(sim.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_unreadable_store_starts_from_zero() {
        let sim = Simulation::with_rng(
            GameTuning::default(),
            Settings::default(),
            Box::new(UnreadableStore),
            ScriptedRng::constant(0.5),
        );
        assert_eq!(sim.state().high_score, 0);
    }

    #[test]
    fn test_saves_only_new_best_once() {
        let (mut sim, saves) = recording(1_000);
        lose_run(&mut sim, 400);
        sim.step(&TickInput::default(), 1.0);
        assert!(saves.borrow().is_empty());

        lose_run(&mut sim, 2_500);
        sim.step(&TickInput::default(), 1.0);
        assert_eq!(*saves.borrow(), vec![2_500]);
    }

    #[test]
    fn test_commands_follow_phase() {
        let mut sim = session(MemoryStore::new());
        assert!(!sim.pause());
        assert!(sim.start());
        assert!(sim.is_running());
        assert!(sim.pause());
        assert!(sim.is_running());
        assert!(sim.resume());
        assert!(!sim.next_level());
        assert!(!sim.menu());
    }

    #[test]
    fn test_settings_cap_particles() {
        let mut sim = session(MemoryStore::new());
        sim.apply_settings(Settings::from_preset(crate::settings::QualityPreset::Low));
        assert_eq!(sim.state().max_particles, 100);
    }

    #[test]
    fn test_finished_run_survives_failing_store() {
        let store = MemoryStore {
            fail_saves: Some("read-only".into()),
            ..Default::default()
        };
        let mut sim = session(store);
        lose_run(&mut sim, 900);
        assert_eq!(sim.state().high_score, 900);
        assert!(sim.start());
    }
}
