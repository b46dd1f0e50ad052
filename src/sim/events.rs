//! Discrete feedback emitted by the simulation
//!
//! The core never touches audio or display state. Everything the presentation
//! layer should react to is queued here and drained by the caller after each
//! tick or command.

use serde::{Deserialize, Serialize};

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Player bullet hit an enemy
    EnemyHit,
    /// Enemy destroyed
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Kill quota reached
    LevelComplete,
}

/// Stats shown when a level is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: u32,
    pub level_score: u64,
    pub bonus: u64,
    /// Percentage, 0 when no shots were fired
    pub accuracy: u32,
}

/// Final result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub won: bool,
    pub final_score: u64,
    pub level: u32,
    pub new_high_score: bool,
}

/// Screens the UI layer should display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title / start screen
    Menu,
    /// Gameplay with no overlay; carries the level name and theme for styling
    LevelStarted {
        level: u32,
        name: String,
        theme: String,
    },
    /// Gameplay resumed after a pause
    Resumed,
    Pause,
    LevelComplete(LevelSummary),
    GameOver(RunSummary),
}

/// Feedback events (sound, screen shake, screen changes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    ScreenShake(f32),
    ShowScreen(Screen),
}
