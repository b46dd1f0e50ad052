//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp file, then rename over the target)
//! - Missing or corrupt files degrade to defaults instead of failing a run

pub mod envelope;
pub mod file;

use std::fmt;

pub use envelope::{read_json, write_json};
pub use file::JsonFileStore;

/// Why a load or save failed
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    /// File exists but does not parse
    Corrupt(String),
    /// Written by a newer build
    UnsupportedVersion { found: u32, supported: u32 },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage i/o failed: {e}"),
            Self::Corrupt(e) => write!(f, "stored data is corrupt: {e}"),
            Self::UnsupportedVersion { found, supported } => {
                write!(f, "stored data has version {found}, this build reads up to {supported}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Durable home for the single best score
pub trait ScoreStore {
    /// Best score on record. `Ok(0)` when nothing has been saved yet.
    fn load_high_score(&self) -> Result<u64, PersistenceError>;

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// In-memory store for tests and runs without a save directory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u64,
    /// When set, every save fails with this message
    pub fail_saves: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(score: u64) -> Self {
        Self {
            high_score: score,
            fail_saves: None,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<u64, PersistenceError> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        if let Some(reason) = &self.fail_saves {
            return Err(PersistenceError::Io(std::io::Error::other(reason.clone())));
        }
        self.high_score = score;
        Ok(())
    }
}
