//! File-backed score store

use std::path::{Path, PathBuf};

use super::{PersistenceError, ScoreStore, read_json, write_json};

/// File name of the best score inside a save directory
pub const HIGH_SCORE_FILE: &str = "highscore.json";

/// Keeps the best score as JSON on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HIGH_SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_high_score(&self) -> Result<u64, PersistenceError> {
        match read_json::<u64>(&self.path)? {
            Some(score) => {
                log::info!("Loaded high score {score} from {}", self.path.display());
                Ok(score)
            }
            None => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                Ok(0)
            }
        }
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        write_json(&self.path, &score)?;
        log::info!("High score {score} saved");
        Ok(())
    }
}
