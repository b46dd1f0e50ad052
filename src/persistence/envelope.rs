//! Versioned JSON envelope with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::PersistenceError;

/// Highest envelope version this build understands
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Read a value written by [`write_json`]. `Ok(None)` when the file does not
/// exist yet.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let envelope: Envelope<T> =
        serde_json::from_str(&json).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
    if envelope.version > FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: envelope.version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(Some(envelope.data))
}

/// Write `value` to `path` via a sibling tmp file so a crash never leaves a
/// half-written save behind
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let envelope = Envelope {
        version: FORMAT_VERSION,
        data: value,
    };
    let json =
        serde_json::to_string_pretty(&envelope).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cosmic-defender-envelope-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = scratch("missing");
        let loaded: Option<u64> = read_json(&dir.join("nothing.json")).expect("missing is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = scratch("write");
        let path = dir.join("value.json");
        write_json(&path, &vec![1u32, 2, 3]).expect("write");
        assert!(!tmp_path(&path).exists());
        let loaded: Option<Vec<u32>> = read_json(&path).expect("read");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_and_future_files_rejected() {
        let dir = scratch("corrupt");
        fs::create_dir_all(&dir).expect("mkdir");

        let corrupt = dir.join("corrupt.json");
        fs::write(&corrupt, "{ not json").expect("write");
        assert!(matches!(read_json::<u64>(&corrupt), Err(PersistenceError::Corrupt(_))));

        let future = dir.join("future.json");
        fs::write(&future, r#"{"version": 99, "data": 5}"#).expect("write");
        assert!(matches!(
            read_json::<u64>(&future),
            Err(PersistenceError::UnsupportedVersion { found: 99, .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
