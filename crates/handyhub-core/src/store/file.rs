use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{Error, Result};

use super::KeyValueStore;

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Stores every key in one pretty-printed JSON object on disk.
///
/// Each write rewrites the whole file. The in-process mutex keeps
/// read-modify-write cycles from interleaving.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store backed by `session.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; `None` when the file is missing or blank
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to read session file: {}", e)))?;
        Ok(Some(contents).filter(|c| !c.trim().is_empty()))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match self.read()? {
            Some(contents) => serde_json::from_str(&contents)
                .map_err(|e| Error::Storage(format!("Failed to parse session file: {}", e))),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Entries to rewrite, and whether the file on disk was damaged. A file
    /// that no longer parses is discarded so the next write replaces it.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool)> {
        let Some(contents) = self.read()? else {
            return Ok((BTreeMap::new(), false));
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok((entries, false)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Discarding damaged session file");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)
                    .map_err(|e| Error::Storage(format!("Failed to remove session file: {}", e)))?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create data directory: {}", e)))?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::Storage(format!("Failed to serialize session file: {}", e)))?;

        // Write beside the target and rename so a crash never leaves half a file
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, contents)
            .map_err(|e| Error::Storage(format!("Failed to write session file: {}", e)))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::Storage(format!("Failed to replace session file: {}", e)))
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Storage("Session file lock poisoned".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard()?;
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.guard()?;
        let (mut entries, damaged) = self.load_for_write()?;
        if entries.remove(key).is_some() || damaged {
            self.save(&entries)?;
        }
        Ok(())
    }
}
