//! Durable key-value storage for session state.
//!
//! Three backends implement `KeyValueStore`:
//! - `FileStore`: a single JSON object file in the platform data directory
//! - `KeyringStore`: one OS keychain entry per key
//! - `MemoryStore`: process-local, used for tests and throwaway sessions

pub mod file;
pub mod keychain;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

/// Application name used for data directory paths and keychain service names
pub const APP_NAME: &str = "handyhub";

/// Synchronous string key-value storage that survives restarts.
///
/// Removing a key that is not present is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl StoreBackend {
    /// Open the backend. `data_dir` overrides the platform data directory
    /// for the file backend.
    pub fn open(self, data_dir: Option<PathBuf>) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match self {
            StoreBackend::File => {
                let dir = match data_dir {
                    Some(dir) => dir,
                    None => default_data_dir()?,
                };
                Arc::new(FileStore::in_dir(dir))
            }
            StoreBackend::Keyring => Arc::new(KeyringStore::new()),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "keyring" | "keychain" => Ok(StoreBackend::Keyring),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(Error::InvalidInput(format!("Unknown store backend: {}", other))),
        }
    }
}

/// Platform data directory for persisted session state
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| Error::Storage("Could not find data directory".to_string()))
}
