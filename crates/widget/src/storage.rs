//! Durable client-side storage seam.
//!
//! The original widget keeps its auth token, cached rate, and last resolved
//! country in the host's durable key-value storage. [`KeyValueStore`] is that
//! seam: host adapters wrap whatever the page provides, [`MemoryStore`] backs
//! tests, and [`JsonFileStore`] persists across CLI invocations.
//!
//! The store API is infallible by design, matching client-side storage
//! semantics; file-backed persistence failures are logged and the in-memory
//! view stays authoritative for the rest of the process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::warn;

/// Storage key holding the gateway auth token (read-only input).
pub const AUTH_TOKEN_KEY: &str = "x-auth-token";

/// Root of the rate-cache slot keys; slots are `rate-exchange:<FROM>-<TO>`.
pub const RATE_CACHE_KEY: &str = "rate-exchange";

/// Storage key holding the last resolved country (write-only cache).
pub const CURRENT_COUNTRY_KEY: &str = "current-country";

/// Errors that can occur when opening a file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or creating the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON string map.
    #[error("store file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable string key-value storage.
///
/// Mirrors client-side storage semantics: get/set/remove, strings only,
/// no errors surfaced to callers.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

/// In-memory store for tests and embedding hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// File-backed store persisting entries as a JSON object.
///
/// Used by the CLI so tokens and cached rates survive across invocations,
/// playing the role durable page storage plays in a browsing session.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store backed by `path`, creating an empty one if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON string map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize store contents");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %err, "failed to persist store");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}
