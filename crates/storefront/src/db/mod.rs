//! Durable key-value storage for accounts and the session.
//!
//! Values are stored as serialized JSON text under string keys, the same
//! shape browser local storage has. Two entries are used, see
//! [`crate::models::session_keys`]:
//!
//! - `booknest-users` - JSON array of registered accounts
//! - `booknest-user` - JSON object for the signed-in session
//!
//! There is no schema versioning, no encryption and no expiry.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process memory, for tests and throwaway runs
//! - [`FileStore`] - a single JSON document on disk, shareable between
//!   processes

mod file;
mod memory;
pub mod session;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{StoreBackend, StorefrontConfig};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::{KvSessionRepository, SessionRepository};

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Read-modify-write step for [`KeyValueStore::update`].
///
/// Receives the current value (if any) and returns the replacement, or
/// `None` to leave the entry untouched.
pub type Update<'a> = &'a mut dyn FnMut(Option<&str>) -> Result<Option<String>, StoreError>;

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically replace the value under `key` with the result of `apply`.
    ///
    /// No other writer, in this process or another one sharing the backend,
    /// can change `key` between the read and the write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails or `apply` returns an error;
    /// the stored value is then unchanged.
    fn update(&self, key: &str, apply: Update<'_>) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn update(&self, key: &str, apply: Update<'_>) -> Result<(), StoreError> {
        (**self).update(key, apply)
    }
}

/// Open the store selected by configuration.
///
/// # Errors
///
/// Returns `StoreError` if the file store cannot be opened.
pub fn open_store(config: &StorefrontConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => {
            let path = config.store_path();
            tracing::info!(path = %path.display(), "Using file store");
            Ok(Arc::new(FileStore::open(path)?))
        }
    }
}
