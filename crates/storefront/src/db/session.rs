//! Session repository.
//!
//! The only component that knows account data lives in a key-value store.
//! Services receive a [`SessionRepository`] and never read raw keys.

use serde::Serialize;
use serde::de::DeserializeOwned;

use booknest_core::Email;

use super::{KeyValueStore, StoreError};
use crate::models::{Session, UserRecord, session_keys};

/// Read/write/clear access to the registered accounts and the session.
pub trait SessionRepository: Send + Sync {
    /// All registered accounts, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be read or decoded.
    fn users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Replace the registered account list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be written.
    fn save_users(&self, users: &[UserRecord]) -> Result<(), StoreError>;

    /// Append `user` unless its email is already registered, atomically.
    ///
    /// Returns `false` (and stores nothing) for a duplicate email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be read, decoded or written.
    fn add_user(&self, user: &UserRecord) -> Result<bool, StoreError>;

    /// Delete the account registered under `email`, if any, atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be read, decoded or written.
    fn remove_user(&self, email: &Email) -> Result<(), StoreError>;

    /// The current session, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be read or decoded.
    fn current(&self) -> Result<Option<Session>, StoreError>;

    /// Replace the current session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be written.
    fn save_current(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the current session entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be removed.
    fn clear_current(&self) -> Result<(), StoreError>;
}

/// [`SessionRepository`] over any [`KeyValueStore`], storing JSON text.
#[derive(Debug, Clone)]
pub struct KvSessionRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KvSessionRepository<S> {
    /// Create a repository over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        decode(key, self.store.get(key)?.as_deref())
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.store.set(key, serde_json::to_string(value)?)
    }
}

fn decode<T: DeserializeOwned>(key: &str, text: Option<&str>) -> Result<Option<T>, StoreError> {
    text.map(serde_json::from_str::<T>)
        .transpose()
        .map_err(|e| {
            tracing::error!(key, error = %e, "Stored value is not valid JSON for its type");
            StoreError::from(e)
        })
}

impl<S: KeyValueStore> SessionRepository for KvSessionRepository<S> {
    fn users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.read(session_keys::USERS)?.unwrap_or_default())
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<(), StoreError> {
        self.write(session_keys::USERS, users)
    }

    fn add_user(&self, user: &UserRecord) -> Result<bool, StoreError> {
        let mut added = false;
        self.store.update(session_keys::USERS, &mut |current| {
            let mut users: Vec<UserRecord> =
                decode(session_keys::USERS, current)?.unwrap_or_default();
            added = !users.iter().any(|existing| existing.email == user.email);
            if !added {
                return Ok(None);
            }
            users.push(user.clone());
            Ok(Some(serde_json::to_string(&users)?))
        })?;
        Ok(added)
    }

    fn remove_user(&self, email: &Email) -> Result<(), StoreError> {
        self.store.update(session_keys::USERS, &mut |current| {
            let mut users: Vec<UserRecord> =
                decode(session_keys::USERS, current)?.unwrap_or_default();
            let before = users.len();
            users.retain(|existing| &existing.email != email);
            if users.len() == before {
                return Ok(None);
            }
            Ok(Some(serde_json::to_string(&users)?))
        })
    }

    fn current(&self) -> Result<Option<Session>, StoreError> {
        self.read(session_keys::CURRENT_USER)
    }

    fn save_current(&self, session: &Session) -> Result<(), StoreError> {
        self.write(session_keys::CURRENT_USER, session)
    }

    fn clear_current(&self) -> Result<(), StoreError> {
        self.store.remove(session_keys::CURRENT_USER)
    }
}
