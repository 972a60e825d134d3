//! Session-related types.
//!
//! Types persisted in the key-value store for the mock account system. The
//! serialized shapes are `{email, password, name}` for accounts and
//! `{email, name, isSignedIn}` for the session.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use booknest_core::Email;

/// A registered account.
///
/// The password is stored and compared in plaintext. This is the mock
/// boundary of the demo; it is never hashed or verified elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique account key.
    pub email: Email,
    #[serde(
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    pub password: SecretString,
    /// Display name.
    pub name: String,
}

impl UserRecord {
    /// Create a new account record.
    #[must_use]
    pub fn new(email: Email, password: SecretString, name: impl Into<String>) -> Self {
        Self {
            email,
            password,
            name: name.into(),
        }
    }

    /// Exact plaintext match of both email and password.
    #[must_use]
    pub fn matches(&self, email: &Email, password: &str) -> bool {
        &self.email == email && self.password.expose_secret() == password
    }
}

/// Session-stored user identity.
///
/// Absence of a session means signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: Email,
    pub name: String,
    #[serde(rename = "isSignedIn")]
    pub is_signed_in: bool,
}

impl Session {
    /// A signed-in session for `user`.
    #[must_use]
    pub fn signed_in(user: &UserRecord) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            is_signed_in: true,
        }
    }
}

/// Storage keys for account data.
pub mod keys {
    /// Key for the list of registered accounts.
    pub const USERS: &str = "booknest-users";

    /// Key for the current signed-in session.
    pub const CURRENT_USER: &str = "booknest-user";
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn emma() -> UserRecord {
        UserRecord::new(
            Email::parse("emma@booknest.example").unwrap(),
            SecretString::from("hunter22"),
            "Emma Thompson",
        )
    }

    #[test]
    fn test_user_record_storage_shape() {
        let json = serde_json::to_value(emma()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "emma@booknest.example",
                "password": "hunter22",
                "name": "Emma Thompson"
            })
        );
    }

    #[test]
    fn test_session_storage_shape() {
        let session = Session::signed_in(&emma());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "emma@booknest.example",
                "name": "Emma Thompson",
                "isSignedIn": true
            })
        );
        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_matches_requires_both_fields() {
        let user = emma();
        let email = Email::parse("emma@booknest.example").unwrap();
        let other = Email::parse("sarah@booknest.example").unwrap();
        assert!(user.matches(&email, "hunter22"));
        assert!(!user.matches(&email, "Hunter22"));
        assert!(!user.matches(&other, "hunter22"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", emma());
        assert!(!debug.contains("hunter22"));
    }
}
