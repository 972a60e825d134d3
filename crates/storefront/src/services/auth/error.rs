//! Authentication error types.

use thiserror::Error;

use crate::db::StoreError;

/// Errors that can occur during sign-up, sign-in and sign-out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field was left empty.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// The email is not a `local@domain` address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] booknest_core::EmailError),

    /// Sign-up with an email that is already registered.
    #[error("user already exists")]
    DuplicateUser,

    /// No account matches both email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Whether the error comes from what the shopper typed, as opposed to a
    /// storage failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
