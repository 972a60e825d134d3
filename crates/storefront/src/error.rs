//! Unified error handling.
//!
//! Provides a unified `AppError` type for storefront operations. Errors caused
//! by shopper input are surfaced as notifications by
//! [`crate::state::Storefront`] before being returned; storage failures are
//! logged.

use thiserror::Error;

use booknest_core::BookId;

use crate::config::ConfigError;
use crate::db::StoreError;
use crate::services::auth::AuthError;
use crate::services::notify::Notification;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// No book with this ID in the catalog.
    #[error("Book not found: {0}")]
    BookNotFound(BookId),
}

impl AppError {
    /// The notification shown to the shopper for this error, if any.
    ///
    /// Storage and configuration failures are not the shopper's doing and
    /// produce no notification.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        let notification = match self {
            Self::Auth(AuthError::MissingRequiredField(_)) => {
                Notification::destructive("Error", "Please fill in all required fields")
            }
            Self::Auth(AuthError::InvalidEmail(_)) => {
                Notification::destructive("Error", "Please enter a valid email address")
            }
            Self::Auth(AuthError::DuplicateUser) => {
                Notification::destructive("Sign up failed", "User with this email already exists")
            }
            Self::Auth(AuthError::InvalidCredentials) => {
                Notification::destructive("Sign in failed", "Invalid email or password")
            }
            Self::BookNotFound(id) => {
                Notification::destructive("Error", format!("No book with ID {id}"))
            }
            Self::Auth(AuthError::Store(_)) | Self::Store(_) | Self::Config(_) => return None,
        };
        Some(notification)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
