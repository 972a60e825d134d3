//! Authentication service.
//!
//! A mock account system: accounts are `{email, password, name}` records in
//! the session repository and signing in is an exact plaintext match. This
//! service is the only place credentials are checked, so a real identity
//! provider can replace it without touching callers.
//!
//! Every change to the session is published on a `watch` channel. Views
//! subscribe with [`AuthService::subscribe`] and re-render when it changes.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use booknest_core::Email;

use crate::db::SessionRepository;
use crate::models::{Session, UserRecord};

/// Authentication service.
pub struct AuthService {
    repo: Arc<dyn SessionRepository>,
    session_tx: watch::Sender<Option<Session>>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session", &*self.session_tx.borrow())
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create the service, seeding subscribers with the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the stored session cannot be read.
    pub fn new(repo: Arc<dyn SessionRepository>) -> Result<Self, AuthError> {
        let current = repo.current()?;
        let (session_tx, _) = watch::channel(current);
        Ok(Self { repo, session_tx })
    }

    /// Subscribe to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// The stored session, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be read.
    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.repo.current()?)
    }

    /// Re-read the stored session and notify subscribers if it changed
    /// outside this service (e.g. another process sharing the file store).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be read.
    pub fn refresh(&self) -> Result<Option<Session>, AuthError> {
        let current = self.repo.current()?;
        self.session_tx.send_if_modified(|published| {
            if *published == current {
                false
            } else {
                published.clone_from(&current);
                true
            }
        });
        Ok(current)
    }

    /// Register a new account and sign it in.
    ///
    /// Registration is atomic against other writers sharing the store. If the
    /// session cannot be written afterwards, the new account is removed again
    /// so the sign-up can be retried.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingRequiredField` if name, email or password is empty
    /// - `AuthError::InvalidEmail` if the email is malformed
    /// - `AuthError::DuplicateUser` if the email is already registered; the
    ///   stored account list is left unchanged
    /// - `AuthError::Store` if the repository fails
    #[instrument(skip(self, password, name))]
    pub fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Session, AuthError> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;
        let email = Email::parse(email)?;

        let user = UserRecord::new(email, SecretString::from(password), name.trim());
        if !self.repo.add_user(&user)? {
            tracing::info!("Sign-up rejected: email already registered");
            return Err(AuthError::DuplicateUser);
        }

        let session = Session::signed_in(&user);
        if let Err(err) = self.establish(&session) {
            tracing::error!(error = %err, "Session write failed, removing new account");
            if let Err(rollback) = self.repo.remove_user(&user.email) {
                tracing::error!(error = %rollback, "Could not remove new account");
            }
            return Err(err);
        }

        tracing::info!("Account created");
        Ok(session)
    }

    /// Sign in with an exact email and password match.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingRequiredField` if email or password is empty
    /// - `AuthError::InvalidEmail` if the email is malformed
    /// - `AuthError::InvalidCredentials` if no account matches both; the
    ///   current session is left unchanged
    /// - `AuthError::Store` if the repository fails
    #[instrument(skip(self, password))]
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        require("email", email)?;
        require("password", password)?;
        let email = Email::parse(email)?;

        let users = self.repo.users()?;
        let user = users
            .iter()
            .find(|user| user.matches(&email, password))
            .ok_or_else(|| {
                tracing::info!("Sign-in rejected");
                AuthError::InvalidCredentials
            })?;

        let session = Session::signed_in(user);
        self.establish(&session)?;

        tracing::info!("Signed in");
        Ok(session)
    }

    /// Clear the session entirely.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be removed.
    #[instrument(skip(self))]
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.repo.clear_current()?;
        self.session_tx.send_replace(None);
        tracing::info!("Signed out");
        Ok(())
    }

    fn establish(&self, session: &Session) -> Result<(), AuthError> {
        self.repo.save_current(session)?;
        self.session_tx.send_replace(Some(session.clone()));
        Ok(())
    }
}

/// Reject empty (or whitespace-only) form fields.
fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingRequiredField(field));
    }
    Ok(())
}
