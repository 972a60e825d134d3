//! Storefront services.
//!
//! - [`auth`] - Mock sign-up / sign-in over the session repository
//! - [`notify`] - Notification collaborator

pub mod auth;
pub mod notify;

pub use auth::{AuthError, AuthService};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
