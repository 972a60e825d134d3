//! Domain models for the storefront.
//!
//! - [`book`] - Catalog reference data
//! - [`session`] - Registered accounts and the signed-in session, as persisted

pub mod book;
pub mod session;

pub use book::Book;
pub use session::{Session, UserRecord, keys as session_keys};
