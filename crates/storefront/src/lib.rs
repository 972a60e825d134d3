//! BookNest storefront library.
//!
//! Catalog browsing, the shopping cart and a mock account session, kept as
//! plain state so any front end (the `booknest` CLI, tests) can drive it.
//!
//! Start from [`Storefront`]: it owns the catalog, the cart and the auth
//! service, and publishes cart and session changes to subscribers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use cart::{CartLine, CartManager, CartSummary};
pub use catalog::{Catalog, CatalogQuery, Listing, SortKey};
pub use config::{LogFormat, StoreBackend, StorefrontConfig};
pub use error::{AppError, Result};
pub use models::{Book, Session};
pub use services::notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use state::{AccountView, OrderConfirmation, Storefront};
