//! Integration tests for BookNest.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p booknest-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Browsing through the storefront
//! - `cart_checkout` - Cart editing, subscriptions and checkout
//! - `account` - Sign-up / sign-in flows against the file store
//!
//! Each test gets its own data directory inside a [`tempfile::TempDir`],
//! removed when the [`TestContext`] is dropped.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use booknest_storefront::{
    LogFormat, RecordingNotifier, StoreBackend, Storefront, StorefrontConfig,
};
use tempfile::TempDir;

/// An isolated file-backed storefront environment.
#[derive(Debug)]
pub struct TestContext {
    _root: TempDir,
    data_dir: PathBuf,
    /// Notifications from every storefront opened through this context.
    pub notifier: RecordingNotifier,
}

impl TestContext {
    /// Create a context with a fresh, not yet created, data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let root = tempfile::Builder::new()
            .prefix("booknest-it-")
            .tempdir()
            .expect("Failed to create temp dir");
        let data_dir = root.path().join("data");
        Self {
            _root: root,
            data_dir,
            notifier: RecordingNotifier::new(),
        }
    }

    /// Configuration pointing the file store at this context's directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            store: StoreBackend::File,
            data_dir: self.data_dir.clone(),
            log_format: LogFormat::Pretty,
        }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Open a storefront over the shared file store.
    ///
    /// Opening twice simulates two page loads (or two processes) sharing the
    /// same persistent storage.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn storefront(&self) -> Storefront {
        Storefront::from_config(&self.config(), Arc::new(self.notifier.clone()))
            .expect("Failed to open storefront")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

