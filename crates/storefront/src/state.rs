//! Storefront state shared by every view.
//!
//! [`Storefront`] owns the catalog, the cart and the auth service, and is the
//! entry point front ends drive. It turns shopper-caused errors into
//! notifications and publishes cart and session changes to subscribers, so
//! views update without re-reading the whole world.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::instrument;

use booknest_core::{BookId, Email, Price};

use crate::cart::{CartManager, CartSummary};
use crate::catalog::{Catalog, CatalogQuery, Listing};
use crate::config::StorefrontConfig;
use crate::db::{self, KvSessionRepository, SessionRepository};
use crate::error::{AppError, Result};
use crate::models::Session;
use crate::services::auth::AuthService;
use crate::services::notify::{Notification, Notifier};

/// Acknowledgement of a checkout.
///
/// Checkout is a UI acknowledgement only: no order is recorded and the cart
/// keeps its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub item_count: u32,
    pub total_price: Price,
}

impl OrderConfirmation {
    /// The confirmation notification.
    #[must_use]
    pub fn notification(&self) -> Notification {
        Notification::info(
            "Order placed successfully!",
            format!(
                "Your order of {} items for ${} has been confirmed.",
                self.item_count,
                self.total_price.amount_string()
            ),
        )
    }
}

/// What the account button should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountView {
    /// Signed in: show the profile with a sign-out action.
    Profile { name: String, email: Email },
    /// Signed out: show the sign-in / sign-up form.
    SignIn,
}

impl From<Option<&Session>> for AccountView {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(session) if session.is_signed_in => Self::Profile {
                name: session.name.clone(),
                email: session.email.clone(),
            },
            _ => Self::SignIn,
        }
    }
}

/// The storefront.
pub struct Storefront {
    catalog: Catalog,
    cart: CartManager,
    cart_open: bool,
    cart_tx: watch::Sender<CartSummary>,
    auth: AuthService,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("books", &self.catalog.books().len())
            .field("cart", &self.cart)
            .field("cart_open", &self.cart_open)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Create a storefront.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the stored session cannot be read.
    pub fn new(
        catalog: Catalog,
        repo: Arc<dyn SessionRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let (cart_tx, _) = watch::channel(CartSummary::default());
        Ok(Self {
            catalog,
            cart: CartManager::new(),
            cart_open: false,
            cart_tx,
            auth: AuthService::new(repo)?,
            notifier,
        })
    }

    /// Create a storefront over the seeded catalog and the configured store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store cannot be opened, or
    /// `AppError::Auth` if the stored session cannot be read.
    pub fn from_config(config: &StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let store = db::open_store(config)?;
        let repo = Arc::new(KvSessionRepository::new(store));
        Self::new(Catalog::seeded(), repo, notifier)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Derive a listing.
    #[must_use]
    pub fn browse(&self, query: &CatalogQuery) -> Listing<'_> {
        self.catalog.browse(query)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Current cart totals.
    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Subscribe to cart total changes (badge and drawer total).
    #[must_use]
    pub fn subscribe_cart(&self) -> watch::Receiver<CartSummary> {
        self.cart_tx.subscribe()
    }

    /// Add one copy of a catalog book to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BookNotFound` if `id` is not in the catalog.
    pub fn add_to_cart(&mut self, id: BookId) -> Result<()> {
        let Some(book) = self.catalog.find(id) else {
            return self.surface(Err(AppError::BookNotFound(id)));
        };
        self.cart.add_to_cart(book);
        self.publish_cart();
        Ok(())
    }

    /// Set a line's quantity; zero removes it.
    pub fn update_quantity(&mut self, id: BookId, quantity: u32) {
        self.cart.update_quantity(id, quantity);
        self.publish_cart();
    }

    /// Plus button: one more copy.
    pub fn increment(&mut self, id: BookId) {
        self.cart.increment(id);
        self.publish_cart();
    }

    /// Minus button: one fewer copy, removing the line at zero.
    pub fn decrement(&mut self, id: BookId) {
        self.cart.decrement(id);
        self.publish_cart();
    }

    /// Remove a line.
    pub fn remove_from_cart(&mut self, id: BookId) {
        self.cart.remove_from_cart(id);
        self.publish_cart();
    }

    /// Open the cart drawer.
    pub const fn open_cart(&mut self) {
        self.cart_open = true;
    }

    /// Close the cart drawer.
    pub const fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Acknowledge the order and close the drawer.
    ///
    /// An empty cart cannot be checked out: nothing is notified and `None` is
    /// returned. The cart contents are kept either way.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Option<OrderConfirmation> {
        if self.cart.is_empty() {
            tracing::debug!("Checkout ignored: cart is empty");
            return None;
        }

        let summary = self.cart.summary();
        let confirmation = OrderConfirmation {
            item_count: summary.item_count,
            total_price: summary.total_price,
        };
        self.notifier.notify(confirmation.notification());
        self.cart_open = false;

        tracing::info!(
            items = confirmation.item_count,
            total = %confirmation.total_price,
            "Checkout acknowledged"
        );
        Some(confirmation)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Subscribe to session changes.
    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.auth.subscribe()
    }

    /// The stored session, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session cannot be read.
    pub fn current_session(&self) -> Result<Option<Session>> {
        let session = self.auth.current_session();
        self.surface(session.map_err(AppError::from))
    }

    /// Which account view to show.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session cannot be read.
    pub fn account_view(&self) -> Result<AccountView> {
        Ok(AccountView::from(self.current_session()?.as_ref()))
    }

    /// Submit the sign-up form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` when validation fails, the email is taken or
    /// the store fails. Shopper errors are also notified.
    pub fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        let session = self.surface(self.auth.sign_up(email, password, name).map_err(AppError::from))?;
        self.notifier.notify(Notification::info(
            "Account created successfully!",
            format!("Welcome to BookNest, {}", session.name),
        ));
        Ok(session)
    }

    /// Submit the sign-in form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` when validation fails, the credentials do not
    /// match or the store fails. Shopper errors are also notified.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.surface(self.auth.sign_in(email, password).map_err(AppError::from))?;
        self.notifier.notify(Notification::info(
            "Signed in successfully!",
            format!("Welcome back, {}", session.name),
        ));
        Ok(session)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session cannot be cleared.
    pub fn sign_out(&self) -> Result<()> {
        self.surface(self.auth.sign_out().map_err(AppError::from))?;
        self.notifier
            .notify(Notification::info("Signed out successfully", "See you next time!"));
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn publish_cart(&self) {
        let summary = self.cart.summary();
        self.cart_tx.send_if_modified(|published| {
            if *published == summary {
                false
            } else {
                *published = summary;
                true
            }
        });
    }

    /// Notify shopper errors and log the rest, passing the result through.
    fn surface<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            match err.notification() {
                Some(notification) => self.notifier.notify(notification),
                None => tracing::error!(error = %err, "Storefront operation failed"),
            }
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::services::notify::{RecordingNotifier, Severity};

    fn storefront() -> (Storefront, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let repo = Arc::new(KvSessionRepository::new(MemoryStore::new()));
        let storefront =
            Storefront::new(Catalog::seeded(), repo, Arc::new(notifier.clone())).unwrap();
        (storefront, notifier)
    }

    #[test]
    fn test_checkout_with_empty_cart_is_noop() {
        let (mut storefront, notifier) = storefront();
        storefront.open_cart();

        assert_eq!(storefront.checkout(), None);
        assert!(notifier.notifications().is_empty());
        assert!(storefront.is_cart_open());
    }

    #[test]
    fn test_checkout_matches_cart_and_keeps_contents() {
        let (mut storefront, notifier) = storefront();
        storefront.add_to_cart(BookId::new(1)).unwrap();
        storefront.add_to_cart(BookId::new(1)).unwrap();
        storefront.add_to_cart(BookId::new(3)).unwrap();
        storefront.open_cart();
        let before = storefront.cart_summary();

        let confirmation = storefront.checkout().unwrap();

        assert_eq!(confirmation.item_count, before.item_count);
        assert_eq!(confirmation.total_price, before.total_price);
        assert_eq!(
            notifier.last().unwrap().description,
            "Your order of 3 items for $66.97 has been confirmed."
        );
        assert!(!storefront.is_cart_open());
        assert_eq!(storefront.cart_summary(), before);
    }

    #[test]
    fn test_unknown_book_is_notified() {
        let (mut storefront, notifier) = storefront();
        let err = storefront.add_to_cart(BookId::new(77)).unwrap_err();

        assert!(matches!(err, AppError::BookNotFound(_)));
        assert_eq!(notifier.last().unwrap().severity, Severity::Destructive);
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_cart_subscribers_see_totals() {
        let (mut storefront, _notifier) = storefront();
        let mut rx = storefront.subscribe_cart();

        storefront.add_to_cart(BookId::new(2)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count, 1);

        // Removing something absent changes nothing.
        storefront.remove_from_cart(BookId::new(5));
        assert!(!rx.has_changed().unwrap());

        storefront.decrement(BookId::new(2));
        assert_eq!(rx.borrow_and_update().badge(), None);
    }

    #[test]
    fn test_account_flow_notifications() {
        let (storefront, notifier) = storefront();
        assert_eq!(storefront.account_view().unwrap(), AccountView::SignIn);

        storefront
            .sign_up("emma@booknest.example", "pw", "Emma")
            .unwrap();
        assert_eq!(
            notifier.last().unwrap().description,
            "Welcome to BookNest, Emma"
        );
        assert!(matches!(
            storefront.account_view().unwrap(),
            AccountView::Profile { ref name, .. } if name == "Emma"
        ));

        storefront.sign_out().unwrap();
        assert_eq!(notifier.last().unwrap().title, "Signed out successfully");
        assert_eq!(storefront.account_view().unwrap(), AccountView::SignIn);

        let err = storefront
            .sign_in("emma@booknest.example", "nope")
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(
            notifier.last().unwrap(),
            Notification::destructive("Sign in failed", "Invalid email or password")
        );

        storefront.sign_in("emma@booknest.example", "pw").unwrap();
        assert_eq!(notifier.last().unwrap().description, "Welcome back, Emma");
    }

    #[test]
    fn test_missing_field_notification() {
        let (storefront, notifier) = storefront();
        assert!(storefront.sign_in("", "pw").is_err());
        assert_eq!(
            notifier.last().unwrap(),
            Notification::destructive("Error", "Please fill in all required fields")
        );
    }

    #[test]
    fn test_signed_out_flag_shows_sign_in() {
        let session = Session {
            email: Email::parse("emma@booknest.example").unwrap(),
            name: "Emma".to_string(),
            is_signed_in: false,
        };
        assert_eq!(AccountView::from(Some(&session)), AccountView::SignIn);
    }
}
