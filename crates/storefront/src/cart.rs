//! Cart manager.
//!
//! The cart lives only in process memory. It holds at most one line per book,
//! and a line whose quantity reaches zero is removed rather than kept at
//! zero. Totals are recomputed from the lines on every access.
//!
//! Quantities are not checked against [`Book::stock`]; the cart accepts any
//! positive quantity.

use serde::Serialize;
use tracing::instrument;

use booknest_core::{BookId, Price};

use crate::models::Book;

/// One aggregated cart entry.
///
/// Display fields are copied from the book when the line is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    /// Unit price.
    pub price: Price,
    pub image: String,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    fn for_book(book: &Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            image: book.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Item count and total price of a cart at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: u32,
    pub total_price: Price,
}

impl Default for CartSummary {
    fn default() -> Self {
        Self {
            item_count: 0,
            total_price: Price::zero(),
        }
    }
}

impl CartSummary {
    /// Badge text for the cart button; `None` hides the badge.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        (self.item_count > 0).then(|| self.item_count.to_string())
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default)]
pub struct CartManager {
    lines: Vec<CartLine>,
}

impl CartManager {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: BookId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.book_id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one copy of `book`, merging into an existing line.
    #[instrument(skip(self, book), fields(book_id = %book.id))]
    pub fn add_to_cart(&mut self, book: &Book) {
        if let Some(line) = self.line_mut(book.id) {
            line.quantity = line.quantity.saturating_add(1);
            tracing::debug!(quantity = line.quantity, "Incremented cart line");
        } else {
            self.lines.push(CartLine::for_book(book));
            tracing::debug!("Created cart line");
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero removes the line. Updating a book that is not in
    /// the cart does nothing.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: BookId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(id);
            return;
        }
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
    }

    /// One more copy of a book already in the cart.
    pub fn increment(&mut self, id: BookId) {
        if let Some(quantity) = self.line(id).map(|line| line.quantity) {
            self.update_quantity(id, quantity.saturating_add(1));
        }
    }

    /// One fewer copy, clamped at zero (which removes the line).
    pub fn decrement(&mut self, id: BookId) {
        if let Some(quantity) = self.line(id).map(|line| line.quantity) {
            self.update_quantity(id, quantity.saturating_sub(1));
        }
    }

    /// Remove the line for `id`; no-op if absent.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: BookId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.book_id != id);
        if self.lines.len() < before {
            tracing::debug!("Removed cart line");
        }
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_price).sum()
    }

    /// Current totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.total_items(),
            total_price: self.total_price(),
        }
    }

    fn line_mut(&mut self, id: BookId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.book_id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use booknest_core::{Genre, Rating};

    use super::*;
    use crate::catalog::Catalog;

    fn book(id: i32, cents: u32) -> Book {
        Book {
            id: BookId::new(id),
            title: format!("Book {id}"),
            author: "Anon".to_string(),
            genre: Genre::Fantasy,
            price: Price::from_cents(cents),
            rating: Rating::from_tenths(45).unwrap(),
            reviews: 0,
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
            stock: 1,
        }
    }

    #[test]
    fn test_adding_same_book_twice_merges_lines() {
        let mut cart = CartManager::new();
        let book = book(1, 1000);
        cart.add_to_cart(&book);
        cart.add_to_cart(&book);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(book.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_copies_display_fields() {
        let catalog = Catalog::seeded();
        let book = catalog.find(BookId::new(2)).unwrap();
        let mut cart = CartManager::new();
        cart.add_to_cart(book);

        let line = cart.line(book.id).unwrap();
        assert_eq!(line.title, "Mystic Waters");
        assert_eq!(line.author, "James Morrison");
        assert_eq!(line.price, Price::from_cents(1999));
        assert_eq!(line.image, book.image);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = CartManager::new();
        cart.add_to_cart(&book(1, 1000));
        cart.add_to_cart(&book(2, 500));

        cart.update_quantity(BookId::new(1), 0);

        assert_eq!(cart.lines().len(), 1);
        assert!(cart.line(BookId::new(1)).is_none());
        assert!(cart.lines().iter().all(|line| line.quantity > 0));
    }

    #[test]
    fn test_update_quantity_sets_value_without_stock_limit() {
        let mut cart = CartManager::new();
        let book = book(1, 1000);
        cart.add_to_cart(&book);

        cart.update_quantity(book.id, 500);
        assert_eq!(cart.line(book.id).unwrap().quantity, 500);
    }

    #[test]
    fn test_update_quantity_of_absent_book_is_noop() {
        let mut cart = CartManager::new();
        cart.update_quantity(BookId::new(9), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_clamps_and_removes() {
        let mut cart = CartManager::new();
        let book = book(1, 1000);
        cart.add_to_cart(&book);
        cart.increment(book.id);
        assert_eq!(cart.line(book.id).unwrap().quantity, 2);

        cart.decrement(book.id);
        cart.decrement(book.id);
        assert!(cart.is_empty());

        // Nothing left to decrement.
        cart.decrement(book.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut cart = CartManager::new();
        cart.add_to_cart(&book(1, 1000));
        cart.remove_from_cart(BookId::new(2));
        assert_eq!(cart.lines().len(), 1);
        cart.remove_from_cart(BookId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = CartManager::new();
        let a = book(1, 1000);
        let b = book(2, 500);
        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        cart.add_to_cart(&b);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(2500));
        assert_eq!(cart.total_price().to_string(), "$25.00");
        assert_eq!(cart.summary().badge().as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_cart_summary() {
        let cart = CartManager::new();
        assert_eq!(cart.summary(), CartSummary::default());
        assert_eq!(cart.summary().badge(), None);
    }
}
