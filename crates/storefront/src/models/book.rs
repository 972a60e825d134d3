//! Book domain type.

use serde::{Deserialize, Serialize};

use booknest_core::{BookId, Genre, Price, Rating};

/// A purchasable book.
///
/// Books are reference data: created once when the catalog is built and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique catalog ID. Higher IDs were added more recently.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub price: Price,
    /// Average review rating.
    pub rating: Rating,
    /// Number of reviews, used as the popularity measure.
    pub reviews: u32,
    /// Cover image URL.
    pub image: String,
    pub description: String,
    /// Copies in stock. Shown to shoppers, not enforced by the cart.
    pub stock: u32,
}

impl Book {
    /// Whether `needle` (already lowercased) occurs in the title or author,
    /// ignoring case.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
    }
}
