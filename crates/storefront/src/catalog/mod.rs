//! Catalog store: the static book list and its filter/sort views.
//!
//! A listing is derived from three independent selections: a free-text
//! query, a genre filter and a sort key. Deriving never fails; a query that
//! matches nothing yields an empty listing.

mod seed;

use std::cmp::Reverse;

use tracing::instrument;

use booknest_core::{BookId, GenreFilter};

use crate::models::Book;

pub use seed::seed_books;

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Most reviewed first.
    #[default]
    Popularity,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Highest ID first, a proxy for most recently added.
    Newest,
}

impl SortKey {
    /// Every sort key, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Popularity,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
        Self::Newest,
    ];

    /// Parse from a selector value. Unknown values fall back to popularity.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Popularity,
        }
    }

    /// Convert to a selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    /// Stable-sort `books` in place by this key.
    ///
    /// Books with equal keys keep their relative order.
    pub fn apply(self, books: &mut [&Book]) {
        match self {
            Self::Popularity => books.sort_by_key(|book| Reverse(book.reviews)),
            Self::PriceLow => books.sort_by_key(|book| book.price),
            Self::PriceHigh => books.sort_by_key(|book| Reverse(book.price)),
            Self::Rating => books.sort_by_key(|book| Reverse(book.rating)),
            Self::Newest => books.sort_by_key(|book| Reverse(book.id)),
        }
    }
}

/// The three user selections a listing is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Free-text search against title and author.
    pub text: String,
    pub genre: GenreFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Set the search text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the genre filter.
    #[must_use]
    pub const fn genre(mut self, genre: GenreFilter) -> Self {
        self.genre = genre;
        self
    }

    /// Set the sort key.
    #[must_use]
    pub const fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// A derived, ordered listing of books.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub books: Vec<&'a Book>,
    pub genre: GenreFilter,
}

impl Listing<'_> {
    /// Section heading, e.g. "All Books" or "Fantasy Books".
    #[must_use]
    pub fn heading(&self) -> String {
        match self.genre {
            GenreFilter::All => "All Books".to_string(),
            GenreFilter::Only(genre) => format!("{genre} Books"),
        }
    }

    /// Result count label, e.g. "1 book found".
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.books.len() {
            1 => "1 book found".to_string(),
            n => format!("{n} books found"),
        }
    }

    /// Number of books in the listing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    /// Create a catalog from a fixed list of books.
    #[must_use]
    pub const fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// The standard BookNest catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_books())
    }

    /// All books, in catalog order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Genre selector options: `All` followed by every genre.
    #[must_use]
    pub fn genres() -> Vec<GenreFilter> {
        GenreFilter::options()
    }

    /// Look up a book by ID.
    #[must_use]
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Books matching both the text query and the genre filter, in catalog
    /// order.
    #[must_use]
    pub fn filter(&self, text: &str, genre: GenreFilter) -> Vec<&Book> {
        let needle = text.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.mentions(&needle) && genre.matches(book.genre))
            .collect()
    }

    /// Derive the listing for a query: filter, then sort.
    #[instrument(skip(self, query), fields(text = %query.text, genre = %query.genre, sort = query.sort.as_str()))]
    pub fn browse(&self, query: &CatalogQuery) -> Listing<'_> {
        let mut books = self.filter(&query.text, query.genre);
        query.sort.apply(&mut books);
        tracing::debug!(matches = books.len(), "Catalog listing derived");

        Listing {
            books,
            genre: query.genre,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use booknest_core::{Genre, Price, Rating};

    use super::*;

    fn ids(listing: &Listing<'_>) -> Vec<i32> {
        listing.books.iter().map(|book| book.id.as_i32()).collect()
    }

    fn book(id: i32, cents: u32, reviews: u32) -> Book {
        Book {
            id: BookId::new(id),
            title: format!("Book {id}"),
            author: "Anon".to_string(),
            genre: Genre::Science,
            price: Price::from_cents(cents),
            rating: Rating::from_tenths(40).unwrap(),
            reviews,
            image: String::new(),
            description: String::new(),
            stock: 1,
        }
    }

    #[test]
    fn test_empty_query_and_all_returns_everything_in_order() {
        let catalog = Catalog::seeded();
        let books = catalog.filter("", GenreFilter::All);
        let expected: Vec<&Book> = catalog.books().iter().collect();
        assert_eq!(books, expected);
    }

    #[test]
    fn test_text_matches_title_or_author_ignoring_case() {
        let catalog = Catalog::seeded();

        let by_title = catalog.browse(&CatalogQuery::default().text("MYSTIC"));
        assert_eq!(ids(&by_title), [2]);

        let by_author = catalog.browse(&CatalogQuery::default().text("sarah chen"));
        assert_eq!(ids(&by_author), [3]);

        let nothing = catalog.browse(&CatalogQuery::default().text("zzz"));
        assert!(nothing.is_empty());
        assert_eq!(nothing.count_label(), "0 books found");
    }

    #[test]
    fn test_text_and_genre_are_combined() {
        let catalog = Catalog::seeded();
        // "the" appears in three titles, only one of them is Technology.
        let query = CatalogQuery::default()
            .text("the")
            .genre(GenreFilter::Only(Genre::Technology));
        let listing = catalog.browse(&query);
        assert_eq!(ids(&listing), [1]);
        assert_eq!(listing.heading(), "Technology Books");
        assert_eq!(listing.count_label(), "1 book found");
    }

    #[test]
    fn test_sort_orders_on_seed() {
        let catalog = Catalog::seeded();
        let order = |sort| ids(&catalog.browse(&CatalogQuery::default().sort(sort)));

        assert_eq!(order(SortKey::Popularity), [3, 5, 4, 1, 6, 2]);
        assert_eq!(order(SortKey::PriceLow), [3, 2, 5, 1, 6, 4]);
        assert_eq!(order(SortKey::PriceHigh), [4, 6, 1, 5, 2, 3]);
        assert_eq!(order(SortKey::Rating), [3, 1, 5, 4, 2, 6]);
        assert_eq!(order(SortKey::Newest), [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_equal_keys_keep_catalog_order() {
        let catalog = Catalog::new(vec![book(1, 1000, 5), book(2, 500, 5), book(3, 1000, 9)]);
        let order = |sort| ids(&catalog.browse(&CatalogQuery::default().sort(sort)));

        assert_eq!(order(SortKey::Popularity), [3, 1, 2]);
        assert_eq!(order(SortKey::PriceLow), [2, 1, 3]);
        assert_eq!(order(SortKey::PriceHigh), [1, 3, 2]);
        // All ratings equal: untouched.
        assert_eq!(order(SortKey::Rating), [1, 2, 3]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let catalog = Catalog::seeded();
        for sort in SortKey::ALL {
            let mut once = catalog.filter("", GenreFilter::All);
            sort.apply(&mut once);
            let mut twice = once.clone();
            sort.apply(&mut twice);
            assert_eq!(once, twice, "sort {} not idempotent", sort.as_str());
        }
    }

    #[test]
    fn test_sort_key_parse_round_trips_and_defaults() {
        for sort in SortKey::ALL {
            assert_eq!(SortKey::parse(sort.as_str()), sort);
        }
        assert_eq!(SortKey::parse("bestselling"), SortKey::Popularity);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.find(BookId::new(4)).unwrap().title, "Quantum Mechanics Simplified");
        assert!(catalog.find(BookId::new(99)).is_none());
    }

    #[test]
    fn test_all_heading() {
        let catalog = Catalog::seeded();
        let listing = catalog.browse(&CatalogQuery::default());
        assert_eq!(listing.heading(), "All Books");
        assert_eq!(listing.count_label(), "6 books found");
        assert_eq!(listing.len(), 6);
    }

    #[test]
    fn test_genre_options_start_with_all() {
        let genres = Catalog::genres();
        assert_eq!(genres.first(), Some(&GenreFilter::All));
        assert_eq!(genres.len(), 7);
    }
}
