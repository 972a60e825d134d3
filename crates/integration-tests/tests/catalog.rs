//! Catalog browsing through the storefront.

#![allow(clippy::unwrap_used)]

use booknest_core::{BookId, Genre, GenreFilter};
use booknest_integration_tests::TestContext;
use booknest_storefront::{CatalogQuery, SortKey};

fn ids(query: &CatalogQuery) -> Vec<i32> {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    storefront
        .browse(query)
        .books
        .iter()
        .map(|book| book.id.as_i32())
        .collect()
}

#[test]
fn test_default_listing_is_popularity_over_all_books() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    let listing = storefront.browse(&CatalogQuery::default());

    assert_eq!(listing.heading(), "All Books");
    assert_eq!(listing.count_label(), "6 books found");
    assert_eq!(ids(&CatalogQuery::default()), [3, 5, 4, 1, 6, 2]);
}

#[test]
fn test_text_query_matches_author_case_insensitively() {
    let found = ids(&CatalogQuery::default().text("MORRISON"));
    assert_eq!(found, [2]);
}

#[test]
fn test_text_and_genre_combine() {
    assert_eq!(ids(&CatalogQuery::default().text("the")), [3, 1, 6]);

    let query = CatalogQuery::default()
        .text("the")
        .genre(GenreFilter::Only(Genre::Business));
    assert_eq!(ids(&query), [6]);

    let query = CatalogQuery::default()
        .text("the")
        .genre(GenreFilter::Only(Genre::Science));
    assert!(ids(&query).is_empty());
}

#[test]
fn test_find_by_id() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    let book = storefront.catalog().find(BookId::new(4)).unwrap();
    assert_eq!(book.title, "Quantum Mechanics Simplified");
    assert!(storefront.catalog().find(BookId::new(7)).is_none());
}

#[test]
fn test_every_sort_key_keeps_the_same_books() {
    let mut all = ids(&CatalogQuery::default());
    all.sort_unstable();
    for sort in SortKey::ALL {
        let mut sorted = ids(&CatalogQuery::default().sort(sort));
        sorted.sort_unstable();
        assert_eq!(sorted, all, "{} changed membership", sort.as_str());
    }
}

#[test]
fn test_no_match_is_empty_not_an_error() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    let query = CatalogQuery::default()
        .text("morrison")
        .genre(GenreFilter::Only(Genre::Cooking));
    let listing = storefront.browse(&query);

    assert!(listing.is_empty());
    assert_eq!(listing.heading(), "Cooking Books");
    assert_eq!(listing.count_label(), "0 books found");
}
