//! Catalog browsing.
//!
//! ```bash
//! booknest browse -q dune -g science -s rating --view list
//! ```

use std::convert::Infallible;
use std::io::{self, Write};

use clap::{Args, ValueEnum};

use booknest_core::GenreFilter;
use booknest_storefront::{Book, CatalogQuery, Listing, SortKey, Storefront};

/// How listings are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// One compact line per book.
    #[default]
    Grid,
    /// Full details, including the description.
    List,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Match against title or author, ignoring case
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    /// Genre name, or "All"
    #[arg(short, long, default_value_t = GenreFilter::All)]
    pub genre: GenreFilter,

    /// popularity, price-low, price-high, rating or newest
    #[arg(short, long, default_value = "popularity", value_parser = parse_sort)]
    pub sort: SortKey,

    #[arg(long, value_enum, default_value_t = View::Grid)]
    pub view: View,
}

/// Unknown sort keys fall back to popularity.
fn parse_sort(s: &str) -> Result<SortKey, Infallible> {
    Ok(SortKey::parse(s))
}

/// Render the listing for `args`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run(storefront: &Storefront, args: &BrowseArgs, out: &mut impl Write) -> io::Result<()> {
    let query = CatalogQuery::default()
        .text(args.query.as_str())
        .genre(args.genre)
        .sort(args.sort);
    let listing = storefront.browse(&query);
    render(&listing, args.view, out)
}

fn render(listing: &Listing<'_>, view: View, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} ({})", listing.heading(), listing.count_label())?;

    if listing.is_empty() {
        writeln!(out, "No books found. Try a different search or genre.")?;
        return Ok(());
    }

    for book in &listing.books {
        match view {
            View::Grid => writeln!(
                out,
                "  #{:<3} {:<32} {:<24} {:>8}  {}",
                book.id.to_string(),
                book.title,
                book.author,
                book.price.to_string(),
                stars(book)
            )?,
            View::List => {
                writeln!(out, "#{} {}", book.id, book.title)?;
                writeln!(out, "    by {} | {}", book.author, book.genre)?;
                writeln!(out, "    {} | {}", book.price, stars(book))?;
                writeln!(out, "    {} in stock", book.stock)?;
                writeln!(out, "    {}", book.description)?;
            }
        }
    }
    Ok(())
}

/// Five-star rating bar with the numeric rating and review count.
fn stars(book: &Book) -> String {
    let full = usize::from(book.rating.full_stars());
    format!(
        "{}{} {} ({})",
        "★".repeat(full),
        "☆".repeat(5usize.saturating_sub(full)),
        book.rating,
        book.reviews
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use booknest_core::Genre;
    use booknest_storefront::Catalog;

    use super::*;

    fn render_to_string(query: &CatalogQuery, view: View) -> String {
        let catalog = Catalog::seeded();
        let mut out = Vec::new();
        render(&catalog.browse(query), view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_heading_and_count() {
        let text = render_to_string(
            &CatalogQuery::default().genre(GenreFilter::Only(Genre::Fantasy)),
            View::Grid,
        );
        assert!(text.starts_with("Fantasy Books (1 book found)"));
    }

    #[test]
    fn test_empty_listing_message() {
        let text = render_to_string(&CatalogQuery::default().text("zzz"), View::List);
        assert!(text.contains("0 books found"));
        assert!(text.contains("No books found"));
    }

    #[test]
    fn test_unknown_sort_falls_back() {
        assert_eq!(parse_sort("cheapest"), Ok(SortKey::Popularity));
        assert_eq!(parse_sort("newest"), Ok(SortKey::Newest));
    }

    #[test]
    fn test_stars_floor_rating() {
        let catalog = Catalog::seeded();
        let book = catalog.books().first().unwrap();
        assert!(stars(book).starts_with("★★★★☆ 4.8"));
    }
}
