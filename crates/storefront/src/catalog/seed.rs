//! The BookNest launch catalog.

use booknest_core::{BookId, Genre, Price, Rating};

use crate::models::Book;

/// One row of seed data: id, title, author, genre, cents, rating tenths,
/// reviews, image, description, stock.
type SeedRow = (
    i32,
    &'static str,
    &'static str,
    Genre,
    u32,
    u8,
    u32,
    &'static str,
    &'static str,
    u32,
);

const SEED: [SeedRow; 6] = [
    (
        1,
        "The Digital Renaissance",
        "Emma Thompson",
        Genre::Technology,
        2499,
        48,
        127,
        "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=400&h=600&fit=crop",
        "A comprehensive look at how technology is reshaping our world.",
        15,
    ),
    (
        2,
        "Mystic Waters",
        "James Morrison",
        Genre::Fantasy,
        1999,
        46,
        89,
        "https://images.unsplash.com/photo-1518770660439-4636190af475?w=400&h=600&fit=crop",
        "An epic fantasy adventure through mystical realms.",
        8,
    ),
    (
        3,
        "The Art of Minimalism",
        "Sarah Chen",
        Genre::Lifestyle,
        1699,
        49,
        203,
        "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=600&fit=crop",
        "Discover the power of living with less.",
        22,
    ),
    (
        4,
        "Quantum Mechanics Simplified",
        "Dr. Michael Brown",
        Genre::Science,
        2999,
        47,
        156,
        "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400&h=600&fit=crop",
        "Making complex physics accessible to everyone.",
        12,
    ),
    (
        5,
        "Cooking with Passion",
        "Isabella Rodriguez",
        Genre::Cooking,
        2299,
        48,
        178,
        "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=400&h=600&fit=crop",
        "Rediscover the joy of cooking with authentic recipes.",
        18,
    ),
    (
        6,
        "The Entrepreneur's Journey",
        "Alex Johnson",
        Genre::Business,
        2699,
        45,
        92,
        "https://images.unsplash.com/photo-1487058792275-0ad4aaf24ca7?w=400&h=600&fit=crop",
        "From startup to success: a complete guide.",
        14,
    ),
];

/// Build the launch catalog.
///
/// Seed ratings are all within range; a row that is not would be skipped
/// with a warning rather than abort start-up.
#[must_use]
pub fn seed_books() -> Vec<Book> {
    SEED.iter()
        .filter_map(
            |&(id, title, author, genre, cents, tenths, reviews, image, description, stock)| {
                let rating = Rating::from_tenths(tenths)
                    .inspect_err(|e| tracing::warn!(book_id = id, error = %e, "Skipping seed book"))
                    .ok()?;

                Some(Book {
                    id: BookId::new(id),
                    title: title.to_string(),
                    author: author.to_string(),
                    genre,
                    price: Price::from_cents(cents),
                    rating,
                    reviews,
                    image: image.to_string(),
                    description: description.to_string(),
                    stock,
                })
            },
        )
        .collect()
}
