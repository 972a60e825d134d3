//! Core types for BookNest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod genre;
pub mod id;
pub mod price;
pub mod rating;

pub use email::{Email, EmailError};
pub use genre::{Genre, GenreFilter, UnknownGenre};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
