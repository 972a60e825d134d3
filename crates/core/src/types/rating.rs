//! Star ratings on a 0-5 scale.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside `0..=5`.
    #[error("rating must be between 0 and 5, got {0}")]
    OutOfRange(Decimal),
}

/// An average review rating between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is negative or above 5.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Create a rating from tenths of a star, e.g. `48` for 4.8.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if the value is above 5.0.
    pub fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        Self::new(Decimal::new(i64::from(tenths), 1))
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Number of filled stars when rendering five stars: the rating rounded down.
    ///
    /// ```
    /// use booknest_core::Rating;
    ///
    /// assert_eq!(Rating::from_tenths(48).unwrap().full_stars(), 4);
    /// assert_eq!(Rating::from_tenths(50).unwrap().full_stars(), 5);
    /// ```
    #[must_use]
    pub fn full_stars(self) -> u8 {
        self.0.floor().to_u8().unwrap_or(0)
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
