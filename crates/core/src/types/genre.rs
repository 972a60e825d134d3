//! Book genres and the genre selector.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A genre name that is not part of the catalog's fixed set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

/// The fixed set of genres a book can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Technology,
    Fantasy,
    Lifestyle,
    Science,
    Cooking,
    Business,
}

impl Genre {
    /// Every genre, in selector order.
    pub const ALL: [Self; 6] = [
        Self::Technology,
        Self::Fantasy,
        Self::Lifestyle,
        Self::Science,
        Self::Cooking,
        Self::Business,
    ];

    /// Display name, also the value accepted by [`Genre::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Fantasy => "Fantasy",
            Self::Lifestyle => "Lifestyle",
            Self::Science => "Science",
            Self::Cooking => "Cooking",
            Self::Business => "Business",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Genre names are matched ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGenre(s.to_owned()))
    }
}

/// Genre selection: either the `All` sentinel or one exact genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    /// Name of the sentinel that matches every genre.
    pub const ALL_LABEL: &'static str = "All";

    /// Whether a book of `genre` passes this filter.
    #[must_use]
    pub fn matches(self, genre: Genre) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == genre,
        }
    }

    /// Selector options: `All` followed by every genre.
    #[must_use]
    pub fn options() -> Vec<Self> {
        core::iter::once(Self::All)
            .chain(Genre::ALL.into_iter().map(Self::Only))
            .collect()
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(genre) => genre.fmt(f),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}
