//! Book Classification
//!
//! Genre and format are closed sets stored as snake case text.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown genre \"{0}\"")]
pub struct UnknownGenre(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown format \"{0}\"")]
pub struct UnknownFormat(pub String);

/// Shelf a book is filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookGenre {
    Fiction,
    NonFiction,
    Biography,
    History,
    Science,
    Mystery,
    Fantasy,
    Romance,
    SelfHelp,
    #[default]
    Other,
}

/// Physical or digital edition of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookFormat {
    Hardcover,
    Paperback,
    CollectorEdition,
    SignedEdition,
    DeluxeEdition,
    Ebook,
    #[default]
    Other,
}

/// Lowercase with separators dropped, so `NonFiction`, `non-fiction` and
/// `non_fiction` all compare equal.
fn compact(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl BookGenre {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "fiction",
            Self::NonFiction => "non_fiction",
            Self::Biography => "biography",
            Self::History => "history",
            Self::Science => "science",
            Self::Mystery => "mystery",
            Self::Fantasy => "fantasy",
            Self::Romance => "romance",
            Self::SelfHelp => "self_help",
            Self::Other => "other",
        }
    }
}

impl FromStr for BookGenre {
    type Err = UnknownGenre;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match compact(value).as_str() {
            "fiction" => Ok(Self::Fiction),
            "nonfiction" => Ok(Self::NonFiction),
            "biography" => Ok(Self::Biography),
            "history" => Ok(Self::History),
            "science" => Ok(Self::Science),
            "mystery" => Ok(Self::Mystery),
            "fantasy" => Ok(Self::Fantasy),
            "romance" => Ok(Self::Romance),
            "selfhelp" => Ok(Self::SelfHelp),
            "other" => Ok(Self::Other),
            _ => Err(UnknownGenre(value.to_string())),
        }
    }
}

impl fmt::Display for BookGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BookFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hardcover => "hardcover",
            Self::Paperback => "paperback",
            Self::CollectorEdition => "collector_edition",
            Self::SignedEdition => "signed_edition",
            Self::DeluxeEdition => "deluxe_edition",
            Self::Ebook => "ebook",
            Self::Other => "other",
        }
    }
}

impl FromStr for BookFormat {
    type Err = UnknownFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match compact(value).as_str() {
            "hardcover" => Ok(Self::Hardcover),
            "paperback" => Ok(Self::Paperback),
            "collectoredition" => Ok(Self::CollectorEdition),
            "signededition" => Ok(Self::SignedEdition),
            "deluxeedition" => Ok(Self::DeluxeEdition),
            "ebook" => Ok(Self::Ebook),
            "other" => Ok(Self::Other),
            _ => Err(UnknownFormat(value.to_string())),
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_accepts_any_spelling_of_a_variant() {
        for input in ["NonFiction", "non-fiction", "non_fiction", " nonfiction "] {
            assert_eq!(input.parse::<BookGenre>(), Ok(BookGenre::NonFiction));
        }

        assert_eq!(
            "poetry".parse::<BookGenre>(),
            Err(UnknownGenre("poetry".to_string()))
        );
    }

    #[test]
    fn format_accepts_any_spelling_of_a_variant() {
        assert_eq!(
            "CollectorEdition".parse::<BookFormat>(),
            Ok(BookFormat::CollectorEdition)
        );
        assert_eq!("EBOOK".parse::<BookFormat>(), Ok(BookFormat::Ebook));
        assert!("scroll".parse::<BookFormat>().is_err());
    }

    #[test]
    fn storage_names_parse_back() {
        for genre in [
            BookGenre::Fiction,
            BookGenre::NonFiction,
            BookGenre::SelfHelp,
            BookGenre::Other,
        ] {
            assert_eq!(genre.as_str().parse::<BookGenre>(), Ok(genre));
        }

        for format in [
            BookFormat::Hardcover,
            BookFormat::SignedEdition,
            BookFormat::DeluxeEdition,
        ] {
            assert_eq!(format.as_str().parse::<BookFormat>(), Ok(format));
        }
    }
}
