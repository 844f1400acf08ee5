//! Catalog Data

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::catalog::{
    classification::{BookFormat, BookGenre},
    records::BookUuid,
};

/// New Book Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub genre: BookGenre,
    pub format: BookFormat,
    pub publication_date: Option<Timestamp>,
}

/// Book Update Data
///
/// Replaces the mutable commercial fields of a book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    pub price: Decimal,
    pub stock_quantity: u32,
    pub on_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_start: Option<Timestamp>,
    pub sale_end: Option<Timestamp>,
}

/// Catalog listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort \"{0}\"")]
pub struct UnknownBookSort(pub String);

impl BookSort {
    /// Combine a `sort_by` field and an `order` direction. Unrecognised fields fall
    /// back to newest first; an unrecognised direction is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is neither `asc` nor `desc`.
    pub fn from_parts(sort_by: Option<&str>, order: Option<&str>) -> Result<Self, UnknownBookSort> {
        let descending = match order.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => return Err(UnknownBookSort(other.to_string())),
        };

        let sort = match sort_by.map(str::to_ascii_lowercase).as_deref() {
            Some("price") if descending => Self::PriceDesc,
            Some("price") => Self::PriceAsc,
            Some("title") if descending => Self::TitleDesc,
            Some("title") => Self::TitleAsc,
            _ => Self::Newest,
        };

        Ok(sort)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }
}

impl FromStr for BookSort {
    type Err = UnknownBookSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            other => Err(UnknownBookSort(other.to_string())),
        }
    }
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive match against title, author and description.
    pub search: Option<String>,

    /// Only books whose sale is running.
    pub on_sale_only: bool,

    /// Only books filed under this genre.
    pub genre: Option<BookGenre>,

    /// Only books in this format.
    pub format: Option<BookFormat>,

    pub sort: BookSort,
}

impl BookFilter {
    /// The search term as an escaped `ILIKE` pattern, or `None` when blank.
    pub(crate) fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");

        Some(format!("%{escaped}%"))
    }
}
