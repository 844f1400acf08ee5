//! Catalog Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::classification::{BookFormat, BookGenre},
        pricing::PriceTerms,
    },
    uuids::TypedUuid,
};

/// Book UUID
pub type BookUuid = TypedUuid<BookRecord>;

/// Book Record
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub on_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_start: Option<Timestamp>,
    pub sale_end: Option<Timestamp>,
    pub genre: BookGenre,
    pub format: BookFormat,
    pub publication_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BookRecord {
    pub fn price_terms(&self) -> PriceTerms {
        PriceTerms {
            price: self.price,
            on_sale: self.on_sale,
            sale_price: self.sale_price,
            sale_start: self.sale_start,
            sale_end: self.sale_end,
        }
    }

    /// Unit price a customer would pay at `now`.
    pub fn effective_price(&self, now: Timestamp) -> Decimal {
        self.price_terms().effective_unit_price(now)
    }
}
