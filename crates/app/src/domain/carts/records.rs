//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{catalog::records::BookUuid, pricing::PriceTerms, users::records::UserUuid};

/// A stored cart line: how many of a book a user has put aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub user_uuid: UserUuid,
    pub book_uuid: BookUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with the book it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub book_uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub quantity: u32,
    pub stock_quantity: u32,
    pub price_terms: PriceTerms,
}

/// A cart line priced at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub book_uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub quantity: u32,
    pub stock_quantity: u32,

    /// Base catalog price.
    pub price: Decimal,

    /// Price a checkout would charge right now.
    pub effective_price: Decimal,

    /// `effective_price` times `quantity`.
    pub line_total: Decimal,
}

impl CartLine {
    pub fn priced(record: CartLineRecord, point_in_time: Timestamp) -> Self {
        let effective_price = record.price_terms.effective_unit_price(point_in_time);

        Self {
            book_uuid: record.book_uuid,
            title: record.title,
            author: record.author,
            quantity: record.quantity,
            stock_quantity: record.stock_quantity,
            price: record.price_terms.price,
            effective_price,
            line_total: effective_price * Decimal::from(record.quantity),
        }
    }
}

/// A user's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLine>,

    /// Sum of line totals, before any discount.
    pub subtotal: Decimal,

    /// Units across all lines; drives the bulk tier at checkout.
    pub total_quantity: u32,
}

impl Cart {
    pub fn new(user_uuid: UserUuid, lines: Vec<CartLine>) -> Self {
        let subtotal = lines.iter().map(|line| line.line_total).sum();
        let total_quantity = lines.iter().map(|line| line.quantity).sum();

        Self {
            user_uuid,
            lines,
            subtotal,
            total_quantity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn record(price: Decimal, sale_price: Option<Decimal>, quantity: u32) -> CartLineRecord {
        CartLineRecord {
            book_uuid: BookUuid::new(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            quantity,
            stock_quantity: 10,
            price_terms: PriceTerms {
                price,
                on_sale: sale_price.is_some(),
                sale_price,
                sale_start: None,
                sale_end: None,
            },
        }
    }

    #[test]
    fn lines_are_priced_at_effective_price() {
        let line = CartLine::priced(record(dec!(10.00), Some(dec!(8.00)), 3), Timestamp::now());

        assert_eq!(line.price, dec!(10.00));
        assert_eq!(line.effective_price, dec!(8.00));
        assert_eq!(line.line_total, dec!(24.00));
    }

    #[test]
    fn cart_sums_lines() {
        let now = Timestamp::now();

        let cart = Cart::new(
            UserUuid::new(),
            vec![
                CartLine::priced(record(dec!(10.00), None, 3), now),
                CartLine::priced(record(dec!(20.00), None, 2), now),
            ],
        );

        assert_eq!(cart.subtotal, dec!(70.00));
        assert_eq!(cart.total_quantity, 5);
        assert!(!cart.is_empty());
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = Cart::new(UserUuid::new(), vec![]);

        assert_eq!(cart.subtotal, Decimal::ZERO);
        assert_eq!(cart.total_quantity, 0);
        assert!(cart.is_empty());
    }
}
