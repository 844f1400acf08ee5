//! Order Builder
//!
//! Turns locked cart lines into an immutable, priced [`OrderDraft`].

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    catalog::records::BookRecord,
    orders::{errors::OrdersServiceError, records::OrderUuid},
    pricing::{DiscountTiers, Quote, quote},
    users::records::UserUuid,
};

/// One line of a draft, priced at the checkout instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    /// The locked catalog row the line was built from.
    pub book: BookRecord,

    /// Units requested; never above the book's stock.
    pub quantity: u32,

    /// Effective unit price at the checkout instant.
    pub price_at_purchase: Decimal,
}

/// A fully priced order that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    uuid: OrderUuid,
    user_uuid: UserUuid,
    lines: Vec<DraftLine>,
    quote: Quote,
}

impl OrderDraft {
    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    pub fn user_uuid(&self) -> UserUuid {
        self.user_uuid
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> Decimal {
        self.quote.subtotal
    }

    pub fn discount(&self) -> Decimal {
        self.quote.discount
    }

    pub fn total(&self) -> Decimal {
        self.quote.total
    }

    pub fn tiers(&self) -> DiscountTiers {
        self.quote.tiers
    }

    pub fn titles(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.book.title.clone()).collect()
    }
}

/// Accumulates validated lines for one checkout.
#[derive(Debug)]
pub struct OrderBuilder {
    user_uuid: UserUuid,
    point_in_time: Timestamp,
    lines: Vec<DraftLine>,
    subtotal: Decimal,
    total_quantity: u32,
}

impl OrderBuilder {
    pub fn new(user_uuid: UserUuid, point_in_time: Timestamp) -> Self {
        Self {
            user_uuid,
            point_in_time,
            lines: Vec::new(),
            subtotal: Decimal::ZERO,
            total_quantity: 0,
        }
    }

    /// Add a cart line, freezing the book's effective price at the checkout instant.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InsufficientStock`] if the book cannot cover
    /// `quantity`.
    pub fn add_line(&mut self, book: BookRecord, quantity: u32) -> Result<(), OrdersServiceError> {
        if quantity > book.stock_quantity {
            return Err(OrdersServiceError::InsufficientStock(book.uuid));
        }

        let price_at_purchase = book.effective_price(self.point_in_time);

        self.subtotal += price_at_purchase * Decimal::from(quantity);
        self.total_quantity = self.total_quantity.saturating_add(quantity);

        self.lines.push(DraftLine {
            book,
            quantity,
            price_at_purchase,
        });

        Ok(())
    }

    /// Price the basket and freeze it.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::EmptyCart`] when no lines were added.
    pub fn build(self, completed_order_count: u64) -> Result<OrderDraft, OrdersServiceError> {
        if self.lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        Ok(OrderDraft {
            uuid: OrderUuid::new(),
            user_uuid: self.user_uuid,
            quote: quote(self.subtotal, self.total_quantity, completed_order_count),
            lines: self.lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::catalog::{
        classification::{BookFormat, BookGenre},
        records::BookUuid,
    };

    use super::*;

    fn book(title: &str, price: Decimal, stock: u32) -> BookRecord {
        let now = Timestamp::now();

        BookRecord {
            uuid: BookUuid::new(),
            title: title.to_string(),
            author: "Anon".to_string(),
            isbn: String::new(),
            description: String::new(),
            price,
            stock_quantity: stock,
            on_sale: false,
            sale_price: None,
            sale_start: None,
            sale_end: None,
            genre: BookGenre::Fiction,
            format: BookFormat::Paperback,
            publication_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn bulk_basket_for_new_customer() -> TestResult {
        let mut builder = OrderBuilder::new(UserUuid::new(), Timestamp::now());

        builder.add_line(book("A", dec!(10.00), 10), 3)?;
        builder.add_line(book("B", dec!(20.00), 10), 2)?;

        let draft = builder.build(0)?;

        assert_eq!(draft.subtotal(), dec!(70.00));
        assert_eq!(draft.discount(), dec!(3.50));
        assert_eq!(draft.total(), dec!(66.50));
        assert_eq!(
            draft.tiers(),
            DiscountTiers {
                bulk: true,
                loyalty: false
            }
        );
        assert_eq!(draft.titles(), vec!["A".to_string(), "B".to_string()]);

        Ok(())
    }

    #[test]
    fn bulk_basket_for_loyal_customer() -> TestResult {
        let mut builder = OrderBuilder::new(UserUuid::new(), Timestamp::now());

        builder.add_line(book("A", dec!(10.00), 10), 3)?;
        builder.add_line(book("B", dec!(20.00), 10), 2)?;

        let draft = builder.build(10)?;

        assert_eq!(draft.discount(), dec!(10.15));
        assert_eq!(draft.total(), dec!(59.85));
        assert_eq!(
            draft.tiers(),
            DiscountTiers {
                bulk: true,
                loyalty: true
            }
        );

        Ok(())
    }

    #[test]
    fn lines_freeze_sale_price_inside_window() -> TestResult {
        let now = Timestamp::now();
        let mut builder = OrderBuilder::new(UserUuid::new(), now);

        let on_sale = BookRecord {
            on_sale: true,
            sale_price: Some(dec!(8.00)),
            sale_start: Some(now - SignedDuration::from_hours(1)),
            sale_end: Some(now + SignedDuration::from_hours(1)),
            ..book("A", dec!(10.00), 5)
        };

        builder.add_line(on_sale, 1)?;

        let draft = builder.build(0)?;

        assert_eq!(
            draft.lines().first().map(|line| line.price_at_purchase),
            Some(dec!(8.00))
        );
        assert_eq!(draft.total(), dec!(8.00));

        Ok(())
    }

    #[test]
    fn quantity_above_stock_names_the_book() {
        let mut builder = OrderBuilder::new(UserUuid::new(), Timestamp::now());
        let short = book("A", dec!(10.00), 2);
        let uuid = short.uuid;

        let result = builder.add_line(short, 3);

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock(book)) if book == uuid),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn empty_builder_is_an_empty_cart() {
        let result = OrderBuilder::new(UserUuid::new(), Timestamp::now()).build(0);

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }
}
