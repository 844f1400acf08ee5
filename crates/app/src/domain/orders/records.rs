//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::records::BookUuid, orders::status::OrderStatus, pricing::DiscountTiers,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Customer who placed the order.
    pub user_uuid: UserUuid,

    /// Code read out at the counter to collect the order.
    pub claim_code: String,

    pub status: OrderStatus,

    /// Frozen at checkout; never recomputed from the catalog.
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,

    /// Lines in the order they were written.
    pub lines: Vec<OrderLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A frozen copy of what was bought on one order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub book_uuid: BookUuid,

    /// Title as it read at checkout.
    pub title: String,

    pub quantity: u32,

    /// Effective unit price at checkout, sale included.
    pub price_at_purchase: Decimal,
}

impl OrderLineRecord {
    pub fn line_total(&self) -> Decimal {
        self.price_at_purchase * Decimal::from(self.quantity)
    }
}

/// What checkout reports back to the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    /// The order just written.
    pub order_uuid: OrderUuid,

    /// Code the customer quotes at pickup.
    pub claim_code: String,

    /// Pre-discount sum of the lines.
    pub subtotal: Decimal,

    /// Amount taken off; equals `subtotal - total`.
    pub discount: Decimal,

    /// Amount due at pickup.
    pub total: Decimal,

    /// Which tiers produced `discount`.
    pub discounts_applied: DiscountTiers,
}

/// A book ranked by units sold across collected orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestSellerRecord {
    pub book_uuid: BookUuid,
    pub title: String,
    pub author: String,

    /// Units across completed orders only.
    pub total_sold: u64,
}
