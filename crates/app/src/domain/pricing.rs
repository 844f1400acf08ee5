//! Pricing Policy
//!
//! Effective unit prices (sale window logic) and the stacked order discount.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};

/// Total basket quantity at which the bulk discount applies (inclusive).
pub const BULK_QUANTITY_THRESHOLD: u32 = 5;

/// Completed order count at which the loyalty discount applies (inclusive).
pub const LOYALTY_COMPLETED_ORDERS_THRESHOLD: u64 = 10;

/// Scale money amounts are rounded to when an order total is fixed.
pub const CURRENCY_SCALE: u32 = 2;

/// 5% off the subtotal.
fn bulk_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// 10% off whatever remains after the bulk discount.
fn loyalty_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// The pricing-relevant fields of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTerms {
    /// Regular list price.
    pub price: Decimal,

    /// Whether a sale has been switched on.
    pub on_sale: bool,

    /// Price while the sale window is open.
    pub sale_price: Option<Decimal>,

    /// First instant of the sale; open-ended when absent.
    pub sale_start: Option<Timestamp>,

    /// Last instant of the sale; open-ended when absent.
    pub sale_end: Option<Timestamp>,
}

impl PriceTerms {
    /// Whether the sale window is open at `now`. Missing bounds are unbounded and
    /// both bounds are inclusive.
    pub fn sale_window_open(&self, now: Timestamp) -> bool {
        self.on_sale
            && self.sale_start.is_none_or(|start| start <= now)
            && self.sale_end.is_none_or(|end| now <= end)
    }

    /// The sale price, if the sale is running at `now`.
    pub fn active_sale_price(&self, now: Timestamp) -> Option<Decimal> {
        self.sale_window_open(now).then_some(self.sale_price).flatten()
    }

    /// The price a customer pays for one unit at `now`.
    pub fn effective_unit_price(&self, now: Timestamp) -> Decimal {
        self.active_sale_price(now).unwrap_or(self.price)
    }
}

/// Which discount tiers fired for a basket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountTiers {
    /// Basket held at least [`BULK_QUANTITY_THRESHOLD`] units.
    pub bulk: bool,

    /// The customer had at least [`LOYALTY_COMPLETED_ORDERS_THRESHOLD`] completed orders.
    pub loyalty: bool,
}

/// Discount computed for a basket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    /// Unrounded amount taken off the subtotal.
    pub amount: Decimal,

    /// Tiers that contributed to `amount`.
    pub tiers: DiscountTiers,
}

/// Compute the stacked discount for a basket.
///
/// The loyalty tier applies to the remainder left after the bulk tier, so the two
/// compound multiplicatively rather than adding up.
pub fn compute_discount(
    subtotal: Decimal,
    total_quantity: u32,
    completed_order_count: u64,
) -> Discount {
    let tiers = DiscountTiers {
        bulk: total_quantity >= BULK_QUANTITY_THRESHOLD,
        loyalty: completed_order_count >= LOYALTY_COMPLETED_ORDERS_THRESHOLD,
    };

    let mut remainder = subtotal;

    if tiers.bulk {
        remainder -= remainder * bulk_rate();
    }

    if tiers.loyalty {
        remainder -= remainder * loyalty_rate();
    }

    Discount {
        amount: subtotal - remainder,
        tiers,
    }
}

/// A priced basket: the figures frozen onto an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Sum of effective unit price times quantity.
    pub subtotal: Decimal,

    /// Always `subtotal - total`.
    pub discount: Decimal,

    /// Amount due, rounded to cents.
    pub total: Decimal,

    /// Tiers that fired.
    pub tiers: DiscountTiers,
}

/// Price a basket.
///
/// The total is rounded to [`CURRENCY_SCALE`] places and the recorded discount is
/// the difference, so `subtotal - discount == total` holds exactly on stored values.
pub fn quote(subtotal: Decimal, total_quantity: u32, completed_order_count: u64) -> Quote {
    let discount = compute_discount(subtotal, total_quantity, completed_order_count);

    let total = (subtotal - discount.amount)
        .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);

    Quote {
        subtotal,
        discount: subtotal - total,
        total,
        tiers: discount.tiers,
    }
}
