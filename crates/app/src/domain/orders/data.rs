//! Order Data

use crate::domain::orders::status::OrderStatus;

/// Order history filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
}
