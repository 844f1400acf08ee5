//! Order Status

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Where an order is in its lifecycle. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Reserved, awaiting pickup.
    #[default]
    Pending,

    /// Collected at the counter.
    Completed,

    /// Withdrawn by the customer; stock has been returned.
    Cancelled,
}

/// A transition was attempted from a status that does not allow it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("order is {from}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(pub String);

impl OrderStatus {
    /// Pending → Completed.
    ///
    /// # Errors
    ///
    /// Returns an error unless the order is pending.
    pub const fn complete(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Pending => Ok(Self::Completed),
            from @ (Self::Completed | Self::Cancelled) => Err(InvalidTransition { from }),
        }
    }

    /// Pending → Cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error unless the order is pending.
    pub const fn cancel(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Pending => Ok(Self::Cancelled),
            from @ (Self::Completed | Self::Cancelled) => Err(InvalidTransition { from }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_orders_can_complete_or_cancel() {
        assert_eq!(OrderStatus::Pending.complete(), Ok(OrderStatus::Completed));
        assert_eq!(OrderStatus::Pending.cancel(), Ok(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert_eq!(from.complete(), Err(InvalidTransition { from }));
            assert_eq!(from.cancel(), Err(InvalidTransition { from }));
        }
    }

    #[test]
    fn parses_storage_names() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!("Canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
