//! Order notifications
//!
//! Confirmations are best-effort: callers dispatch them after the order commits and
//! only log failures.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

mod log;
mod smtp;

pub use log::LogNotifier;
pub use smtp::{SmtpNotifier, SmtpSettings};

/// What a customer is told after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub recipient_email: String,
    pub recipient_name: String,

    /// Code the customer quotes at pickup.
    pub claim_code: String,

    /// Amount due at pickup.
    pub total: Decimal,

    /// Titles of the ordered books, in line order.
    pub titles: Vec<String>,
}

impl OrderConfirmation {
    pub fn subject(&self) -> String {
        format!("Your order is reserved: {}", self.claim_code)
    }

    /// Plain-text message body.
    pub fn body(&self) -> String {
        let titles = self
            .titles
            .iter()
            .map(|title| format!("  - {title}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Hello {name},\n\n\
             Thank you for your order. Present this claim code at the counter to collect it:\n\n\
             {code}\n\n\
             Books:\n{titles}\n\n\
             Total due at pickup: {total}\n",
            name = self.recipient_name,
            code = self.claim_code,
            total = self.total,
        )
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid mailbox address")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell a customer their order is reserved.
    async fn send_order_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), NotificationError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn body_lists_code_total_and_titles() {
        let confirmation = OrderConfirmation {
            recipient_email: "ada@example.com".to_string(),
            recipient_name: "Ada".to_string(),
            claim_code: "AB12CD34".to_string(),
            total: dec!(66.50),
            titles: vec!["Dune".to_string(), "Emma".to_string()],
        };

        let body = confirmation.body();

        assert!(body.contains("Hello Ada"), "greeting missing: {body}");
        assert!(body.contains("AB12CD34"), "claim code missing: {body}");
        assert!(body.contains("  - Dune\n  - Emma"), "titles missing: {body}");
        assert!(body.contains("66.50"), "total missing: {body}");
        assert_eq!(confirmation.subject(), "Your order is reserved: AB12CD34");
    }
}
