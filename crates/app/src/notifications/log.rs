//! Log-only notifier for development and deployments without SMTP.

use async_trait::async_trait;
use tracing::info;

use super::{NotificationError, Notifier, OrderConfirmation};

#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), NotificationError> {
        info!(
            to = %confirmation.recipient_email,
            claim_code = %confirmation.claim_code,
            total = %confirmation.total,
            items = confirmation.titles.len(),
            "order confirmation (not delivered, smtp disabled)"
        );

        Ok(())
    }
}
