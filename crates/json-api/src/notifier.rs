//! Notifier selection and failure metering.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use bookstore_app::notifications::{
    LogNotifier, NotificationError, Notifier, OrderConfirmation, SmtpNotifier,
};

use crate::{config::notifier::NotifierConfig, observability::observe_notification_failure};

/// Counts failed deliveries before handing the error back to the workflow.
#[derive(Clone)]
pub(crate) struct MeteredNotifier {
    inner: Arc<dyn Notifier>,
}

impl std::fmt::Debug for MeteredNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeteredNotifier").finish_non_exhaustive()
    }
}

impl MeteredNotifier {
    pub(crate) fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Notifier for MeteredNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), NotificationError> {
        let result = self.inner.send_order_confirmation(confirmation).await;

        if result.is_err() {
            observe_notification_failure();
        }

        result
    }
}

/// SMTP when a relay is configured, otherwise log-only.
///
/// # Errors
///
/// Returns an error when the SMTP settings are present but invalid.
pub(crate) fn build_notifier(config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotificationError> {
    let inner: Arc<dyn Notifier> = match config.smtp_settings() {
        Some(settings) => {
            info!(host = %settings.host, port = settings.port, "sending order confirmations over smtp");

            Arc::new(SmtpNotifier::new(settings)?)
        }
        None => {
            info!("no smtp host configured, order confirmations will only be logged");

            Arc::new(LogNotifier::new())
        }
    };

    Ok(Arc::new(MeteredNotifier::new(inner)))
}

#[cfg(test)]
mod tests {
    use bookstore_app::notifications::{MockNotifier, SmtpSettings};
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            recipient_email: "ada@example.com".to_string(),
            recipient_name: "Ada".to_string(),
            claim_code: "ABCD1234".to_string(),
            total: dec!(66.50),
            titles: vec!["Dune".to_string()],
        }
    }

    fn invalid_settings() -> SmtpSettings {
        SmtpSettings {
            host: "localhost".to_string(),
            port: 2525,
            username: None,
            password: None,
            from: "not an address".to_string(),
        }
    }

    fn notifier_config(smtp_host: Option<&str>, smtp_from: &str) -> NotifierConfig {
        NotifierConfig {
            smtp_host: smtp_host.map(ToString::to_string),
            smtp_port: 2525,
            smtp_username: None,
            smtp_password: None,
            smtp_from: smtp_from.to_string(),
        }
    }

    #[test]
    fn falls_back_to_log_notifier_without_host() {
        assert!(build_notifier(&notifier_config(None, "not an address")).is_ok());
    }

    #[test]
    fn rejects_invalid_sender_when_smtp_is_configured() {
        assert!(build_notifier(&notifier_config(Some("localhost"), "not an address")).is_err());
        assert!(
            build_notifier(&notifier_config(
                Some("localhost"),
                "Bookstore <orders@example.com>"
            ))
            .is_ok()
        );
    }

    #[tokio::test]
    async fn passes_success_through() -> TestResult {
        let mut inner = MockNotifier::new();

        inner
            .expect_send_order_confirmation()
            .once()
            .withf(|c| c.claim_code == "ABCD1234")
            .return_once(|_| Ok(()));

        MeteredNotifier::new(Arc::new(inner))
            .send_order_confirmation(confirmation())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn passes_failure_through() {
        let mut inner = MockNotifier::new();

        inner
            .expect_send_order_confirmation()
            .once()
            .return_once(|_| SmtpNotifier::new(invalid_settings()).map(|_| ()));

        let result = MeteredNotifier::new(Arc::new(inner))
            .send_order_confirmation(confirmation())
            .await;

        assert!(result.is_err(), "failure should reach the caller");
    }
}
