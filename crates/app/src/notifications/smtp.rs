//! SMTP notifier.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::debug;

use super::{NotificationError, Notifier, OrderConfirmation};

/// Connection details for the outgoing mail relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,

    /// `From` mailbox, e.g. `Bookstore <orders@example.com>`.
    pub from: String,
}

/// Sends order confirmations through an SMTP relay using STARTTLS.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Build the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host or the `from` mailbox is invalid.
    pub fn new(settings: SmtpSettings) -> Result<Self, NotificationError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port);

        if let Some(username) = settings.username {
            builder = builder.credentials(Credentials::new(
                username,
                settings.password.unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: settings.from.parse()?,
        })
    }

    fn message(&self, confirmation: &OrderConfirmation) -> Result<Message, NotificationError> {
        let to = Mailbox::new(
            Some(confirmation.recipient_name.clone()),
            confirmation.recipient_email.parse()?,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(confirmation.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(confirmation.body())?;

        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), NotificationError> {
        let message = self.message(&confirmation)?;

        let response = self.transport.send(message).await?;

        debug!(
            to = %confirmation.recipient_email,
            code = response.code().to_string(),
            "order confirmation delivered"
        );

        Ok(())
    }
}
