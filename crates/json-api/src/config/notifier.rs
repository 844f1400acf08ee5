//! Notifier Config

use clap::Args;

use bookstore_app::notifications::SmtpSettings;

/// Order confirmation delivery settings. Confirmations are only logged when no
/// SMTP host is configured.
#[derive(Debug, Args)]
pub struct NotifierConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender mailbox, e.g. `Bookstore <orders@example.com>`
    #[arg(long, env = "SMTP_FROM", default_value = "Bookstore <orders@localhost>")]
    pub smtp_from: String,
}

impl NotifierConfig {
    /// SMTP settings, or `None` when confirmations should only be logged.
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_deref().map(str::trim).filter(|h| !h.is_empty())?;

        Some(SmtpSettings {
            host: host.to_string(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.smtp_from.clone(),
        })
    }
}
