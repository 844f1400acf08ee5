//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    notifier::NotifierConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod notifier;
pub(crate) mod observability;
pub(crate) mod server;

/// Bookstore JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bookstore-json", about = "Bookstore JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Order confirmation delivery settings.
    #[command(flatten)]
    pub notifier: NotifierConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_minimal_arguments_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "bookstore-json",
            "--database-url",
            "postgres://localhost/bookstore",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.notifier.smtp_port, 587);
        assert!(config.observability.slow_request_threshold_ms > 0);

        Ok(())
    }

    #[test]
    fn smtp_settings_require_host_and_from() -> TestResult {
        let without_host = ServerConfig::try_parse_from([
            "bookstore-json",
            "--database-url",
            "postgres://localhost/bookstore",
        ])?;

        assert!(without_host.notifier.smtp_settings().is_none());

        let with_host = ServerConfig::try_parse_from([
            "bookstore-json",
            "--database-url",
            "postgres://localhost/bookstore",
            "--smtp-host",
            "mail.example.com",
            "--smtp-from",
            "Bookstore <orders@example.com>",
        ])?;

        let settings = with_host
            .notifier
            .smtp_settings()
            .ok_or("smtp settings missing")?;

        assert_eq!(settings.host, "mail.example.com");
        assert_eq!(settings.from, "Bookstore <orders@example.com>");

        Ok(())
    }
}
