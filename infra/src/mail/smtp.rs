//! SMTP mailer backed by the lettre async transport.
//!
//! The transport is built once from `MailConfig` and shared by every send.
//! Recipient addresses are masked in logs.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use lr_core::errors::DomainError;
use lr_core::services::Mailer;

use crate::config::MailConfig;
use crate::InfrastructureError;

/// Sends HTML mail through an authenticated STARTTLS relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport
    ///
    /// # Arguments
    /// * `config` - Relay host, port, credentials and sender address
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Mailer or a configuration error
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid MAIL_FROM address: {}", e))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        tracing::info!("SMTP mailer configured for {}:{}", config.host, config.port);

        Ok(Self { transport, from })
    }

    fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))
    }

    /// Check the relay accepts connections
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| InfrastructureError::Mail(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), DomainError> {
        let message = self.build_message(to, subject, html_body)?;

        self.transport.send(message).await.map_err(|e| {
            tracing::error!("SMTP delivery to {} failed: {}", mask_address(to), e);
            InfrastructureError::Mail(e.to_string())
        })?;

        tracing::info!(to = %mask_address(to), subject, "Email sent");
        Ok(())
    }
}

/// Keep the first character of the local part and the domain
fn mask_address(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from: "Light Room <no-reply@lightroom.example>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_from() {
        let mut config = config();
        config.from = "not an address".to_string();

        let result = SmtpMailer::new(config);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(config()).unwrap();
        let result = mailer.build_message("nobody", "Hi", "<p>hi</p>");
        assert!(matches!(result, Err(InfrastructureError::Mail(_))));
    }

    #[tokio::test]
    async fn test_build_message_sets_html_body() {
        let mailer = SmtpMailer::new(config()).unwrap();
        let message = mailer
            .build_message("ada@example.com", "Verify your Light Room account", "<p>123</p>")
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/html"));
        assert!(raw.contains("To: ada@example.com"));
        assert!(raw.contains("<p>123</p>"));
    }

    #[test]
    fn test_mask_address() {
        assert_eq!(mask_address("ada@example.com"), "a***@example.com");
        assert_eq!(mask_address("broken"), "***");
    }
}
