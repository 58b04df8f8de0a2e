// SMTP MailSender Implementation (lettre)

use async_trait::async_trait;
use birthdays_core::domain::EligibleContact;
use birthdays_core::error::{AppError, Result};
use birthdays_core::port::MailSender;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// SMTP connection settings, read from the environment by the
/// composition root
///
/// | Variable                  | Required | Description                    |
/// |---------------------------|----------|--------------------------------|
/// | `BIRTHDAYS_SMTP_HOST`     | Yes      | SMTP server hostname           |
/// | `BIRTHDAYS_SMTP_PORT`     | No       | Port (default: 587, STARTTLS)  |
/// | `BIRTHDAYS_SMTP_USER`     | No       | Username for authentication    |
/// | `BIRTHDAYS_SMTP_PASSWORD` | No       | Password for authentication    |
/// | `BIRTHDAYS_SMTP_FROM`     | Yes      | Sender address                 |
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("BIRTHDAYS_SMTP_HOST")
            .map_err(|_| AppError::Config("BIRTHDAYS_SMTP_HOST is not set".to_string()))?;
        let from = std::env::var("BIRTHDAYS_SMTP_FROM")
            .map_err(|_| AppError::Config("BIRTHDAYS_SMTP_FROM is not set".to_string()))?;

        let port = std::env::var("BIRTHDAYS_SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        Ok(Self {
            host,
            port,
            username: std::env::var("BIRTHDAYS_SMTP_USER").ok(),
            password: std::env::var("BIRTHDAYS_SMTP_PASSWORD").ok(),
            from,
        })
    }
}

pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid sender address: {}", config.from)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Mail(format!("SMTP relay setup failed: {}", e)))?
            .port(config.port);

        if let (Some(user), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Render the reminder message body for one contact
fn render_body(contact: &EligibleContact) -> String {
    format!(
        "Happy birthday!\n\n\
         We send you our warmest wishes on your birthday ({}).\n\n\
         This reminder was generated automatically.",
        contact.birth_date.format("%B %-d")
    )
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send_reminder(&self, to: &str, contact: &EligibleContact) -> Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|_| AppError::Mail(format!("Invalid recipient address: {}", to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Happy Birthday!")
            .body(render_body(contact))
            .map_err(|e| AppError::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send failed: {}", e)))?;

        debug!(contact_id = contact.contact_id, "Reminder mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_the_birthday_in_the_body() {
        let contact = EligibleContact {
            contact_id: 1,
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            email: "a@example.org".to_string(),
            is_debug_redirected: false,
        };

        let body = render_body(&contact);
        assert!(body.contains("June 15"));
    }

    #[test]
    fn config_requires_host_and_from() {
        // Run in one test to avoid env races across parallel tests
        std::env::remove_var("BIRTHDAYS_SMTP_HOST");
        std::env::remove_var("BIRTHDAYS_SMTP_FROM");
        assert!(SmtpConfig::from_env().is_err());

        std::env::set_var("BIRTHDAYS_SMTP_HOST", "mail.example.org");
        std::env::set_var("BIRTHDAYS_SMTP_FROM", "noreply@example.org");
        let config = SmtpConfig::from_env().unwrap();
        assert_eq!(config.port, 587);

        std::env::remove_var("BIRTHDAYS_SMTP_HOST");
        std::env::remove_var("BIRTHDAYS_SMTP_FROM");
    }
}
