//! Outbound SMTP email.
//!
//! Services depend on the [`Mailer`] trait, not the SMTP transport, so tests
//! can record sends instead of talking to a relay.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{MailError, SmtpConfig};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// One HTML email, fully addressed.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl OutboundEmail {
    /// All three fields are required; the field name in the error tells the
    /// caller which one was blank.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.trim().is_empty() {
            return Err(MailError::MissingField("email"));
        }
        if self.subject.trim().is_empty() {
            return Err(MailError::MissingField("subject"));
        }
        if self.html.trim().is_empty() {
            return Err(MailError::MissingField("html"));
        }
        Ok(())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpMailer {
    pub fn from_config(smtp: &SmtpConfig) -> Result<Self, MailError> {
        let builder = if smtp.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|err| MailError::Send(err.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        };
        let builder = builder.port(smtp.port);
        let builder = match (&smtp.username, &smtp.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        tracing::info!(
            host = %smtp.host,
            port = smtp.port,
            starttls = smtp.starttls,
            "SMTP mailer initialized"
        );
        Ok(Self {
            transport: Arc::new(builder.build()),
            from: smtp.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        email.validate()?;

        let from: Mailbox = self
            .from
            .parse()
            .map_err(|err| MailError::Send(format!("Invalid sender address: {err}")))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|err| MailError::Send(format!("Invalid recipient '{}': {err}", email.to)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|err| MailError::Send(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| MailError::Send(err.to_string()))?;
        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Stands in when no SMTP settings are configured. Sends fail with a send
/// error at request time instead of the process refusing to start.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        email.validate()?;
        Err(MailError::Send("SMTP is not configured".to_string()))
    }
}
