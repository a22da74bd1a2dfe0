//! Outbound mail. One attempt per request: no retries, no queue.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::contact::OutgoingEmail;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email service not configured")]
    NotConfigured,
    #[error("mail provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// How a message left the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the provider, with its message id when it returned one.
    Sent { id: Option<String> },
    /// Written to the log instead of sent.
    Logged,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Resend-compatible HTTP provider.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn new(
        base_url: &str,
        api_key: &str,
        from: &str,
        to: &str,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        let body = SendRequest {
            from: &self.from,
            to: [&self.to],
            reply_to: &email.reply_to,
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        let sent: SendResponse = response.json().await?;
        Ok(Delivery::Sent { id: sent.id })
    }
}

/// Dev-mode mailer: logs what would have been sent.
#[derive(Debug, Clone)]
pub struct LogMailer {
    to: String,
}

impl LogMailer {
    pub fn new(to: &str) -> Self {
        Self { to: to.to_owned() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        info!(
            to = %self.to,
            subject = %email.subject,
            reply_to = %email.reply_to,
            "email would be sent:\n{}",
            email.text
        );
        Ok(Delivery::Logged)
    }
}

/// No API key and not in dev mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMailer;

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<Delivery, MailError> {
        warn!("contact request dropped: RESEND_API_KEY is not set");
        Err(MailError::NotConfigured)
    }
}
