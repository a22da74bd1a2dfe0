use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap::builder::FalseyValueParser;

use crate::mailer::{LogMailer, MailError, Mailer, ResendMailer, UnconfiguredMailer};

#[derive(Parser, Debug, Clone)]
#[command(name = "folio-relay")]
#[command(about = "Relays contact form submissions from the folio site to the mail provider")]
pub struct RelayConfig {
    /// Address to listen on
    #[arg(long, env = "FOLIO_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Resend API key. Without it the relay refuses to send (or logs, in dev mode)
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Recipient of contact notifications
    #[arg(long, env = "CONTACT_EMAIL", default_value = "hello@folio.dev")]
    pub contact_email: String,

    /// Sender shown on notifications; must be a verified provider domain
    #[arg(long, env = "CONTACT_FROM", default_value = "Portfolio <onboarding@resend.dev>")]
    pub contact_from: String,

    #[arg(long, env = "RESEND_BASE_URL", default_value = "https://api.resend.com")]
    pub resend_base_url: String,

    /// Log composed emails instead of sending when no API key is set
    #[arg(long, env = "FOLIO_DEV_MODE", value_parser = FalseyValueParser::new())]
    pub dev_mode: bool,

    /// Timeout for one provider request
    #[arg(long, env = "FOLIO_PROVIDER_TIMEOUT_SECS", default_value_t = 10)]
    pub provider_timeout_secs: u64,
}

impl RelayConfig {
    /// The API key, treating an empty value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Pick the mailer this configuration asks for.
    pub fn mailer(&self) -> Result<Arc<dyn Mailer>, MailError> {
        match self.api_key() {
            Some(key) => Ok(Arc::new(ResendMailer::new(
                &self.resend_base_url,
                key,
                &self.contact_from,
                &self.contact_email,
                Duration::from_secs(self.provider_timeout_secs),
            )?)),
            None if self.dev_mode => Ok(Arc::new(LogMailer::new(&self.contact_email))),
            None => Ok(Arc::new(UnconfiguredMailer)),
        }
    }
}

/// Load `.env` if present. A missing file is fine; a malformed one is not.
pub fn load_env_file() -> Result<bool, dotenvy::Error> {
    dotenvy::dotenv().map(|_| true).or_else(|err| match err {
        dotenvy::Error::Io(_) => Ok(false),
        _ => Err(err),
    })
}
