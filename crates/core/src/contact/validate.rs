use folio_protocol::ContactRequest;
use thiserror::Error;

pub const NAME_MAX: usize = 200;
pub const EMAIL_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 5_000;
pub const BUDGET_MAX: f64 = 1_000_000.0;

/// Validation failures. The display text is what the client sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
}

/// A request that passed validation: trimmed, capped and with a finite,
/// clamped budget.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub budget: f64,
}

fn cap(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last)
}

fn clamp_budget(budget: f64) -> f64 {
    if budget.is_finite() {
        budget.clamp(0.0, BUDGET_MAX)
    } else {
        0.0
    }
}

pub fn validate(request: &ContactRequest) -> Result<ValidatedContact, ContactError> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    if email.chars().count() > EMAIL_MAX || !is_email_shaped(email) {
        return Err(ContactError::InvalidEmail);
    }
    Ok(ValidatedContact {
        name: cap(name, NAME_MAX),
        email: email.to_owned(),
        message: cap(message, MESSAGE_MAX),
        budget: clamp_budget(request.budget),
    })
}
