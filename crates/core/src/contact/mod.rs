//! Contact request domain: validation and email composition used by the
//! relay, and the form state used by the page.

mod email;
mod form;
mod validate;

pub use email::{OutgoingEmail, compose, escape_html, format_budget};
pub use form::{BudgetLevel, ContactForm, FormStatus, SubmitOutcome};
pub use validate::{
    BUDGET_MAX, ContactError, EMAIL_MAX, MESSAGE_MAX, NAME_MAX, ValidatedContact, validate,
};
