use folio_protocol::{ContactFailure, ContactRequest, ContactSuccess, HapticPulse};

const DEFAULT_BUDGET: f64 = 5_000.0;
const LOW_BUDGET: f64 = 1_000.0;
const HIGH_BUDGET: f64 = 10_000.0;
const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Low,
    Normal,
    High,
}

impl BudgetLevel {
    pub fn of(budget: f64) -> Self {
        if budget < LOW_BUDGET {
            Self::Low
        } else if budget >= HIGH_BUDGET {
            Self::High
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Submitted,
    /// The server's (or transport's) message, shown inline.
    Failed(String),
}

/// Result of one submission attempt as seen by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent { id: Option<String> },
    Failed(String),
}

impl SubmitOutcome {
    /// Interpret the relay's response.
    pub fn from_response(status: u16, body: &str) -> Self {
        if (200..300).contains(&status) {
            let id = serde_json::from_str::<ContactSuccess>(body)
                .ok()
                .and_then(|ok| ok.id);
            return Self::Sent { id };
        }
        match serde_json::from_str::<ContactFailure>(body) {
            Ok(failure) if !failure.error.is_empty() => Self::Failed(failure.error),
            _ => Self::Failed(format!("HTTP error! status: {status}")),
        }
    }

    /// The request never reached the relay.
    pub fn network_error() -> Self {
        Self::Failed(NETWORK_ERROR.to_owned())
    }
}

/// Client-side state of the contact form.
///
/// A failed submission keeps the draft for resubmission; a successful one
/// clears it after [`ContactForm::reset_after_ms`].
#[derive(Debug, Clone)]
pub struct ContactForm {
    draft: ContactRequest,
    status: FormStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            draft: ContactRequest {
                budget: DEFAULT_BUDGET,
                ..ContactRequest::default()
            },
            status: FormStatus::Editing,
        }
    }

    pub fn reset_after_ms(&self) -> u32 {
        3_000
    }

    pub fn draft(&self) -> &ContactRequest {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_low_budget(&self) -> bool {
        self.budget_level() == BudgetLevel::Low
    }

    pub fn budget_level(&self) -> BudgetLevel {
        BudgetLevel::of(self.draft.budget)
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.draft.message = value.into();
    }

    /// Update the budget; returns the pulse to play when it crosses into the
    /// low or high band.
    pub fn set_budget(&mut self, value: f64) -> Option<HapticPulse> {
        let before = self.budget_level();
        self.draft.budget = value;
        match (before, self.budget_level()) {
            (b, BudgetLevel::High) if b != BudgetLevel::High => Some(HapticPulse::Medium),
            (b, BudgetLevel::Low) if b != BudgetLevel::Low => Some(HapticPulse::Light),
            _ => None,
        }
    }

    /// Start a submission. Returns the body to send, or `None` while one is
    /// already in flight or just succeeded.
    pub fn begin_submit(&mut self) -> Option<ContactRequest> {
        match self.status {
            FormStatus::Submitting | FormStatus::Submitted => None,
            FormStatus::Editing | FormStatus::Failed(_) => {
                self.status = FormStatus::Submitting;
                Some(self.draft.clone())
            }
        }
    }

    /// Record the result of the in-flight submission. Returns the delay after
    /// which [`ContactForm::on_reset_elapsed`] should be called, on success.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Option<u32> {
        if self.status != FormStatus::Submitting {
            log::debug!("submit result {outcome:?} without a submission in flight");
            return None;
        }
        match outcome {
            SubmitOutcome::Sent { .. } => {
                self.status = FormStatus::Submitted;
                Some(self.reset_after_ms())
            }
            SubmitOutcome::Failed(message) => {
                self.status = FormStatus::Failed(message);
                None
            }
        }
    }

    pub fn on_reset_elapsed(&mut self) {
        if self.status == FormStatus::Submitted {
            *self = Self::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_name("Ann");
        form.set_email("ann@example.com");
        form.set_message("Hello");
        form
    }

    #[test]
    fn starts_with_default_budget() {
        let form = ContactForm::new();
        assert_eq!(form.draft().budget, 5_000.0);
        assert!(!form.is_low_budget());
        assert_eq!(*form.status(), FormStatus::Editing);
    }

    #[test]
    fn failure_keeps_draft() {
        let mut form = filled();
        let sent = form.begin_submit().unwrap();
        assert!(form.begin_submit().is_none());
        let outcome = SubmitOutcome::from_response(400, r#"{"error":"Invalid email address"}"#);
        assert_eq!(form.finish_submit(outcome), None);
        assert_eq!(
            *form.status(),
            FormStatus::Failed("Invalid email address".into())
        );
        assert_eq!(*form.draft(), sent);
        // Resubmission is allowed.
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn success_resets_later() {
        let mut form = filled();
        form.begin_submit();
        let delay = form.finish_submit(SubmitOutcome::from_response(
            200,
            r#"{"success":true,"message":"Email sent successfully","id":"m_1"}"#,
        ));
        assert_eq!(delay, Some(3_000));
        assert_eq!(form.draft().name, "Ann");
        form.on_reset_elapsed();
        assert!(form.draft().name.is_empty());
        assert_eq!(*form.status(), FormStatus::Editing);
    }

    #[test]
    fn unreadable_error_body() {
        assert_eq!(
            SubmitOutcome::from_response(502, "<html>"),
            SubmitOutcome::Failed("HTTP error! status: 502".into())
        );
        assert_eq!(
            SubmitOutcome::from_response(200, "{}"),
            SubmitOutcome::Sent { id: None }
        );
    }

    #[test]
    fn budget_band_crossings() {
        let mut form = ContactForm::new();
        assert_eq!(form.set_budget(500.0), Some(HapticPulse::Light));
        assert!(form.is_low_budget());
        assert_eq!(form.set_budget(800.0), None);
        assert_eq!(form.set_budget(20_000.0), Some(HapticPulse::Medium));
        assert_eq!(form.set_budget(30_000.0), None);
        assert_eq!(form.set_budget(5_000.0), None);
    }
}
