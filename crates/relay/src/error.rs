use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::contact::ContactError;
use folio_protocol::ContactFailure;

use crate::mailer::MailError;

pub type AppResult<T> = Result<T, AppError>;

/// An error response: the status plus the message shown to the client.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ContactFailure {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::NotConfigured => Self::internal("Email service not configured"),
            err => {
                tracing::error!(error = %err, "mail provider error");
                Self::internal("Failed to send email")
            }
        }
    }
}
