use axum::{Json, extract::State, extract::rejection::JsonRejection};
use folio_core::contact::{compose, validate};
use folio_protocol::{ContactRequest, ContactSuccess};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::mailer::Delivery;

/// `POST /api/contact`
pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> AppResult<Json<ContactSuccess>> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "unreadable contact body");
        AppError::bad_request("Invalid request body")
    })?;
    let contact = validate(&request)?;
    let email = compose(&contact);

    let response = match state.mailer.send(&email).await? {
        Delivery::Sent { id } => {
            info!(id = id.as_deref().unwrap_or("-"), "contact email sent");
            ContactSuccess {
                success: true,
                message: "Email sent successfully".to_owned(),
                id,
            }
        }
        Delivery::Logged => ContactSuccess {
            success: true,
            message: "Email sent (dev mode)".to_owned(),
            id: None,
        },
    };
    Ok(Json(response))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
