use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`.
///
/// Fields default when absent so that a missing field is reported as a
/// validation error rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    pub budget: f64,
}

/// `200` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSuccess {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// `4xx`/`5xx` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFailure {
    pub error: String,
}
