use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Success envelope: `{status, data}`. The HTTP status matches `status`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data,
        }
    }

    pub const fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error envelope: `{status, message, details?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details<D: Serialize>(mut self, details: D) -> Self {
        self.details = serde_json::to_value(details)
            .ok()
            .filter(|v| !v.is_null());
        self
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListIssuesQuery {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusTransitionRequest {
    pub new_status_id: i32,
    pub changed_by: i32,
    pub comment: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub user_id: i32,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}
