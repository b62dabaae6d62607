use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::fmt;

use super::types::ErrorBody;
use crate::domain::validation::FieldError;
use crate::services::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    BadRequest {
        message: String,
        details: Option<String>,
    },

    Validation(Vec<FieldError>),

    Conflict(String),

    /// `message` goes to the client, `detail` only to the log.
    InternalError { message: String, detail: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::BadRequest { message, .. } => write!(f, "Bad request: {message}"),
            Self::Validation(errors) => write!(f, "Validation failed: {} field(s)", errors.len()),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError { message, detail } => write!(f, "{message}: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(StatusCode::NOT_FOUND, msg)),
            Self::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(StatusCode::BAD_REQUEST, message).with_details(details),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(StatusCode::BAD_REQUEST, "Validation failed").with_details(errors),
            ),
            Self::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new(StatusCode::CONFLICT, msg)),
            Self::InternalError { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(StatusCode::INTERNAL_SERVER_ERROR, message),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::NotFound { entity, .. } => Self::NotFound(format!("{entity} not found")),
            ServiceError::ReferenceNotFound { entity, field, .. } => Self::BadRequest {
                message: format!("{entity} not found"),
                details: Some(format!("invalid {field}")),
            },
            ServiceError::Conflict(msg) => Self::Conflict(msg),
            ServiceError::Storage { operation, detail } => Self::InternalError {
                message: format!("Failed to {operation}"),
                detail,
            },
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// Response for a handler that panicked; installed on the catch-panic layer.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    ApiError::internal("Internal Server Error", format!("handler panicked: {detail}"))
        .into_response()
}
