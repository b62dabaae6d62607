//! Error taxonomy shared by the issue tracker services.

use thiserror::Error;

use crate::domain::validation::FieldError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The resource addressed by the request does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A foreign key in the request body points at a missing row.
    #[error("{entity} not found")]
    ReferenceNotFound {
        entity: &'static str,
        field: &'static str,
        id: i32,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to {operation}")]
    Storage {
        operation: &'static str,
        detail: String,
    },
}

impl ServiceError {
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub const fn reference(entity: &'static str, field: &'static str, id: i32) -> Self {
        Self::ReferenceNotFound { entity, field, id }
    }

    /// Wraps a storage failure, keeping the full error chain for the log.
    pub fn storage(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |err| Self::Storage {
            operation,
            detail: format!("{err:#}"),
        }
    }

    /// Turns a non-empty validation result into an error.
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::Validation(errors))
        }
    }
}
