//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::AvailabilityError;

/// One field-level validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Request field the issue refers to (wire name, e.g. "locationId")
    pub field: String,
    /// Human-readable description
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level issues for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldIssue>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request rejected before any store access
    Validation(Vec<FieldIssue>),
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION", "Validierung fehlgeschlagen").with_details(issues),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Internal(msg) => {
                error!(detail = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "Interner Serverfehler"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::OfferingNotFound
            | AvailabilityError::LocationNotFound
            | AvailabilityError::StaffNotFound
            | AvailabilityError::NoStaffMembers => AppError::NotFound(err.to_string()),
            AvailabilityError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}
