//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the HTTP layer. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response. Booking rule violations and delivery rejections carry the
//! customer-facing sentence as their message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::BookingValidationError;
use crate::domain::budget::BudgetOutOfRange;
use crate::service::delivery::DeliveryError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "Please enter a valid 10-digit mobile number.",
///     "details": "invalid_phone"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional machine-readable detail, e.g. the validation rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                    |
/// |-----------|-----------------|--------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request / 422          |
/// | 2000–2999 | Not Found       | 404 Not Found                  |
/// | 3000–3999 | Server          | 500 Internal Server Error      |
/// | 4000–4999 | Upstream        | 502 Bad Gateway                |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request was malformed.
    #[error("{0}")]
    InvalidRequest(String),

    /// A booking rule was violated.
    #[error("{0}")]
    Validation(#[from] BookingValidationError),

    /// Estimator budget outside the supported range.
    #[error("{0}")]
    BudgetOutOfRange(#[from] BudgetOutOfRange),

    /// Chat session with the given ID was not found.
    #[error("chat session not found: {0}")]
    SessionNotFound(uuid::Uuid),

    /// Saved event with the given ID was not found.
    #[error("saved event not found: {0}")]
    SavedEventNotFound(uuid::Uuid),

    /// The notification channel rejected the booking.
    #[error("{0}")]
    Delivery(#[from] DeliveryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Validation(_) => 1002,
            Self::BudgetOutOfRange(_) => 1003,
            Self::SessionNotFound(_) => 2001,
            Self::SavedEventNotFound(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Delivery(_) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::BudgetOutOfRange(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SessionNotFound(_) | Self::SavedEventNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Machine-readable detail attached to the response, if any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Validation(e) => Some(e.kind().to_string()),
            Self::Delivery(e) => Some(e.kind().to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
