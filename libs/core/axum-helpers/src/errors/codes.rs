//! Type-safe error codes for structured logs.
//!
//! Each error class the HTTP layer can produce has one code, used as the
//! `error_code` field on log events so failures can be counted and alerted on
//! without parsing messages.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "One or more validation errors occurred.");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request payload failed field validation
    ValidationError,

    /// Path identifier is not a valid resource id
    InvalidId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Shared secret is missing or wrong
    Unauthorized,

    /// Request conflicts with current resource state (e.g., duplicate email)
    Conflict,

    /// HTTP method not supported by the matched route
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// A handler panicked and the panic was caught at the boundary
    UnhandledPanic,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Conflict => "CONFLICT",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::UnhandledPanic => "UNHANDLED_PANIC",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: Client errors
    /// - 5000-5999: Server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::Conflict => 1008,
            Self::MethodNotAllowed => 1012,

            Self::InternalError => 5001,
            Self::UnhandledPanic => 5002,
        }
    }

    /// Default problem title for this error class.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "One or more validation errors occurred.",
            Self::InvalidId => "Invalid resource identifier.",
            Self::JsonExtraction => "Failed to parse request body.",
            Self::NotFound => "Resource not found.",
            Self::Unauthorized => "Unauthorized.",
            Self::Conflict => "Resource conflict.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::InternalError | Self::UnhandledPanic => "An unexpected error occurred.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
