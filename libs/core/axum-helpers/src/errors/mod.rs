pub mod codes;
pub mod handlers;
pub mod problem;
pub mod responses;

pub use codes::ErrorCode;
pub use problem::{PROBLEM_JSON, ProblemDetails, expose_error_details};

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Application error type that can be converted to HTTP responses.
///
/// Every variant renders as [`ProblemDetails`] and is logged with an
/// `error_code` field. Client errors log at `info`/`warn`, server errors at
/// `error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::JsonExtraction.default_message(),
                )
                    .with_detail(e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message(),
                )
                .with_errors(field_messages(&e))
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                ProblemDetails::from_status(StatusCode::NOT_FOUND).with_detail(msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!(
                    error_code = ErrorCode::Conflict.code(),
                    "Conflict: {}",
                    msg
                );
                ProblemDetails::from_status(StatusCode::CONFLICT).with_detail(msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                internal_problem(msg)
            }
        };

        problem.into_response()
    }
}

/// Generic 500 problem; `detail` is only filled when the request allows it.
pub fn internal_problem(detail: impl Into<String>) -> ProblemDetails {
    let problem = ProblemDetails::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError.default_message(),
    );
    if expose_error_details() {
        problem.with_detail(detail)
    } else {
        problem
    }
}

/// Flatten validator output into `{ camelCaseField: [message, ...] }`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect_field_messages(errors, None, &mut out);
    out
}

fn collect_field_messages(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{}", to_camel_case(field)),
            None => to_camel_case(field),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(name.clone()).or_insert_with(Vec::new);
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {name} field is invalid ({}).", error.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_messages(nested, Some(name.as_str()), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_messages(nested, Some(format!("{name}[{index}]").as_str()), out);
                }
            }
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
