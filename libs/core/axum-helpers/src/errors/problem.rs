//! `application/problem+json` bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::context::RequestContext;

/// Media type for every error body the service produces.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Structured error body.
///
/// `instance` and `traceId` are taken from the [`RequestContext`] of the
/// request being served, so handlers never pass them around.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 404,
///   "title": "Not Found",
///   "type": "https://httpstatuses.com/404",
///   "instance": "/api/users/99",
///   "traceId": "6f1c2d9e-3b7a-4a57-9a55-0e6f5c1d2b11",
///   "detail": "User not found."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// HTTP status code
    pub status: u16,
    /// Short, human-readable summary
    pub title: String,
    /// URI identifying the problem type
    #[serde(rename = "type")]
    pub type_url: String,
    /// Request path that produced the problem
    pub instance: Option<String>,
    /// Correlation id of the request
    pub trace_id: Option<String>,
    /// Occurrence-specific explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Per-field validation messages keyed by camelCase field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        let context = RequestContext::current();
        Self {
            status: status.as_u16(),
            title: title.into(),
            type_url: format!("https://httpstatuses.com/{}", status.as_u16()),
            instance: context.as_ref().map(|ctx| ctx.path.clone()),
            trace_id: context.map(|ctx| ctx.correlation_id.to_string()),
            detail: None,
            errors: None,
        }
    }

    /// Problem titled with the status' canonical reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Error"))
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        response
    }
}

/// Whether the current request may see internal error text.
///
/// Outside a request scope this is `false`.
pub fn expose_error_details() -> bool {
    RequestContext::current().is_some_and(|ctx| ctx.expose_error_details)
}
