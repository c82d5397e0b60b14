use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use super::context::CorrelationId;

/// Caller name used when nothing identified the caller.
pub const ANONYMOUS: &str = "anonymous";

/// Who made the request, as established by an inner layer.
///
/// Inner layers attach it to the *response* extensions, since the request
/// has been consumed by the time the access log is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Structured access log
///
/// Emits one `info` event per request after the response is produced:
/// correlation id, method, path, query, status, elapsed milliseconds and
/// caller identity. Must sit inside [`request_context`](super::request_context)
/// to see the correlation id.
pub async fn access_log(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();
    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let user = response
        .extensions()
        .get::<CallerIdentity>()
        .map(CallerIdentity::as_str)
        .unwrap_or(ANONYMOUS);

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        query = %query,
        status = response.status().as_u16(),
        elapsed_ms,
        user,
        "request completed"
    );

    response
}
