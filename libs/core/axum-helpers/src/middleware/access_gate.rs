use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::access_gate::{API_PASSWORD_HEADER, AccessGateConfig};
use std::sync::Arc;

use super::access_log::CallerIdentity;
use crate::errors::ErrorCode;

/// Paths served without the shared secret.
const PUBLIC_PATHS: &[&str] = &["/", "/health"];

/// Path prefixes served without the shared secret (API documentation).
const PUBLIC_PREFIXES: &[&str] = &["/swagger-ui", "/api-docs"];

/// Identity recorded for callers that presented the shared secret.
pub const SHARED_SECRET_CALLER: &str = "api-client";

/// Static shared-secret check in front of the API.
#[derive(Clone)]
pub struct AccessGate {
    secret: Arc<str>,
}

impl AccessGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// `None` when the gate is switched off.
    pub fn from_config(config: &AccessGateConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.secret.as_str()))
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        headers
            .get(API_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|supplied| supplied == &*self.secret)
    }
}

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// Shared-secret middleware
///
/// Requires `X-Api-Password` to equal the configured secret on every path
/// except the banner, health and documentation routes. Rejections are a
/// plain-text 401; the handler is never reached.
///
/// # Example
///
/// ```ignore
/// use axum_helpers::middleware::{access_gate, AccessGate};
///
/// let app = Router::new()
///     .nest("/api", api_routes)
///     .layer(axum::middleware::from_fn_with_state(
///         AccessGate::new("user-management-secret"),
///         access_gate,
///     ));
/// ```
pub async fn access_gate(
    State(gate): State<AccessGate>,
    request: Request,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    if !gate.accepts(request.headers()) {
        tracing::debug!(
            error_code = ErrorCode::Unauthorized.code(),
            path = %request.uri().path(),
            "Missing or wrong shared secret"
        );
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let mut response = next.run(request).await;
    response
        .extensions_mut()
        .insert(CallerIdentity::new(SHARED_SECRET_CALLER));
    response
}
