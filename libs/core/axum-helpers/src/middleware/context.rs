//! Correlation ids and the request-scoped context built around them.
//!
//! The [`request_context`] middleware resolves one correlation id per request
//! (the caller's `X-Correlation-Id` when present and non-blank, otherwise a
//! fresh UUID), echoes it on the response, and runs the rest of the stack
//! inside a task-local [`RequestContext`]. Error bodies read that context to
//! fill in `traceId` and `instance` without threading them through handlers.
//!
//! Tokio task-locals are not inherited by spawned tasks. Wrap spawned work in
//! [`RequestContext::scope`] if it needs the context.

use std::fmt;
use std::future::Future;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tokio::task_local;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const X_CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Opaque per-request token used to join log lines and error reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh random correlation id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use the inbound header when it holds a non-blank value, else generate one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(&X_CORRELATION_ID) else {
            return Self::generate();
        };

        match raw.to_str() {
            Ok(value) if !value.trim().is_empty() => Self(value.to_string()),
            Ok(_) => Self::generate(),
            Err(_) => {
                let replacement = Self::generate();
                tracing::debug!(
                    replacement = %replacement,
                    "Discarded X-Correlation-Id holding non-visible-ASCII bytes"
                );
                replacement
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The correlation id of the request currently being served, if any.
    pub fn current() -> Option<Self> {
        RequestContext::current().map(|ctx| ctx.correlation_id)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Facts about the in-flight request that error rendering needs.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: CorrelationId,
    pub path: String,
    pub expose_error_details: bool,
}

impl RequestContext {
    /// Returns the context of the current request if one is in scope.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Execute the provided future with this context in scope.
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(self, fut).await
    }
}

/// Settings for [`request_context`].
#[derive(Debug, Clone, Copy)]
pub struct RequestContextConfig {
    /// Include internal error text in 500 responses (never in production)
    pub expose_error_details: bool,
}

/// Outermost request middleware: correlation id in, correlation id out.
///
/// The resolved id is also written back into the request headers and
/// extensions so inner layers (trace span, access log) agree on it.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use axum_helpers::middleware::{request_context, RequestContextConfig};
///
/// let app = Router::new().layer(middleware::from_fn_with_state(
///     RequestContextConfig { expose_error_details: false },
///     request_context,
/// ));
/// ```
pub async fn request_context(
    State(config): State<RequestContextConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let correlation_id = CorrelationId::from_headers(request.headers());
    let header_value = HeaderValue::from_str(correlation_id.as_str());

    if let Ok(value) = &header_value {
        request
            .headers_mut()
            .insert(X_CORRELATION_ID, value.clone());
    }
    request.extensions_mut().insert(correlation_id.clone());

    let context = RequestContext {
        correlation_id: correlation_id.clone(),
        path: request.uri().path().to_string(),
        expose_error_details: config.expose_error_details,
    };

    let mut response = context.scope(next.run(request)).await;

    match header_value {
        Ok(value) => {
            response.headers_mut().insert(X_CORRELATION_ID, value);
        }
        Err(error) => {
            tracing::error!(
                %error,
                correlation_id = %correlation_id,
                "failed to encode correlation id header"
            );
        }
    }

    response
}
