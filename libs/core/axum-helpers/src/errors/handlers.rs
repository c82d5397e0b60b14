use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ProblemDetails};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(error_code = ErrorCode::NotFound.code(), path = %uri.path(), "No route matched");
    ProblemDetails::from_status(StatusCode::NOT_FOUND).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    tracing::debug!(
        error_code = ErrorCode::MethodNotAllowed.code(),
        method = %method,
        path = %uri.path(),
        "Method not supported on route"
    );
    ProblemDetails::from_status(StatusCode::METHOD_NOT_ALLOWED).into_response()
}
