use axum::http::{HeaderName, HeaderValue, Method, header};
use core_config::access_gate::API_PASSWORD_HEADER;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::middleware::context::X_CORRELATION_ID;

/// Creates a CORS layer for the given origins.
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The listed allowed origins
/// - The methods the API serves (GET, POST, PUT, DELETE, OPTIONS)
/// - Request headers: Content-Type, Accept, X-Api-Password, X-Correlation-Id
/// - Exposed headers: Location, X-Correlation-Id
/// - 1 hour max age
///
/// # Errors
/// `InvalidInput` when the list is empty or an origin is not a valid header value.
pub fn create_cors_layer(origins: &[String]) -> io::Result<CorsLayer> {
    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(API_PASSWORD_HEADER),
            X_CORRELATION_ID,
        ])
        .expose_headers([header::LOCATION, X_CORRELATION_ID])
        .max_age(Duration::from_secs(3600)))
}
