use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::not_found;
use crate::http::{cors::create_cors_layer, security::security_headers};
use crate::middleware::{
    AccessGate, RequestContextConfig, X_CORRELATION_ID, access_gate, access_log,
    catch_panic_layer, request_context,
};
use axum::{Router, body::Body, http::Request, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Cross-cutting behaviour applied by [`create_router`].
#[derive(Clone, Default)]
pub struct RouterOptions {
    /// Put internal error text into 500 problem `detail`
    pub expose_error_details: bool,
    /// Serve Swagger UI at `/swagger-ui` and the document at `/api-docs/openapi.json`
    pub enable_docs: bool,
    /// Shared-secret gate; `None` leaves every route open
    pub access_gate: Option<AccessGate>,
    /// Allowed CORS origins; empty installs no CORS layer
    pub cors_allowed_origins: Vec<String>,
}

/// Creates the application router with the full request pipeline.
///
/// Routes:
/// - `apis` nested under `/api`
/// - `root` merged at the top level (banner, health)
/// - Swagger UI when `options.enable_docs` is set
/// - a problem-details 404 fallback
///
/// Layers, outermost first:
/// 1. correlation id / request context
/// 2. CORS (when origins are configured)
/// 3. compression
/// 4. security headers
/// 5. access log
/// 6. trace span tagged with the correlation id
/// 7. panic to 500 problem
/// 8. shared-secret gate
///
/// The correlation layer is outermost so gate rejections and caught panics
/// still carry `X-Correlation-Id`.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Errors
/// Returns `InvalidInput` if a CORS origin is not a valid header value.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::{create_router, RouterOptions};
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/users", users_router);
/// let router = create_router::<ApiDoc>(api_routes, Router::new(), &RouterOptions::default())?;
/// ```
pub fn create_router<T>(apis: Router, root: Router, options: &RouterOptions) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let mut router = Router::new();

    if options.enable_docs {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()));
    }

    router = router.nest("/api", apis).merge(root).fallback(not_found);

    if let Some(gate) = options.access_gate.clone() {
        router = router.layer(middleware::from_fn_with_state(gate, access_gate));
    } else {
        tracing::warn!("Access gate disabled; API routes are open");
    }

    router = router
        .layer(catch_panic_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let correlation_id = req
                        .headers()
                        .get(&X_CORRELATION_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        correlation_id = %correlation_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(middleware::from_fn(access_log))
        .layer(middleware::from_fn(security_headers))
        // Compresses responses based on the Accept-Encoding header
        .layer(CompressionLayer::new());

    if !options.cors_allowed_origins.is_empty() {
        info!(
            "CORS configured with allowed origins: {}",
            options.cors_allowed_origins.join(",")
        );
        router = router.layer(create_cors_layer(&options.cors_allowed_origins)?);
    }

    Ok(router.layer(middleware::from_fn_with_state(
        RequestContextConfig {
            expose_error_details: options.expose_error_details,
        },
        request_context,
    )))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// This provides:
/// - Graceful shutdown on SIGINT/SIGTERM
/// - A cleanup future run once shutdown starts, bounded by `shutdown_timeout`
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// create_production_app(
///     router,
///     &config,
///     Duration::from_secs(30),
///     async { tracing::info!("nothing to release") },
/// ).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_shutdown().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator.clone()))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Unblock the cleanup task if the server stopped for another reason
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    struct EmptyDoc;

    fn options(enable_docs: bool) -> RouterOptions {
        RouterOptions {
            expose_error_details: false,
            enable_docs,
            access_gate: Some(AccessGate::new("pw")),
            cors_allowed_origins: Vec::new(),
        }
    }

    fn build(enable_docs: bool) -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        let root = Router::new().route("/", get(|| async { "banner" }));
        create_router::<EmptyDoc>(apis, root, &options(enable_docs)).unwrap()
    }

    async fn status(router: Router, uri: &str, password: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri(uri);
        if let Some(password) = password {
            builder = builder.header("x-api-password", password);
        }
        router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_api_routes_nested_and_gated() {
        assert_eq!(status(build(false), "/api/ping", Some("pw")).await, StatusCode::OK);
        assert_eq!(
            status(build(false), "/api/ping", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_root_is_public() {
        assert_eq!(status(build(false), "/", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_problem_404() {
        let response = build(false)
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .header("x-api-password", "pw")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            crate::errors::PROBLEM_JSON
        );
    }

    #[tokio::test]
    async fn test_docs_only_when_enabled() {
        assert_eq!(
            status(build(true), "/api-docs/openapi.json", None).await,
            StatusCode::OK
        );
        assert_eq!(
            status(build(false), "/api-docs/openapi.json", None).await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_rejections_carry_correlation_id() {
        let response = build(false)
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .header("x-correlation-id", "gate-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["x-correlation-id"], "gate-1");
    }

    #[test]
    fn test_invalid_cors_origin_fails() {
        let mut opts = options(false);
        opts.cors_allowed_origins = vec!["bad\norigin".to_string()];
        let result = create_router::<EmptyDoc>(Router::new(), Router::new(), &opts);
        assert!(result.is_err());
    }
}
