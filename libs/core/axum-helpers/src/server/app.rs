use super::shutdown::ShutdownCoordinator;
use crate::errors::{error_response, handlers::not_found, messages};
use crate::http::create_cors_layer;
use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request, StatusCode},
    response::Response,
};
use core_config::{cors::CorsConfig, server::ServerConfig};
use std::any::Any;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, document at `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - `{"error": "not found"}` fallback
/// - request id (`x-request-id`, generated when absent, echoed on the response)
/// - request tracing with the request id on the span
/// - CORS per [`CorsConfig`]
/// - panic recovery as a JSON 500
/// - per-request timeout; the handler future is dropped when it fires
///
/// Liveness and readiness routes are merged by the app afterwards.
///
/// # Errors
/// Returns an error if a configured CORS origin is invalid.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().merge(domain_events::router(service));
/// let router = create_router::<ApiDoc>(api_routes, &config.server, &config.cors)?;
/// ```
pub fn create_router<T>(
    apis: Router,
    server_config: &ServerConfig,
    cors_config: &CorsConfig,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(create_cors_layer(cors_config)?)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            server_config.request_timeout,
        ));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(middleware);

    Ok(router)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
}

/// Production server: binds, serves, and shuts down on SIGINT/SIGTERM.
///
/// After the signal the listener stops accepting, in-flight requests get
/// `server_config.shutdown_timeout` to finish, then `cleanup` runs.
///
/// # Example
/// ```ignore
/// create_production_app(app, &config.server, async move {
///     close_postgres(db, "events").await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    serve_with_shutdown(
        listener,
        router,
        coordinator,
        server_config.shutdown_timeout,
        cleanup,
    )
    .await
}

/// Serves `router` on `listener` until `coordinator` shuts down.
///
/// In-flight requests may run for `drain_timeout` after shutdown begins; any
/// still running then are dropped. `cleanup` runs last in both cases.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    drain_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stop_accepting = coordinator.clone();
    let serve = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { stop_accepting.wait().await })
        .into_future();

    let deadline = async move {
        coordinator.wait().await;
        tokio::time::sleep(drain_timeout).await;
    };

    let result = tokio::select! {
        result = serve => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = deadline => {
            warn!("In-flight requests exceeded {:?}, forcing shutdown", drain_timeout);
            Ok(())
        }
    };

    info!("Starting cleanup tasks");
    cleanup.await;
    info!("Cleanup completed");

    result
}
