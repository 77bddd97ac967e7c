use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use uuid::Uuid;

use super::handlers;
use super::AppState;

/// Creates the main router: API routes plus the static single-page form
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .fallback_service(ServeDir::new("frontend"))
        .layer(TraceLayer::new_for_http().make_span_with(make_http_span))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/report", get(handlers::movie_report))
        .route("/sentiment", post(handlers::analyze))
}

/// Span for each HTTP request, tagged with a fresh request id
fn make_http_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %Uuid::new_v4(),
    )
}
