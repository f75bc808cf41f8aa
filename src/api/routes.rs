use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::get_status))
        // Recommendations and listing
        .route(
            "/recommend",
            get(handlers::list_titles).post(handlers::recommend),
        )
        // Movie details
        .route("/recommend/:movie_id", get(handlers::get_detail))
        .route("/movie/:movie_id", get(handlers::get_detail))
        .route("/random", get(handlers::random_movie))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}
