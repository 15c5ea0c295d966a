use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::liveness))
        // Token issuing
        .route("/get-token", get(handlers::get_token))
        // Meeting relay; create-meeting answers with and without the trailing slash
        .route("/create-meeting/", post(handlers::create_meeting))
        .route("/create-meeting", post(handlers::create_meeting))
        .route(
            "/validate-meeting/:meeting_id",
            post(handlers::validate_meeting),
        )
        // Browser clients call from other origins
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
