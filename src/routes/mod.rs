use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::identity::identity_middleware;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod dashboard;
pub mod movies;
pub mod reviews;
pub mod watchlist;

/// Creates the application router with all routes and middleware
///
/// Request ids are assigned before the trace layer opens its span so the
/// span can carry them; identity resolution runs inside the span.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(middleware::from_fn(identity_middleware)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/movies", get(movies::list))
        .route("/movies/filter", get(movies::filtered))
        .route("/movies/:movie_id", get(movies::detail))
        // Reviews
        .route("/movies/:movie_id/reviews", post(reviews::submit))
        // Watch list
        .route("/my-list", get(watchlist::view))
        .route("/my-list", post(watchlist::add))
        .route("/my-list/:movie_id", delete(watchlist::remove))
        // Dashboard
        .route("/dashboard", get(dashboard::show))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
