use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/search", get(handlers::search))
        .route("/movies", get(handlers::get_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .route("/movies/:id/similar", get(handlers::get_similar))
        .route("/featured", get(handlers::get_featured))
        .route("/latest", get(handlers::get_latest))
        .route("/genres", get(handlers::get_genres))
        .route("/genres/:genre", get(handlers::get_genre))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        // Comments
        .route(
            "/movies/:id/comments",
            get(handlers::get_comments).post(handlers::add_comment),
        )
        .route("/comments/:id", delete(handlers::delete_comment))
        // User preferences
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences/genres/:genre", post(handlers::toggle_genre))
        .route("/preferences/watchlist/:id", post(handlers::toggle_watchlist))
        .route("/preferences/liked/:id", post(handlers::toggle_liked))
        .route("/preferences/recently-viewed/:id", post(handlers::record_view))
        .route("/preferences/theme", put(handlers::set_theme))
}
