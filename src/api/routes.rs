use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware, require_session};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router<AppState> {
    let session_routes = Router::new()
        // Catalog
        .route("/genres", get(handlers::get_genres))
        .route("/recommend", get(handlers::recommend))
        // View state
        .route("/view", get(handlers::get_view))
        .route("/view/popular", post(handlers::load_popular))
        .route("/view/genres/:genre_id", post(handlers::load_genre))
        .route("/view/search", post(handlers::search))
        .route("/view/recommendation", post(handlers::select_recommendation))
        .route("/view/clear", post(handlers::clear))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/session", get(handlers::get_session))
        .merge(session_routes)
}
