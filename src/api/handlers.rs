use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{AuthSession, GenreListing, MovieSummary, PublicUser, ResolutionOutcome, ViewSnapshot},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub movie: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRecommendationRequest {
    pub movie: MovieSummary,
}

// Handlers

pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = state
        .auth
        .signup(&request.name, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<PublicUser>> {
    let user = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.auth.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(State(state): State<AppState>) -> AppResult<Json<AuthSession>> {
    state
        .auth
        .current_session()
        .await?
        .filter(|session| session.is_authenticated)
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
}

/// Genres, falling back to the static list when the catalog is down
pub async fn get_genres(State(state): State<AppState>) -> Json<GenreListing> {
    Json(state.genres.list().await)
}

/// Resolves a movie name without touching the session's view state
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<ResolutionOutcome>> {
    tracing::info!(request_id = %request_id, query = %params.movie, "Resolving recommendations");

    let outcome = state.resolver.resolve(&params.movie).await?;
    Ok(Json(outcome))
}

pub async fn get_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.view.snapshot().await)
}

pub async fn load_popular(State(state): State<AppState>) -> Json<ViewSnapshot> {
    state.view.load_popular().await;
    Json(state.view.snapshot().await)
}

pub async fn load_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<u32>,
) -> Json<ViewSnapshot> {
    state.view.load_genre(genre_id).await;
    Json(state.view.snapshot().await)
}

pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> Json<ViewSnapshot> {
    tracing::info!(request_id = %request_id, query = %request.query, "Search triggered");

    state.view.search(&request.query).await;
    Json(state.view.snapshot().await)
}

pub async fn select_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SelectRecommendationRequest>,
) -> Json<ViewSnapshot> {
    tracing::info!(
        request_id = %request_id,
        title = %request.movie.title,
        "Recommendation selected"
    );

    state.view.select_recommendation(&request.movie).await;
    Json(state.view.snapshot().await)
}

pub async fn clear(State(state): State<AppState>) -> Json<ViewSnapshot> {
    state.view.clear().await;
    Json(state.view.snapshot().await)
}
