use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{
    Comment, MediaType, Movie, MovieId, NewComment, Recommendation, SearchPage, SearchQuery,
    Theme, UserPreferences,
};
use crate::services::recommendations::{DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_SIMILAR_LIMIT};
use crate::services::GENRES;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub s: String,
    pub page: Option<u32>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub y: Option<String>,
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        Self {
            page: params.page.unwrap_or(1),
            media_type: params.media_type,
            year: params.y.filter(|y| !y.trim().is_empty()),
            ..SearchQuery::new(params.s)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchParams {
    #[serde(default)]
    pub ids: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    #[serde(default)]
    pub exclude: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub active: bool,
}

/// Splits a comma-separated ID list, dropping blanks
fn parse_id_list(raw: &str) -> Vec<MovieId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(MovieId::from)
        .collect()
}

async fn require_movie(state: &AppState, id: &MovieId) -> AppResult<Movie> {
    state
        .catalog
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", id)))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Title search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchPage>> {
    let query = SearchQuery::from(params);
    let page = state.catalog.search_titles(&query).await?;
    Ok(Json(page))
}

/// Batch fetch by comma-separated IDs
pub async fn get_movies(
    State(state): State<AppState>,
    Query(params): Query<BatchParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let ids = parse_id_list(&params.ids);
    if ids.is_empty() {
        return Err(AppError::InvalidInput("No movie IDs given".to_string()));
    }
    Ok(Json(state.catalog.get_many_by_id(&ids).await))
}

/// Single movie details
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let movie = require_movie(&state, &MovieId::from(id)).await?;
    Ok(Json(movie))
}

/// Movies similar to the given one
pub async fn get_similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let reference = require_movie(&state, &MovieId::from(id)).await?;
    let limit = params.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT);
    Ok(Json(state.engine.similar_movies(&reference, limit).await))
}

pub async fn get_featured(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.catalog.featured().await)
}

pub async fn get_latest(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.catalog.latest().await)
}

pub async fn get_genres() -> Json<Vec<&'static str>> {
    Json(GENRES.to_vec())
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Json<Vec<Movie>> {
    Json(state.catalog.by_genre(&genre).await)
}

/// Personalized recommendations for the current preferences
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Json<Vec<Recommendation>> {
    let preferences = state.preferences_snapshot().await;
    let exclude = parse_id_list(&params.exclude);
    let limit = params.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);

    Json(state.engine.recommend(&preferences, &exclude, limit).await)
}

/// Get user preferences
pub async fn get_preferences(State(state): State<AppState>) -> Json<UserPreferences> {
    Json(state.preferences_snapshot().await)
}

pub async fn toggle_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Json<ToggleResponse> {
    let mut inner = state.inner.write().await;
    let active = inner.preferences.toggle_favorite_genre(genre);
    Json(ToggleResponse { active })
}

pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ToggleResponse> {
    let mut inner = state.inner.write().await;
    let active = inner.preferences.toggle_watchlist(MovieId::from(id));
    Json(ToggleResponse { active })
}

pub async fn toggle_liked(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ToggleResponse> {
    let mut inner = state.inner.write().await;
    let active = inner.preferences.toggle_liked(MovieId::from(id));
    Json(ToggleResponse { active })
}

/// Record a view in the recently-viewed history
pub async fn record_view(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let mut inner = state.inner.write().await;
    inner.preferences.add_to_recently_viewed(MovieId::from(id));
    StatusCode::NO_CONTENT
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(request): Json<ThemeRequest>,
) -> Json<UserPreferences> {
    let mut inner = state.inner.write().await;
    inner.preferences.set_theme(request.theme);
    Json(inner.preferences.clone())
}

/// Reviews for a movie, newest first
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Comment>> {
    let inner = state.inner.read().await;
    Json(inner.comments.for_movie(&MovieId::from(id)))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let mut inner = state.inner.write().await;
    let comment = inner.comments.add(MovieId::from(id), request)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    if inner.comments.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Comment {}", id)))
    }
}
