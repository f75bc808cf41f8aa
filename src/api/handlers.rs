use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{LoadStatus, MovieDetails, TitleListing},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Missing names resolve like an empty query
    #[serde(default)]
    pub movie: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    #[serde(default)]
    pub search: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Readiness of the loaded movie artifacts
pub async fn get_status(State(state): State<AppState>) -> Json<LoadStatus> {
    Json(state.service.status())
}

/// Recommend movies similar to the requested title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    let Json(request) = payload?;

    tracing::info!(
        request_id = %request_id,
        movie = %request.movie,
        "Processing recommendation request"
    );

    let movies = state.service.recommend(&request.movie).await?;

    tracing::info!(
        request_id = %request_id,
        results = movies.len(),
        "Recommendations completed"
    );

    Ok(Json(movies))
}

/// List catalog titles, optionally filtered by a case-insensitive search
pub async fn list_titles(
    State(state): State<AppState>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<TitleListing>> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(state.title_list_limit);
    let listing = state.service.list_titles(limit, &params.search)?;
    Ok(Json(listing))
}

/// Full details for one movie
pub async fn get_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetails>> {
    let movie = state.service.get_detail(movie_id).await?;
    Ok(Json(movie))
}

/// Details for a randomly chosen movie
pub async fn random_movie(State(state): State<AppState>) -> AppResult<Json<MovieDetails>> {
    let movie = state.service.get_random_detail().await?;
    Ok(Json(movie))
}
