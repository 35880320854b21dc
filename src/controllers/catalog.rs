use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::{Genre, Movie, Review, ReviewForm};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/genres", get(list_genres))
        .route("/movies/{id}/reviews", get(list_reviews).post(create_review))
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub q: Option<String>,
    pub genre_id: Option<i64>,
}

// GET /api/movies?q=&genre_id=
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = state.api.list_movies(params.genre_id).await?;
    let query = params.q.as_deref().unwrap_or_default();
    Ok(Json(movies.into_iter().filter(|m| m.matches(query)).collect()))
}

// GET /api/genres
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Genre>>, AppError> {
    Ok(Json(state.api.list_genres().await?))
}

// GET /api/movies/{id}/reviews
async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.api.list_reviews(movie_id).await?))
}

// POST /api/movies/{id}/reviews
async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(form): Json<ReviewForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;
    let ack = state.api.create_review(user.customer_id, movie_id, &form).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}
