use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::{ApiAck, GenreForm, MovieForm, UserForm, UserRecord};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", put(update_user).delete(delete_user))
        .route("/admin/genres", post(create_genre))
        .route("/admin/genres/{id}", put(update_genre).delete(delete_genre))
        .route("/admin/movies", post(create_movie))
        .route("/admin/movies/{id}", put(update_movie).delete(delete_movie))
        .route("/admin/movies/purge", post(purge_movies))
}

/* ---------- USERS ---------- */

async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    Ok(Json(state.api.list_users(&admin.admin_credentials()).await?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<UserForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;
    if form.name.is_none() || form.email.is_none() || form.password.is_none() {
        return Err(AppError::MalformedPayload("Name, email, and password are required".to_string()));
    }
    let ack = state.api.create_user(&form, &admin.admin_credentials()).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    AdminUser(admin): AdminUser,
    Json(form): Json<UserForm>,
) -> Result<Json<ApiAck>, AppError> {
    form.validate()?;
    Ok(Json(state.api.update_user(user_id, &form, &admin.admin_credentials()).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    AdminUser(admin): AdminUser,
) -> Result<Json<ApiAck>, AppError> {
    if user_id == admin.customer_id {
        return Err(AppError::MalformedPayload("Admins cannot delete themselves".to_string()));
    }
    Ok(Json(state.api.delete_user(user_id, &admin.admin_credentials()).await?))
}

/* ---------- GENRES ---------- */

async fn create_genre(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<GenreForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;
    let ack = state.api.create_genre(&form, &admin.admin_credentials()).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i64>,
    AdminUser(admin): AdminUser,
    Json(form): Json<GenreForm>,
) -> Result<Json<ApiAck>, AppError> {
    form.validate()?;
    Ok(Json(state.api.update_genre(genre_id, &form, &admin.admin_credentials()).await?))
}

async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i64>,
    AdminUser(admin): AdminUser,
) -> Result<Json<ApiAck>, AppError> {
    Ok(Json(state.api.delete_genre(genre_id, &admin.admin_credentials()).await?))
}

/* ---------- MOVIES ---------- */

async fn create_movie(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<MovieForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;
    let ack = state.api.create_movie(&form, &admin.admin_credentials()).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
    AdminUser(admin): AdminUser,
    Json(form): Json<MovieForm>,
) -> Result<Json<ApiAck>, AppError> {
    form.validate()?;
    Ok(Json(state.api.update_movie(movie_id, &form, &admin.admin_credentials()).await?))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
    AdminUser(admin): AdminUser,
) -> Result<Json<ApiAck>, AppError> {
    Ok(Json(state.api.delete_movie(movie_id, &admin.admin_credentials()).await?))
}

async fn purge_movies(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<ApiAck>, AppError> {
    tracing::warn!(admin = %admin.email, "purging movie catalog");
    Ok(Json(state.api.purge_movies(&admin.admin_credentials()).await?))
}
