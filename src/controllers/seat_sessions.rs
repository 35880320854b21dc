use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Showing;
use crate::seating::{TargetOutcome, ToggleOutcome};
use crate::services::SessionSnapshot;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seat-sessions", post(open_session))
        .route("/seat-sessions/{id}", get(get_session).delete(cancel_session))
        .route("/seat-sessions/{id}/seats/{row}/{column}", post(toggle_seat))
        .route("/seat-sessions/{id}/target", put(set_target))
        .route("/seat-sessions/{id}/confirm", post(confirm_session))
}

/* ---------- OPEN ---------- */

// Либо готовый сеанс, либо id фильма из каталога
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpenSessionRequest {
    Showing(Showing),
    Movie { movie_id: i64 },
}

// POST /api/seat-sessions
async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let showing = match req {
        OpenSessionRequest::Showing(showing) => showing,
        OpenSessionRequest::Movie { movie_id } => {
            let movie = state
                .api
                .find_movie(movie_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Movie {movie_id} not found")))?;
            Showing::from(&movie)
        }
    };
    // Каталог тоже может прислать мусор, проверяем оба пути
    showing.validate()?;

    let snapshot = state.sessions.open(showing)?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

// GET /api/seat-sessions/{id}
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(id)?))
}

/* ---------- TRANSITIONS ---------- */

#[derive(Debug, Serialize)]
struct ToggleResponse {
    #[serde(flatten)]
    outcome: ToggleOutcome,
    session: SessionSnapshot,
}

// POST /api/seat-sessions/{id}/seats/{row}/{column}
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path((id, row, column)): Path<(Uuid, u16, u16)>,
) -> Result<Json<ToggleResponse>, AppError> {
    let (outcome, session) = state.sessions.toggle_seat(id, row, column)?;
    Ok(Json(ToggleResponse { outcome, session }))
}

#[derive(Debug, Deserialize)]
struct TargetRequest {
    count: u32,
}

#[derive(Debug, Serialize)]
struct TargetResponse {
    #[serde(flatten)]
    outcome: TargetOutcome,
    session: SessionSnapshot,
}

// PUT /api/seat-sessions/{id}/target
async fn set_target(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<TargetRequest>,
) -> Result<Json<TargetResponse>, AppError> {
    let (outcome, session) = state.sessions.set_target_count(id, req.count)?;
    Ok(Json(TargetResponse { outcome, session }))
}

/* ---------- CONFIRM / CANCEL ---------- */

// POST /api/seat-sessions/{id}/confirm
async fn confirm_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let (confirmed, entry) = state.sessions.confirm(id)?;

    let item = confirmed.to_watchlist(user.customer_id, state.config.features.forward_selected_seats);
    match state.api.add_to_watchlist(&item).await {
        Ok(ack) => Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": ack.message.unwrap_or_else(|| "Added to watchlist".to_string()),
                "confirmed": confirmed,
            })),
        )),
        Err(e) => {
            // Корзина не приняла - возвращаем выбор, чтобы можно было повторить
            tracing::warn!(session_id = %id, "add to watchlist failed, session restored: {}", e);
            state.sessions.restore(id, entry);
            Err(e.into())
        }
    }
}

// DELETE /api/seat-sessions/{id}
async fn cancel_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.cancel(id)?;
    Ok(StatusCode::NO_CONTENT)
}
