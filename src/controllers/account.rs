use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::{get, post}, Json, Router};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::{Credentials, SignupForm, UserContext};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/me", get(me))
}

// POST /api/signup - регистрация и сразу вход
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SignupForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;
    state.api.signup(&form).await?;
    let user = state
        .api
        .login(&Credentials { email: form.email, password: form.password })
        .await?;
    tracing::info!(customer_id = user.customer_id, "user signed up");
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/me
async fn me(AuthUser(user): AuthUser) -> Json<UserContext> {
    Json(user)
}
