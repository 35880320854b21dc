use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::seating::SeatingError;
use crate::services::{ApiError, SessionError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::MalformedPayload(errors.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Session(SessionError::Seating(e)) => match e {
                SeatingError::SeatNotFound { .. } => StatusCode::NOT_FOUND,
                SeatingError::SoldOut { .. } | SeatingError::IncompleteSelection { .. } => StatusCode::CONFLICT,
            },
            AppError::Api(ApiError::CircuitOpen) => StatusCode::SERVICE_UNAVAILABLE,
            // Отказы удалённого API с кодом 4xx пробрасываем как есть
            AppError::Api(ApiError::Rejected { status, .. }) => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "success": false, "message": self.to_string() }))).into_response()
    }
}
