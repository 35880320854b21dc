use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Credentials, UserContext};
use crate::services::ApiError;

/// Текущий пользователь. Берётся из Basic auth и проверяется логином
/// в удалённом API на каждый запрос; глобального хранилища нет.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserContext);

/// Пользователь с правами администратора.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserContext);

fn basic_credentials(parts: &Parts) -> Result<Credentials, AppError> {
    // Получаем заголовок Authorization
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let encoded = auth_header.strip_prefix("Basic ").ok_or(AppError::Unauthorized)?;

    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| AppError::Unauthorized)?;
    let credentials = String::from_utf8(decoded).map_err(|_| AppError::Unauthorized)?;

    // Разделяем email:password
    let (email, password) = credentials.split_once(':').ok_or(AppError::Unauthorized)?;
    let credentials = Credentials { email: email.to_string(), password: password.to_string() };
    credentials.validate().map_err(|_| AppError::Unauthorized)?;
    Ok(credentials)
}

impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<crate::AppState>) -> Result<Self, Self::Rejection> {
        let credentials = basic_credentials(parts)?;

        match state.api.login(&credentials).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(ApiError::Rejected { status: 400 | 401, .. }) => Err(AppError::Unauthorized),
            Err(e) => Err(AppError::Api(e)),
        }
    }
}

impl FromRequestParts<Arc<crate::AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<crate::AppState>) -> Result<Self, Self::Rejection> {
        if !state.config.features.enable_admin {
            return Err(AppError::NotFound("Admin screens are disabled".to_string()));
        }
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
