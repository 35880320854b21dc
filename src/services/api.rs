//! api.rs
//!
//! Типизированный клиент удалённого API кинотеатра (каталог, корзина,
//! бронирования, платежи, отзывы, админка).
//!
//! Все сетевые вызовы проходят через `CircuitBreaker`. Ответы не из 2xx
//! превращаются в `ApiError::Rejected` с текстом из поля `message` или `error`,
//! либо `HTTP <код>`, если тела нет.

use reqwest::{header, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::circuit_breaker::{CircuitBreaker, CircuitState};
use crate::config::{ApiConfig, CircuitBreakerConfig};
use crate::models::movie::WithAdmin;
use crate::models::{
    AdminCredentials, ApiAck, BookingCreated, CartItem, Credentials, Genre, GenreForm, Movie, MovieForm,
    PaymentRequest, Review, ReviewForm, SignupForm, UserContext, UserForm, UserRecord, WatchlistAdd,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Circuit breaker is open - booking API temporarily unavailable")]
    CircuitOpen,

    #[error("Booking API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// API ответил ошибкой (или `success: false`).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Booking API returned an unexpected body: {0}")]
    Decode(String),

    #[error("Failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ApiAck {
    /// `success: false` при коде 2xx тоже считается отказом.
    pub fn into_result(self) -> Result<ApiAck, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected {
                status: 200,
                message: self.message.unwrap_or_else(|| "Request failed".to_string()),
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct CustomerRef {
    customer_id: i64,
}

#[derive(Debug, Serialize)]
struct ReviewBody<'a> {
    user_id: i64,
    movie_id: i64,
    rating: i64,
    comment: &'a str,
}

#[derive(Debug, Serialize)]
struct GenreFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    genre_id: Option<i64>,
}

/// Клиент для взаимодействия с API кинотеатра.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl ApiClient {
    pub fn from_config(api: &ApiConfig, breaker: &CircuitBreakerConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            http_client,
            circuit_breaker: Arc::new(CircuitBreaker::new(breaker.failure_threshold, breaker.timeout_seconds)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Состояние выключателя и число сбоев подряд, для мониторинга.
    pub fn circuit_breaker_status(&self) -> (CircuitState, u32) {
        (self.circuit_breaker.state(), self.circuit_breaker.failure_count())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client.request(method, format!("{}{}", self.base_url, path))
    }

    fn with_admin_query(&self, method: Method, path: &str, admin: &AdminCredentials) -> Result<RequestBuilder, ApiError> {
        let query = serde_urlencoded::to_string(admin)?;
        Ok(self.request(method, &format!("{path}?{query}")))
    }

    /// Отправляет запрос через Circuit Breaker и разбирает ответ.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking booking API request");
            return Err(ApiError::CircuitOpen);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Booking API request failed: {:?}", e);
                self.circuit_breaker.record_failure();
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        // 4xx - API живой, просто отказал
        if status.is_server_error() {
            self.circuit_breaker.record_failure();
        } else {
            self.circuit_breaker.record_success();
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let body: Value = if is_json { response.json().await? } else { Value::Null };

        if !status.is_success() {
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            debug!(status = status.as_u16(), "booking API rejected request: {}", message);
            return Err(ApiError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_ack(&self, request: RequestBuilder) -> Result<ApiAck, ApiError> {
        self.send::<ApiAck>(request).await?.into_result()
    }

    /* ---------- AUTH ---------- */

    pub async fn login(&self, credentials: &Credentials) -> Result<UserContext, ApiError> {
        let mut user: UserContext = self
            .send(self.request(Method::POST, "/auth/login").json(credentials))
            .await?;
        user.password = credentials.password.clone();
        Ok(user)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<ApiAck, ApiError> {
        self.send_ack(self.request(Method::POST, "/signup").json(form)).await
    }

    /* ---------- CATALOG ---------- */

    pub async fn list_movies(&self, genre_id: Option<i64>) -> Result<Vec<Movie>, ApiError> {
        self.send(self.request(Method::GET, "/movies/").query(&GenreFilter { genre_id }))
            .await
    }

    /// У API нет выборки одного фильма, ищем в общем списке.
    pub async fn find_movie(&self, movie_id: i64) -> Result<Option<Movie>, ApiError> {
        let movies = self.list_movies(None).await?;
        Ok(movies.into_iter().find(|m| m.movie_id == movie_id))
    }

    pub async fn create_movie(&self, form: &MovieForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::POST, "/movies").json(&body)).await
    }

    pub async fn update_movie(&self, movie_id: i64, form: &MovieForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::PUT, &format!("/movies/{movie_id}")).json(&body))
            .await
    }

    pub async fn delete_movie(&self, movie_id: i64, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let request = self.with_admin_query(Method::DELETE, &format!("/movies/{movie_id}"), admin)?;
        self.send_ack(request).await
    }

    pub async fn purge_movies(&self, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        self.send_ack(self.request(Method::POST, "/movies/purge").json(admin)).await
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.send(self.request(Method::GET, "/genres/")).await
    }

    pub async fn create_genre(&self, form: &GenreForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::POST, "/genres").json(&body)).await
    }

    pub async fn update_genre(&self, genre_id: i64, form: &GenreForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::PUT, &format!("/genres/{genre_id}")).json(&body))
            .await
    }

    pub async fn delete_genre(&self, genre_id: i64, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let request = self.with_admin_query(Method::DELETE, &format!("/genres/{genre_id}"), admin)?;
        self.send_ack(request).await
    }

    /* ---------- CART / WATCHLIST ---------- */

    pub async fn get_watchlist(&self, user_id: i64) -> Result<Vec<CartItem>, ApiError> {
        self.send(self.request(Method::GET, &format!("/watchlist/{user_id}"))).await
    }

    pub async fn add_to_watchlist(&self, item: &WatchlistAdd) -> Result<ApiAck, ApiError> {
        self.send_ack(self.request(Method::POST, "/watchlist/").json(item)).await
    }

    pub async fn remove_from_watchlist(&self, watchlist_id: i64) -> Result<ApiAck, ApiError> {
        self.send_ack(self.request(Method::DELETE, &format!("/watchlist/{watchlist_id}")))
            .await
    }

    /* ---------- BOOKINGS / PAYMENTS ---------- */

    pub async fn create_booking(&self, customer_id: i64) -> Result<i64, ApiError> {
        let created: BookingCreated = self
            .send(self.request(Method::POST, "/bookings").json(&CustomerRef { customer_id }))
            .await?;
        match (created.success, created.order_id) {
            (true, Some(order_id)) => Ok(order_id),
            _ => Err(ApiError::Rejected {
                status: 200,
                message: created.message.unwrap_or_else(|| "Failed to place booking".to_string()),
            }),
        }
    }

    pub async fn create_payment(&self, payment: &PaymentRequest) -> Result<ApiAck, ApiError> {
        self.send_ack(self.request(Method::POST, "/payments").json(payment)).await
    }

    /* ---------- REVIEWS ---------- */

    pub async fn list_reviews(&self, movie_id: i64) -> Result<Vec<Review>, ApiError> {
        self.send(self.request(Method::GET, &format!("/reviews/{movie_id}"))).await
    }

    pub async fn create_review(&self, user_id: i64, movie_id: i64, form: &ReviewForm) -> Result<ApiAck, ApiError> {
        let body = ReviewBody { user_id, movie_id, rating: form.rating, comment: &form.comment };
        self.send_ack(self.request(Method::POST, "/reviews").json(&body)).await
    }

    /* ---------- USERS (admin) ---------- */

    pub async fn list_users(&self, admin: &AdminCredentials) -> Result<Vec<UserRecord>, ApiError> {
        let request = self.with_admin_query(Method::GET, "/users/", admin)?;
        self.send(request).await
    }

    pub async fn create_user(&self, form: &UserForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::POST, "/users").json(&body)).await
    }

    pub async fn update_user(&self, user_id: i64, form: &UserForm, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let body = WithAdmin { form, admin };
        self.send_ack(self.request(Method::PUT, &format!("/users/{user_id}")).json(&body))
            .await
    }

    pub async fn delete_user(&self, user_id: i64, admin: &AdminCredentials) -> Result<ApiAck, ApiError> {
        let request = self.with_admin_query(Method::DELETE, &format!("/users/{user_id}"), admin)?;
        self.send_ack(request).await
    }
}
