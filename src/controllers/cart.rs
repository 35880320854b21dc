use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::{ApiAck, CartItem, PaymentIntent};
use crate::services::checkout;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/{id}", delete(remove_item))
        .route("/checkout", post(place_booking))
        .route("/payments", post(pay))
}

#[derive(Debug, Serialize)]
struct CartResponse {
    items: Vec<CartItem>,
    total: f64,
}

// GET /api/cart
async fn get_cart(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<CartResponse>, AppError> {
    let items = state.api.get_watchlist(user.customer_id).await?;
    let total = checkout::cart_total(&items);
    Ok(Json(CartResponse { items, total }))
}

// DELETE /api/cart/{id}
async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(watchlist_id): Path<i64>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiAck>, AppError> {
    // Удалять можно только свои строки
    let items = state.api.get_watchlist(user.customer_id).await?;
    if !items.iter().any(|i| i.cart_id == watchlist_id) {
        return Err(AppError::NotFound(format!("Cart item {watchlist_id} not found")));
    }
    Ok(Json(state.api.remove_from_watchlist(watchlist_id).await?))
}

// POST /api/checkout
async fn place_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let intent = checkout::place_booking(&state.api, &user).await?;
    Ok((StatusCode::CREATED, Json(intent)))
}

// POST /api/payments
async fn pay(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Json(intent): Json<PaymentIntent>,
) -> Result<Json<ApiAck>, AppError> {
    if intent.booking_id <= 0 {
        return Err(AppError::MalformedPayload("booking_id must be > 0".to_string()));
    }
    if !intent.amount.is_finite() || intent.amount < 0.0 {
        return Err(AppError::MalformedPayload("amount must be a non-negative number".to_string()));
    }
    Ok(Json(checkout::pay(&state.api, &intent).await?))
}
