pub mod account;
#[cfg(feature = "admin")]
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod seat_sessions;

use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    let router = Router::new()
        .merge(seat_sessions::routes())
        .merge(catalog::routes())
        .merge(cart::routes())
        .merge(account::routes());

    #[cfg(feature = "admin")]
    let router = router.merge(admin::routes());

    router
}

/// Полный роутер приложения.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Booking API v1.0" }))
        .route("/health", get(health))
        .nest("/api", routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let (circuit, failures) = state.api.circuit_breaker_status();
    Json(json!({
        "status": "OK",
        "open_sessions": state.sessions.len(),
        "booking_api": { "circuit": circuit, "consecutive_failures": failures },
    }))
}
