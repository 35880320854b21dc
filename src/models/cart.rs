use serde::{Deserialize, Serialize};

use super::{lenient_f64, lenient_i64};

/// Строка корзины (watchlist) в том виде, как её отдаёт удалённый API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_id: i64,
    pub movie_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub quantity: i64,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistAdd {
    pub user_id: i64,
    pub movie_id: i64,
    pub seats_selected: u32,
    // Места через запятую: "3-4,3-5"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub selected_seats: Option<String>,
}

/// Стандартный ответ удалённого API: `{ success, message }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingCreated {
    #[serde(default)]
    pub success: bool,
    pub order_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub booking_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub booking_id: i64,
    pub amount: f64,
    pub method: String,
    pub status: String,
}
