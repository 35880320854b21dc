use tracing::info;

use super::api::{ApiClient, ApiError};
use crate::models::{ApiAck, CartItem, PaymentIntent, PaymentRequest, UserContext};

/// Сумма корзины: цена × количество мест по всем строкам.
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::subtotal).sum()
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Оформляет бронирование по текущей корзине пользователя.
pub async fn place_booking(api: &ApiClient, user: &UserContext) -> Result<PaymentIntent, ApiError> {
    let items = api.get_watchlist(user.customer_id).await?;
    if items.is_empty() {
        return Err(ApiError::Rejected { status: 400, message: "Your cart is empty".to_string() });
    }
    let amount = round_cents(cart_total(&items));
    let booking_id = api.create_booking(user.customer_id).await?;
    info!(customer_id = user.customer_id, booking_id, amount, "booking placed");
    Ok(PaymentIntent { booking_id, amount })
}

/// Оплата картой; шлюза нет, API просто фиксирует платёж.
pub async fn pay(api: &ApiClient, intent: &PaymentIntent) -> Result<ApiAck, ApiError> {
    let request = PaymentRequest {
        booking_id: intent.booking_id,
        amount: round_cents(intent.amount),
        method: "card".to_string(),
        status: "success".to_string(),
    };
    let ack = api.create_payment(&request).await?;
    info!(booking_id = intent.booking_id, amount = request.amount, "payment recorded");
    Ok(ack)
}
