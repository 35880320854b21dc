pub mod seat;
pub mod showing;
pub mod movie;
pub mod user;
pub mod cart;

pub use seat::{Seat, SeatId};
pub use showing::Showing;
pub use movie::{Genre, GenreForm, Movie, MovieForm, Review, ReviewForm};
pub use user::{AdminCredentials, Credentials, SignupForm, UserContext, UserForm, UserRecord};
pub use cart::{ApiAck, BookingCreated, CartItem, PaymentIntent, PaymentRequest, WatchlistAdd};

use serde::{de, Deserialize, Deserializer};

// Удалённый API отдаёт DECIMAL то числом, то строкой ("250.00")
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = lenient_f64(deserializer)?;
    if value.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected integer, got {value}")));
    }
    Ok(value as i64)
}

// is_admin хранится как INTEGER 0/1
#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrInt {
    Bool(bool),
    Int(i64),
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<BoolOrInt>::deserialize(deserializer)? {
        Some(BoolOrInt::Bool(b)) => b,
        Some(BoolOrInt::Int(i)) => i != 0,
        None => false,
    })
}
