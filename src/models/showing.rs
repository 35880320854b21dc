use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Movie;

/// Сеанс фильма: то, что приходит из каталога при открытии выбора мест.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Showing {
    #[validate(range(min = 1))]
    pub id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub available_seats: u32,
}

impl From<&Movie> for Showing {
    fn from(movie: &Movie) -> Self {
        Showing {
            id: movie.movie_id,
            title: movie.title.clone(),
            price: movie.price,
            available_seats: u32::try_from(movie.available_seats.max(0)).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(price: f64, available_seats: i64) -> Movie {
        serde_json::from_value(serde_json::json!({
            "movie_id": 3, "title": "Ran", "price": price, "available_seats": available_seats
        }))
        .unwrap()
    }

    #[test]
    fn seat_count_saturates_instead_of_wrapping() {
        assert_eq!(Showing::from(&movie(10.0, -4)).available_seats, 0);
        assert_eq!(Showing::from(&movie(10.0, 1 << 40)).available_seats, u32::MAX);
        assert_eq!(Showing::from(&movie(10.0, 25)).available_seats, 25);
    }

    #[test]
    fn negative_catalog_price_fails_validation() {
        assert!(Showing::from(&movie(-5.0, 10)).validate().is_err());
        assert!(Showing::from(&movie(0.0, 10)).validate().is_ok());
    }
}
