use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{lenient_f64, lenient_i64, AdminCredentials};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_i64", default)]
    pub available_seats: i64,
    #[serde(default)]
    pub genre_id: Option<i64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub showtime: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl Movie {
    // Поиск по подстроке в названии или описании, без учёта регистра
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&q)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MovieForm {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub available_seats: i64,
    pub genre_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: i64,
    #[validate(length(min = 1))]
    pub showtime: String,
}

// Тело запроса для создания/изменения: форма + учётные данные админа
#[derive(Debug, Serialize)]
pub(crate) struct WithAdmin<'a, T: Serialize> {
    #[serde(flatten)]
    pub form: &'a T,
    #[serde(flatten)]
    pub admin: &'a AdminCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}
