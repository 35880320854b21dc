use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::lenient_bool;

/// Явный контекст пользователя. Передаётся в каждую операцию, которой нужна
/// личность, вместо глобального хранилища сессии.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub customer_id: i64,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "lenient_bool", default)]
    pub is_admin: bool,
    // Пароль нужен только чтобы подписывать админские запросы
    #[serde(skip)]
    pub(crate) password: String,
}

// Пароль в логи не попадает
impl fmt::Debug for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserContext")
            .field("customer_id", &self.customer_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl UserContext {
    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            admin_email: self.email.clone(),
            admin_password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub admin_email: String,
    pub admin_password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(deserialize_with = "lenient_bool", default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}
