pub mod api;
pub mod checkout;
pub mod circuit_breaker;
pub mod sessions;

pub use api::{ApiClient, ApiError};
pub use sessions::{SessionEntry, SessionError, SessionSnapshot, SessionStore};
