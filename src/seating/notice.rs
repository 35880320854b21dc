use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    CapacityExceeded,
    TargetCountInvalid,
}

/// Временное предупреждение для пользователя. Состояние выбора не меняет;
/// скрывается само через `ttl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub dismiss_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, ttl_ms: u64) -> Self {
        let raised_at = Utc::now();
        Self {
            kind,
            message: message.into(),
            raised_at,
            dismiss_at: raised_at + Duration::milliseconds(ttl_ms as i64),
        }
    }

    pub fn capacity_exceeded(available: u32, ttl_ms: u64) -> Self {
        Self::new(
            NoticeKind::CapacityExceeded,
            format!("Seat limit exceeds availability: only {available} seat(s) available"),
            ttl_ms,
        )
    }

    pub fn target_too_large(requested: u32, ceiling: u32, available: u32, ttl_ms: u64) -> Self {
        let message = if requested > available {
            format!("Cannot book {requested} seats: only {available} seat(s) available")
        } else {
            format!("Cannot book {requested} seats: at most {ceiling} per booking")
        };
        Self::new(NoticeKind::TargetCountInvalid, message, ttl_ms)
    }

    pub fn target_too_small(ttl_ms: u64) -> Self {
        Self::new(NoticeKind::TargetCountInvalid, "Select at least 1 seat", ttl_ms)
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.dismiss_at
    }
}
