use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub seating: SeatingConfig,
    pub sessions: SessionConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Удалённый API кинотеатра
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Схема зала и правила выбора мест
#[derive(Debug, Clone, Deserialize)]
pub struct SeatingConfig {
    pub rows: u16,
    pub columns: u16,
    pub occupancy_probability: f64,
    pub max_target: u32,
    pub notice_ttl_ms: u64,
}

// Время жизни сессий выбора мест
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub sweep_seconds: u64,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub forward_selected_seats: bool,
    pub enable_admin: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

fn var_or<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: var_or("PORT", "8000")?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_booking=debug,tower_http=debug".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:5000".to_string()),
                timeout_seconds: var_or("API_TIMEOUT_SECONDS", "30")?,
            },
            seating: SeatingConfig {
                rows: var_or("SEAT_ROWS", "10")?,
                columns: var_or("SEAT_COLUMNS", "15")?,
                occupancy_probability: var_or("SEAT_OCCUPANCY_PROBABILITY", "0.30")?,
                max_target: var_or("SEAT_MAX_TARGET", "8")?,
                notice_ttl_ms: var_or("NOTICE_TTL_MS", "3000")?,
            },
            sessions: SessionConfig {
                ttl_seconds: var_or("SEAT_SESSION_TTL_SECONDS", "900")?,
                sweep_seconds: var_or("SEAT_SESSION_SWEEP_SECONDS", "60")?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: var_or("CIRCUIT_BREAKER_FAILURE_THRESHOLD", "5")?,
                timeout_seconds: var_or("CIRCUIT_BREAKER_TIMEOUT_SECONDS", "60")?,
            },
            features: FeatureFlags {
                forward_selected_seats: var_or("FORWARD_SELECTED_SEATS", "true")?,
                enable_admin: var_or("ENABLE_ADMIN", "true")?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    // Проверяем значения, которые парсятся, но не имеют смысла
    fn validate(&self) -> Result<(), ConfigError> {
        let p = self.seating.occupancy_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid { key: "SEAT_OCCUPANCY_PROBABILITY", value: p.to_string() });
        }
        if self.seating.rows == 0 {
            return Err(ConfigError::Invalid { key: "SEAT_ROWS", value: "0".to_string() });
        }
        if self.seating.columns == 0 {
            return Err(ConfigError::Invalid { key: "SEAT_COLUMNS", value: "0".to_string() });
        }
        if self.seating.max_target == 0 {
            return Err(ConfigError::Invalid { key: "SEAT_MAX_TARGET", value: "0".to_string() });
        }
        Ok(())
    }

    /// Конфигурация с эталонными значениями, без чтения окружения.
    pub fn with_api_base_url(base_url: impl Into<String>) -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "cinema_booking=debug".to_string(),
            },
            api: ApiConfig { base_url: base_url.into(), timeout_seconds: 5 },
            seating: SeatingConfig {
                rows: 10,
                columns: 15,
                occupancy_probability: 0.30,
                max_target: 8,
                notice_ttl_ms: 3000,
            },
            sessions: SessionConfig { ttl_seconds: 900, sweep_seconds: 60 },
            circuit_breaker: CircuitBreakerConfig { failure_threshold: 5, timeout_seconds: 60 },
            features: FeatureFlags { forward_selected_seats: true, enable_admin: true },
        }
    }
}
