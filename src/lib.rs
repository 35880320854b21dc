pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod seating;
pub mod services;

use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::seating::{OccupancySource, RandomOccupancy};
use crate::services::{ApiClient, ApiError, SessionStore};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub config: config::Config,
}

impl AppState {
    /// Занятость мест имитируется случайно, с вероятностью из конфига.
    pub fn new(config: config::Config) -> Result<Arc<Self>, ApiError> {
        let occupancy = Arc::new(RandomOccupancy::new(config.seating.occupancy_probability));
        Self::with_occupancy(config, occupancy)
    }

    pub fn with_occupancy(config: config::Config, occupancy: Arc<dyn OccupancySource>) -> Result<Arc<Self>, ApiError> {
        let api = ApiClient::from_config(&config.api, &config.circuit_breaker)?;
        let sessions = SessionStore::new(&config.seating, &config.sessions, occupancy);
        Ok(Arc::new(Self { api, sessions, config }))
    }

    /// Фоновая чистка брошенных сессий выбора мест.
    pub fn spawn_session_sweeper(self: &Arc<Self>) -> task::JoinHandle<()> {
        let sessions = self.sessions.clone();
        let every = Duration::from_secs(self.config.sessions.sweep_seconds.max(1));
        task::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let expired = sessions.sweep_expired();
                if expired > 0 {
                    tracing::info!("🧹 Expired {} idle seat selection sessions", expired);
                }
            }
        })
    }
}
