//! Автоматический выключатель для запросов к удалённому API кинотеатра.
//!
//! Если API подряд отвечает ошибками транспорта или 5xx, выключатель
//! размыкается и запросы какое-то время отклоняются сразу, не уходя в сеть.

use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Состояния "Автоматического выключателя" (Circuit Breaker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CircuitState {
    /// **Closed**: нормальный режим, запросы разрешены.
    Closed,
    /// **Open**: после серии сбоев запросы временно запрещены.
    Open,
    /// **HalfOpen**: таймаут истёк, пропускаем пробный запрос.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    /// Счетчик последовательных сбоев.
    failure_count: AtomicU32,
    /// Момент последнего сбоя, от него считается таймаут.
    last_failure: Mutex<Option<Instant>>,
    failure_threshold: u32,
    timeout_duration: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self::with_timeout(failure_threshold, Duration::from_secs(timeout_seconds))
    }

    pub fn with_timeout(failure_threshold: u32, timeout_duration: Duration) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            last_failure: Mutex::new(None),
            failure_threshold: failure_threshold.max(1),
            timeout_duration,
        }
    }

    /// Проверяет, можно ли выполнить следующий запрос.
    pub fn can_execute(&self) -> bool {
        match self.state() {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let last_failure = self.last_failure.lock().ok().and_then(|t| *t);

                // Таймаут истёк - разрешаем пробный запрос
                if last_failure.map_or(true, |t| t.elapsed() >= self.timeout_duration) {
                    self.set_state(CircuitState::HalfOpen);
                    info!("Circuit breaker transitioning to HalfOpen state");
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        match self.state() {
            CircuitState::HalfOpen => {
                self.set_state(CircuitState::Closed);
                self.failure_count.store(0, Ordering::Relaxed);
                info!("Circuit breaker recovered - transitioning to Closed state");
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::Relaxed);
            }
            CircuitState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let failure_count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if let Ok(mut last) = self.last_failure.lock() {
            *last = Some(Instant::now());
        }

        match self.state() {
            CircuitState::Closed if failure_count >= self.failure_threshold => {
                self.set_state(CircuitState::Open);
                error!(
                    "Circuit breaker OPENED - {} failures reached threshold {}",
                    failure_count, self.failure_threshold
                );
            }
            CircuitState::HalfOpen => {
                self.set_state(CircuitState::Open);
                warn!("Circuit breaker test failed - returning to Open state");
            }
            _ => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        self.state.read().map(|s| *s).unwrap_or(CircuitState::Closed)
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::Relaxed)
    }

    fn set_state(&self, next: CircuitState) {
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }
}
