use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::{SeatingConfig, SessionConfig};
use crate::models::{Seat, SeatId, Showing};
use crate::seating::{
    ConfirmedSelection, Gate, Layout, Notice, OccupancySource, SeatMap, SeatSelection, SeatingError, TargetOutcome,
    ToggleOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("seat selection session {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Seating(#[from] SeatingError),
}

/// Открытая сессия. После подтверждения возвращается вызывающему,
/// чтобы при сбое корзины положить её обратно как есть.
#[derive(Debug)]
pub struct SessionEntry {
    selection: SeatSelection,
    opened_at: DateTime<Utc>,
    last_touched: Instant,
}

/// Снимок сессии для отрисовки.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub showing: Showing,
    pub opened_at: DateTime<Utc>,
    pub rows: Vec<Vec<Seat>>,
    pub selected_seats: Vec<SeatId>,
    pub target_count: u32,
    pub max_target_count: u32,
    pub total_price: f64,
    pub confirm: Gate,
    pub notice: Option<Notice>,
}

/// Все открытые сессии выбора мест.
///
/// Каждая сессия принадлежит только себе; блокировка держится на время
/// одного синхронного перехода и никогда через `.await`.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    occupancy: Arc<dyn OccupancySource>,
    layout: Layout,
    max_target: u32,
    notice_ttl_ms: u64,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(seating: &SeatingConfig, sessions: &SessionConfig, occupancy: Arc<dyn OccupancySource>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            occupancy,
            layout: Layout::new(seating.rows, seating.columns),
            max_target: seating.max_target,
            notice_ttl_ms: seating.notice_ttl_ms,
            ttl: Duration::from_secs(sessions.ttl_seconds),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, SessionEntry>> {
        // Паника внутри перехода не оставляет сессию в полусостоянии, так что
        // отравленную блокировку можно просто забрать
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Открывает сессию: сетка строится один раз из источника занятости.
    pub fn open(&self, showing: Showing) -> Result<SessionSnapshot, SessionError> {
        let occupied = self.occupancy.occupancy_for(showing.id, self.layout);
        let map = SeatMap::generate(self.layout, &occupied);
        let selection = SeatSelection::open(showing, map, self.max_target, self.notice_ttl_ms)?;

        let id = Uuid::new_v4();
        let entry = SessionEntry { selection, opened_at: Utc::now(), last_touched: Instant::now() };
        let snapshot = snapshot(id, &entry);
        info!(
            session_id = %id,
            showing_id = snapshot.showing.id,
            occupied = occupied.len(),
            "seat selection session opened"
        );
        self.write().insert(id, entry);
        Ok(snapshot)
    }

    pub fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, SessionError> {
        let sessions = self.read();
        let entry = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(snapshot(id, entry))
    }

    pub fn toggle_seat(&self, id: Uuid, row: u16, column: u16) -> Result<(ToggleOutcome, SessionSnapshot), SessionError> {
        self.with_session(id, |selection| selection.toggle_seat(row, column).map_err(SessionError::from))
    }

    pub fn set_target_count(&self, id: Uuid, requested: u32) -> Result<(TargetOutcome, SessionSnapshot), SessionError> {
        self.with_session(id, |selection| Ok(selection.set_target_count(requested)))
    }

    /// Подтверждение закрывает сессию, только если выбор полный.
    ///
    /// Проверка и удаление идут под одной блокировкой; снятая сессия
    /// возвращается вместе с подтверждением для `restore`.
    pub fn confirm(&self, id: Uuid) -> Result<(ConfirmedSelection, SessionEntry), SessionError> {
        let mut sessions = self.write();
        let entry = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        entry.last_touched = Instant::now();
        let confirmed = entry.selection.confirmation()?;
        let entry = sessions.remove(&id).ok_or(SessionError::NotFound(id))?;
        info!(
            session_id = %id,
            showing_id = confirmed.showing_id,
            seats = confirmed.selected_seat_ids.len(),
            "seat selection confirmed"
        );
        Ok((confirmed, entry))
    }

    /// Возвращает подтверждённую сессию обратно, если дальнейший шаг не удался.
    pub fn restore(&self, id: Uuid, mut entry: SessionEntry) {
        entry.last_touched = Instant::now();
        self.write().insert(id, entry);
    }

    pub fn cancel(&self, id: Uuid) -> Result<(), SessionError> {
        let entry = self.write().remove(&id).ok_or(SessionError::NotFound(id))?;
        entry.selection.cancel();
        Ok(())
    }

    /// Удаляет сессии, которых не трогали дольше `ttl`. Истечение равносильно отмене.
    pub fn sweep_expired(&self) -> usize {
        let mut sessions = self.write();
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, entry)| entry.last_touched.elapsed() >= self.ttl)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            if let Some(entry) = sessions.remove(id) {
                info!(session_id = %id, "seat selection session expired");
                entry.selection.cancel();
            }
        }
        expired.len()
    }

    fn with_session<T>(
        &self,
        id: Uuid,
        transition: impl FnOnce(&mut SeatSelection) -> Result<T, SessionError>,
    ) -> Result<(T, SessionSnapshot), SessionError> {
        let mut sessions = self.write();
        let entry = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        entry.last_touched = Instant::now();
        let outcome = transition(&mut entry.selection)?;
        Ok((outcome, snapshot(id, entry)))
    }
}

fn snapshot(id: Uuid, entry: &SessionEntry) -> SessionSnapshot {
    let selection = &entry.selection;
    let now = Utc::now();
    SessionSnapshot {
        session_id: id,
        showing: selection.showing().clone(),
        opened_at: entry.opened_at,
        rows: selection.map().rows().map(<[Seat]>::to_vec).collect(),
        selected_seats: selection.selected().to_vec(),
        target_count: selection.target(),
        max_target_count: selection.target_ceiling(),
        total_price: selection.total_price(),
        confirm: selection.gate(),
        notice: selection.last_notice().filter(|n| n.is_visible_at(now)).cloned(),
    }
}
