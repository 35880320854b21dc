use serde::Serialize;
use tracing::debug;

use super::{Notice, SeatMap, SeatingError};
use crate::models::{SeatId, Showing};

/// Результат одного клика по месту.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Место занято, ничего не изменилось.
    Ignored,
    Deselected { seat: SeatId },
    /// `evicted` - самое старое место, вытесненное при достижении целевого количества.
    Selected { seat: SeatId, evicted: Option<SeatId> },
    /// Выбор упёрся в количество доступных мест; состояние не изменилось.
    Rejected { notice: Notice },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    pub target: u32,
    pub dropped: Vec<SeatId>,
    pub notice: Option<Notice>,
}

/// Состояние выбора мест для одного сеанса.
///
/// Инварианты после каждого перехода:
/// * `selected.len() <= target <= available_seats`;
/// * ни одно выбранное место не занято;
/// * порядок `selected` - порядок выбора, первым вытесняется самое старое.
#[derive(Debug, Clone)]
pub struct SeatSelection {
    showing: Showing,
    map: SeatMap,
    selected: Vec<SeatId>,
    target: u32,
    max_target: u32,
    notice_ttl_ms: u64,
    last_notice: Option<Notice>,
}

impl SeatSelection {
    /// Открывает выбор. Начальное целевое количество - 1.
    pub fn open(showing: Showing, map: SeatMap, max_target: u32, notice_ttl_ms: u64) -> Result<Self, SeatingError> {
        if showing.available_seats == 0 {
            return Err(SeatingError::SoldOut { showing_id: showing.id });
        }
        Ok(Self {
            showing,
            map,
            selected: Vec::new(),
            target: 1,
            max_target: max_target.max(1),
            notice_ttl_ms,
            last_notice: None,
        })
    }

    pub fn showing(&self) -> &Showing {
        &self.showing
    }

    pub fn map(&self) -> &SeatMap {
        &self.map
    }

    pub fn selected(&self) -> &[SeatId] {
        &self.selected
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Наибольшее допустимое целевое количество: `min(available_seats, max_target)`.
    pub fn target_ceiling(&self) -> u32 {
        self.showing.available_seats.min(self.max_target)
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.last_notice.as_ref()
    }

    pub fn total_price(&self) -> f64 {
        self.showing.price * self.target as f64
    }

    /// Клик по месту `(row, column)`.
    pub fn toggle_seat(&mut self, row: u16, column: u16) -> Result<ToggleOutcome, SeatingError> {
        let id = SeatId::new(row, column);
        let seat = self.map.get(id).ok_or(SeatingError::SeatNotFound { row, column })?;

        if seat.occupied {
            return Ok(ToggleOutcome::Ignored);
        }

        if seat.selected {
            self.map.set_selected(id, false);
            self.selected.retain(|s| *s != id);
            debug!(showing_id = self.showing.id, seat = %id, "seat deselected");
            return Ok(ToggleOutcome::Deselected { seat: id });
        }

        // Проверка доступности важнее вытеснения
        let available = self.showing.available_seats as usize;
        if self.selected.len() >= available {
            let notice = Notice::capacity_exceeded(self.showing.available_seats, self.notice_ttl_ms);
            debug!(showing_id = self.showing.id, seat = %id, "selection rejected: {}", notice.message);
            self.last_notice = Some(notice.clone());
            return Ok(ToggleOutcome::Rejected { notice });
        }

        let evicted = if self.selected.len() >= self.target as usize && !self.selected.is_empty() {
            let oldest = self.selected.remove(0);
            self.map.set_selected(oldest, false);
            Some(oldest)
        } else {
            None
        };

        self.map.set_selected(id, true);
        self.selected.push(id);
        debug!(showing_id = self.showing.id, seat = %id, evicted = ?evicted, "seat selected");
        Ok(ToggleOutcome::Selected { seat: id, evicted })
    }

    /// Меняет целевое количество мест. Лишние места отбрасываются с конца,
    /// самые старые остаются.
    pub fn set_target_count(&mut self, requested: u32) -> TargetOutcome {
        let ceiling = self.target_ceiling();
        let notice = if requested == 0 {
            self.target = 1;
            Some(Notice::target_too_small(self.notice_ttl_ms))
        } else if requested > ceiling {
            self.target = ceiling;
            Some(Notice::target_too_large(
                requested,
                ceiling,
                self.showing.available_seats,
                self.notice_ttl_ms,
            ))
        } else {
            self.target = requested;
            None
        };

        let keep = self.target as usize;
        let dropped: Vec<SeatId> = if self.selected.len() > keep {
            self.selected.split_off(keep)
        } else {
            Vec::new()
        };
        for id in &dropped {
            self.map.set_selected(*id, false);
        }

        if let Some(n) = &notice {
            debug!(showing_id = self.showing.id, requested, target = self.target, "target clamped: {}", n.message);
            self.last_notice = Some(n.clone());
        }

        TargetOutcome { target: self.target, dropped, notice }
    }
}
