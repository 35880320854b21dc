use serde::{Deserialize, Serialize};
use tracing::info;

use super::{SeatSelection, SeatingError};
use crate::models::{SeatId, WatchlistAdd};

/// Состояние кнопки подтверждения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Gate {
    Enabled,
    Disabled { selected: usize, target: u32 },
}

impl Gate {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Gate::Enabled)
    }
}

/// Итог подтверждённого выбора, уходит в корзину.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedSelection {
    pub showing_id: i64,
    pub seats_requested: u32,
    pub selected_seat_ids: Vec<SeatId>,
}

impl ConfirmedSelection {
    /// Запрос на добавление в корзину. Места передаются строкой через запятую,
    /// только если `forward_seats` включён.
    pub fn to_watchlist(&self, user_id: i64, forward_seats: bool) -> WatchlistAdd {
        let selected_seats = forward_seats.then(|| {
            self.selected_seat_ids
                .iter()
                .map(SeatId::to_string)
                .collect::<Vec<_>>()
                .join(",")
        });
        WatchlistAdd {
            user_id,
            movie_id: self.showing_id,
            seats_selected: self.seats_requested,
            selected_seats,
        }
    }
}

impl SeatSelection {
    pub fn gate(&self) -> Gate {
        let selected = self.selected().len();
        if selected == self.target() as usize {
            Gate::Enabled
        } else {
            Gate::Disabled { selected, target: self.target() }
        }
    }

    /// Собирает итог выбора. Сессию не закрывает: это делает владелец,
    /// получив `Ok`.
    pub fn confirmation(&self) -> Result<ConfirmedSelection, SeatingError> {
        match self.gate() {
            Gate::Enabled => Ok(ConfirmedSelection {
                showing_id: self.showing().id,
                seats_requested: self.target(),
                selected_seat_ids: self.selected().to_vec(),
            }),
            Gate::Disabled { selected, target } => Err(SeatingError::IncompleteSelection { selected, target }),
        }
    }

    /// Отмена: состояние отбрасывается, наружу ничего не уходит.
    pub fn cancel(self) {
        info!(
            showing_id = self.showing().id,
            discarded = self.selected().len(),
            "seat selection cancelled"
        );
    }
}
