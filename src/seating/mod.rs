//! Выбор мест в зале для одного сеанса.
//!
//! 1.  **SeatMap**: сетка мест, занятость фиксируется при создании.
//! 2.  **SeatSelection**: упорядоченный список выбранных мест и целевое количество.
//!     При переполнении вытесняется самое старое место (скользящее окно).
//! 3.  **Gate**: подтверждение разрешено только при точном совпадении
//!     количества выбранных мест с целевым.
//!
//! Все переходы синхронные и не зависят от отрисовки, поэтому тестируются напрямую.

pub mod gate;
pub mod map;
pub mod notice;
pub mod occupancy;
pub mod selection;

pub use gate::{ConfirmedSelection, Gate};
pub use map::{Layout, SeatMap};
pub use notice::{Notice, NoticeKind};
pub use occupancy::{FixedOccupancy, OccupancySource, RandomOccupancy};
pub use selection::{SeatSelection, TargetOutcome, ToggleOutcome};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("showing {showing_id} has no available seats")]
    SoldOut { showing_id: i64 },

    #[error("seat {row}-{column} is outside the seat map")]
    SeatNotFound { row: u16, column: u16 },

    #[error("select {target} seats to continue ({selected} selected)")]
    IncompleteSelection { selected: usize, target: u32 },
}
