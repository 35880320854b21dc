use rand::Rng;
use std::collections::{HashMap, HashSet};

use super::Layout;
use crate::models::SeatId;

/// Источник занятости мест для сеанса.
pub trait OccupancySource: Send + Sync {
    fn occupancy_for(&self, showing_id: i64, layout: Layout) -> HashSet<SeatId>;
}

/// Имитация: каждое место занято независимо с вероятностью `probability`.
///
/// Заглушка вместо реального учёта мест; удалённый API занятость не отдаёт.
#[derive(Debug, Clone)]
pub struct RandomOccupancy {
    probability: f64,
}

impl RandomOccupancy {
    pub fn new(probability: f64) -> Self {
        Self { probability: probability.clamp(0.0, 1.0) }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, layout: Layout) -> HashSet<SeatId> {
        layout
            .seat_ids()
            .filter(|_| rng.gen_bool(self.probability))
            .collect()
    }
}

impl OccupancySource for RandomOccupancy {
    fn occupancy_for(&self, _showing_id: i64, layout: Layout) -> HashSet<SeatId> {
        self.draw(&mut rand::thread_rng(), layout)
    }
}

/// Заранее известная занятость по сеансам.
#[derive(Debug, Clone, Default)]
pub struct FixedOccupancy {
    by_showing: HashMap<i64, HashSet<SeatId>>,
}

impl FixedOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_showing(mut self, showing_id: i64, seats: impl IntoIterator<Item = SeatId>) -> Self {
        self.by_showing.entry(showing_id).or_default().extend(seats);
        self
    }
}

impl OccupancySource for FixedOccupancy {
    fn occupancy_for(&self, showing_id: i64, layout: Layout) -> HashSet<SeatId> {
        self.by_showing
            .get(&showing_id)
            .map(|seats| seats.iter().copied().filter(|id| layout.contains(*id)).collect())
            .unwrap_or_default()
    }
}
