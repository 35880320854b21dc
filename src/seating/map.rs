use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Seat, SeatId};

/// Размеры зала: R рядов по C мест.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub rows: u16,
    pub columns: u16,
}

impl Layout {
    pub const REFERENCE: Layout = Layout { rows: 10, columns: 15 };

    pub fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    pub fn capacity(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn contains(&self, id: SeatId) -> bool {
        (1..=self.rows).contains(&id.row) && (1..=self.columns).contains(&id.column)
    }

    pub fn seat_ids(self) -> impl Iterator<Item = SeatId> {
        (1..=self.rows).flat_map(move |row| (1..=self.columns).map(move |column| SeatId::new(row, column)))
    }

    fn index_of(&self, id: SeatId) -> Option<usize> {
        self.contains(id)
            .then(|| (id.row as usize - 1) * self.columns as usize + (id.column as usize - 1))
    }
}

/// Сетка мест одного сеанса. Хранится построчно.
///
/// Размеры и занятость не меняются после создания; меняется только `selected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    layout: Layout,
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Строит сетку; занятые места вне сетки игнорируются.
    pub fn generate(layout: Layout, occupied: &HashSet<SeatId>) -> Self {
        let seats = layout
            .seat_ids()
            .map(|id| Seat::new(id, occupied.contains(&id)))
            .collect();
        Self { layout, seats }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.layout.index_of(id).map(|i| &self.seats[i])
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Seat]> {
        self.seats.chunks(self.layout.columns as usize)
    }

    pub fn occupied_ids(&self) -> HashSet<SeatId> {
        self.seats.iter().filter(|s| s.occupied).map(|s| s.id).collect()
    }

    pub fn free_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.occupied).count()
    }

    // Занятые места выбрать нельзя, поэтому флаг ставится только на свободные
    pub(crate) fn set_selected(&mut self, id: SeatId, selected: bool) -> bool {
        match self.layout.index_of(id) {
            Some(i) if !self.seats[i].occupied => {
                self.seats[i].selected = selected;
                true
            }
            _ => false,
        }
    }
}
