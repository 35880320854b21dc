use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Координаты места в зале, нумерация с 1. Текстовый вид: `"row-column"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    pub row: u16,
    pub column: u16,
}

impl SeatId {
    pub fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid seat id '{0}'")]
pub struct ParseSeatIdError(pub String);

impl FromStr for SeatId {
    type Err = ParseSeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeatIdError(s.to_string());
        let (row, column) = s.split_once('-').ok_or_else(err)?;
        let row: u16 = row.parse().map_err(|_| err())?;
        let column: u16 = column.parse().map_err(|_| err())?;
        if row == 0 || column == 0 {
            return Err(err());
        }
        Ok(SeatId { row, column })
    }
}

impl Serialize for SeatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: u16,
    pub column: u16,
    pub occupied: bool,
    pub selected: bool,
}

impl Seat {
    pub fn new(id: SeatId, occupied: bool) -> Self {
        Self { id, row: id.row, column: id.column, occupied, selected: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_id_text_form() {
        let id = SeatId::new(3, 12);
        assert_eq!(id.to_string(), "3-12");
        assert_eq!("3-12".parse::<SeatId>(), Ok(id));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"3-12\"");
    }

    #[test]
    fn seat_id_rejects_garbage() {
        assert!("0-1".parse::<SeatId>().is_err());
        assert!("1".parse::<SeatId>().is_err());
        assert!("a-b".parse::<SeatId>().is_err());
    }

    #[test]
    fn parse_error_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new("7".parse::<SeatId>().unwrap_err());
        assert_eq!(err.to_string(), "invalid seat id '7'");
    }
}
