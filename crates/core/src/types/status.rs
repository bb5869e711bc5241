//! Availability status of a book

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a book is on the shelf or lent out
///
/// Older catalogs stored the Russian display strings as the value. Those
/// still deserialize but are never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    #[serde(rename = "available", alias = "в наличии")]
    Available,
    #[serde(rename = "checked_out", alias = "выдана")]
    CheckedOut,
}

impl BookStatus {
    /// Every permitted status, in display order
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::CheckedOut];

    /// Returns the persisted spelling of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" | "в наличии" => Ok(Self::Available),
            "checked_out" | "выдана" => Ok(Self::CheckedOut),
            _ => Err(RecordError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
