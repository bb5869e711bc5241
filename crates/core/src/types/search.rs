//! Fields a catalog can be searched by

use crate::error::RecordError;
use std::fmt;
use std::str::FromStr;

/// Bibliographic field used by catalog lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    /// Every searchable field
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Year];

    /// Returns the lowercase name used on the command line and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "year" => Ok(Self::Year),
            _ => Err(RecordError::InvalidField {
                name: s.to_string(),
            }),
        }
    }
}
