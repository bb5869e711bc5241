//! Error types for book records

use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while building, converting or querying a [`crate::Book`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A structured map could not be turned into a record
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// Search field is not one of title, author or year
    #[error("Invalid search field '{name}' (expected title, author or year)")]
    InvalidField { name: String },

    /// Status value is not one of the two permitted values
    #[error("Invalid status '{value}' (expected available or checked_out)")]
    InvalidStatus { value: String },

    /// A required text field was empty or whitespace
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

impl RecordError {
    /// Creates a malformed record error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}
