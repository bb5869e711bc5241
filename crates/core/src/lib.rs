//! Domain types for the Bookshelf catalog
//!
//! A catalog is a flat list of [`Book`] records. This crate only knows what a
//! record is and how it maps to and from its persisted JSON object; storage
//! lives in `bookshelf-catalog`.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{RecordError, Result};
pub use types::{Book, BookId, BookStatus, SearchField, Validator};
