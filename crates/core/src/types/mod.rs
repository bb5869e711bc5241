//! Domain types for Bookshelf
//!
//! - `book`: the catalog record and its identity
//! - `status`: availability status
//! - `search`: fields a catalog can be searched by
//! - `common`: shared traits

mod book;
mod common;
mod search;
mod status;

// Re-export all public types
pub use book::{Book, BookId};
pub use common::Validator;
pub use search::SearchField;
pub use status::BookStatus;
