//! Bookshelf catalog store
//!
//! Owns the list of books, assigns ids and keeps the backing JSON file in step
//! with every change.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_catalog::{AddOutcome, CatalogStore};
//! use bookshelf_core::{BookStatus, SearchField};
//!
//! let mut store = CatalogStore::open("library.json").expect("Failed to open catalog");
//!
//! if let AddOutcome::Added(id) = store.add("Dune", "Frank Herbert", "1965").unwrap() {
//!     store.update_status(id, BookStatus::CheckedOut).unwrap();
//! }
//!
//! for book in store.find(SearchField::Author, "frank herbert") {
//!     println!("{}", book);
//! }
//! ```

mod error;
mod persistence;
mod store;

pub use bookshelf_core::RecordError;
pub use error::{CatalogError, CatalogResult};
pub use persistence::{CatalogPersistence, LoadOutcome};
pub use store::{AddOutcome, CatalogStore, ChangeOutcome, LoadState};

/// File name used when no catalog path is configured
pub const DEFAULT_CATALOG_FILE: &str = "library.json";
