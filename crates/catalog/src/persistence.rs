//! File system persistence for the catalog
//!
//! The backing file is a JSON array of book objects in catalog order.
//! Writes go through a temporary file in the same directory followed by an
//! atomic rename, so a crash mid-save leaves the previous catalog in place.

use crate::{CatalogError, CatalogResult};
use bookshelf_core::{Book, BookId, RecordError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const INDENT: &[u8] = b"    ";

/// Result of reading the backing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and every record converted
    Loaded(Vec<Book>),
    /// No file exists yet
    Missing,
    /// The file exists but its content is unusable; treated as empty
    Recovered { reason: String },
}

/// Handles catalog file persistence
#[derive(Debug, Clone)]
pub struct CatalogPersistence {
    path: PathBuf,
}

impl CatalogPersistence {
    /// Creates a new persistence handler for the given catalog file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog from file
    ///
    /// A missing file is not an error. Content that is not a JSON array of
    /// valid, uniquely-identified records yields [`LoadOutcome::Recovered`].
    /// Bytes that are not UTF-8 count as bad content. Only a failure to read
    /// an existing file is returned as an error.
    pub fn load(&self) -> CatalogResult<LoadOutcome> {
        if !self.path.exists() {
            log::info!(
                "Catalog file not found at {}, starting empty",
                self.path.display()
            );
            return Ok(LoadOutcome::Missing);
        }

        let contents = fs::read(&self.path).map_err(|e| CatalogError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        match parse_catalog(&contents) {
            Ok(books) => {
                log::info!(
                    "Loaded {} book(s) from {}",
                    books.len(),
                    self.path.display()
                );
                Ok(LoadOutcome::Loaded(books))
            }
            Err(e) => {
                log::warn!(
                    "Catalog file at {} is unreadable ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(LoadOutcome::Recovered {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Saves the catalog to file atomically, replacing previous content
    pub fn save(&self, books: &[Book]) -> CatalogResult<()> {
        if let Some(parent) = self.parent_dir() {
            self.ensure_directory_exists(parent)?;
        }

        let json = render_catalog(books)?;

        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &json)?;

        log::info!(
            "Saved {} book(s) to {}",
            books.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Returns the parent directory, or None for a bare file name
    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, path: &Path) -> CatalogResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| CatalogError::DirectoryCreation {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created catalog directory: {}", path.display());
        }
        Ok(())
    }

    /// Creates a temporary file next to the catalog file
    fn create_temp_file(&self) -> CatalogResult<NamedTempFile> {
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        NamedTempFile::new_in(dir).map_err(|e| CatalogError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> CatalogResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(CatalogError::Io)?;

        temp_file.flush().map_err(CatalogError::Io)?;

        temp_file
            .persist(&self.path)
            .map_err(|e| CatalogError::Write {
                path: self.path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}

/// Parses the backing file content into books, in file order
fn parse_catalog(contents: &[u8]) -> Result<Vec<Book>, RecordError> {
    let text = std::str::from_utf8(contents)
        .map_err(|e| RecordError::malformed(format!("file is not UTF-8: {}", e)))?;

    if text.trim().is_empty() {
        return Err(RecordError::malformed("file is empty"));
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| RecordError::malformed(format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(RecordError::malformed("top-level value is not an array"));
    };

    let mut seen = HashSet::<BookId>::with_capacity(items.len());
    let mut books = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let map = item.as_object().ok_or_else(|| {
            RecordError::malformed(format!("element {} is not an object", index))
        })?;

        let book = Book::from_map(map).map_err(|e| match e {
            RecordError::MalformedRecord { reason } => {
                RecordError::malformed(format!("element {}: {}", index, reason))
            }
            other => other,
        })?;

        if !seen.insert(book.id()) {
            return Err(RecordError::malformed(format!(
                "duplicate id {} at element {}",
                book.id(),
                index
            )));
        }

        books.push(book);
    }

    Ok(books)
}

/// Renders books as an indented JSON array with non-ASCII text kept verbatim
fn render_catalog(books: &[Book]) -> CatalogResult<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    books.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
