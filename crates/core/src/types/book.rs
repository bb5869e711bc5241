//! Book record and identity

use crate::error::RecordError;
use crate::types::{BookStatus, SearchField, Validator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Catalog-assigned identifier for a book
///
/// Serialized as a bare integer. Ids are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// The id handed out to the first book of an empty catalog
    pub const FIRST: BookId = BookId(1);

    /// Creates a BookId from a raw integer
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or None at `u64::MAX`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One catalogued book
///
/// Title, author and year are fixed at creation. Only the status can change
/// afterwards. Year stays a string because catalog data contains values such
/// as "n.d." or "1890s".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: String,
    status: BookStatus,
}

impl Book {
    /// Creates a new, available book
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year: year.into(),
            status: BookStatus::Available,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// Changes the availability status
    pub fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }

    /// Returns the value of a searchable field
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
            SearchField::Year => &self.year,
        }
    }

    /// Case-insensitive exact comparison of one field against `value`
    pub fn matches_field(&self, field: SearchField, value: &str) -> bool {
        self.field(field).to_lowercase() == value.to_lowercase()
    }

    /// Returns true if this book has exactly this title, author and year
    ///
    /// Case-sensitive: "Dune" and "dune" are different works.
    pub fn is_same_work(&self, title: &str, author: &str, year: &str) -> bool {
        self.title == title && self.author == author && self.year == year
    }

    /// Converts the book into a JSON object
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(self.id.value()));
        map.insert("title".to_string(), Value::from(self.title.clone()));
        map.insert("author".to_string(), Value::from(self.author.clone()));
        map.insert("year".to_string(), Value::from(self.year.clone()));
        map.insert("status".to_string(), Value::from(self.status.as_str()));
        map
    }

    /// Builds a book from a JSON object
    ///
    /// Fails if a field is missing or mistyped, the id is zero, the status is
    /// not recognised, or title/author is blank.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, RecordError> {
        let book: Book = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| RecordError::malformed(e.to_string()))?;

        book.validate()
            .map_err(|errors| RecordError::malformed(errors.join("; ")))?;

        Ok(book)
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.value() == 0 {
            errors.push("Id must be a positive integer".to_string());
        }

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.trim().is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} ({}) - {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        Book::new(BookId::new(1), "Dune", "Frank Herbert", "1965")
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_new_book_is_available() {
        let book = sample();
        assert_eq!(book.status(), BookStatus::Available);
        assert_eq!(book.id(), BookId::FIRST);
    }

    #[test]
    fn test_book_id_display_honours_width() {
        assert_eq!(format!("{:>4}", BookId::new(7)), "   7");
    }

    #[test]
    fn test_book_id_next() {
        assert_eq!(BookId::new(41).next(), Some(BookId::new(42)));
        assert_eq!(BookId::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_field_accessor() {
        let book = sample();
        assert_eq!(book.field(SearchField::Title), "Dune");
        assert_eq!(book.field(SearchField::Author), "Frank Herbert");
        assert_eq!(book.field(SearchField::Year), "1965");
    }

    #[test]
    fn test_matches_field_is_exact_but_case_insensitive() {
        let book = Book::new(BookId::new(3), "The Hobbit", "Tolkien", "1937");
        assert!(book.matches_field(SearchField::Author, "tolkien"));
        assert!(book.matches_field(SearchField::Author, "TOLKIEN"));
        assert!(!book.matches_field(SearchField::Author, "Tolk"));
        assert!(!book.matches_field(SearchField::Title, "hobbit"));
    }

    #[test]
    fn test_matches_field_non_ascii() {
        let book = Book::new(BookId::new(1), "Война и мир", "Толстой", "1869");
        assert!(book.matches_field(SearchField::Author, "толстой"));
    }

    #[test]
    fn test_is_same_work_case_sensitive() {
        let book = sample();
        assert!(book.is_same_work("Dune", "Frank Herbert", "1965"));
        assert!(!book.is_same_work("dune", "Frank Herbert", "1965"));
        assert!(!book.is_same_work("Dune", "Frank Herbert", "1966"));
    }

    #[test]
    fn test_to_map_has_all_fields() {
        let map = sample().to_map();
        assert_eq!(map["id"], json!(1));
        assert_eq!(map["title"], json!("Dune"));
        assert_eq!(map["author"], json!("Frank Herbert"));
        assert_eq!(map["year"], json!("1965"));
        assert_eq!(map["status"], json!("available"));
    }

    #[test]
    fn test_from_map_roundtrip() {
        let mut book = sample();
        book.set_status(BookStatus::CheckedOut);
        let restored = Book::from_map(&book.to_map()).unwrap();
        assert_eq!(restored, book);
    }

    #[test]
    fn test_from_map_missing_field() {
        let map = as_map(json!({"id": 1, "title": "Dune", "author": "Herbert", "status": "available"}));
        let err = Book::from_map(&map).unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { .. }));
    }

    #[test]
    fn test_from_map_wrong_type() {
        let map = as_map(json!({
            "id": "1", "title": "Dune", "author": "Herbert", "year": "1965", "status": "available"
        }));
        assert!(Book::from_map(&map).is_err());

        let map = as_map(json!({
            "id": 1, "title": "Dune", "author": "Herbert", "year": 1965, "status": "available"
        }));
        assert!(Book::from_map(&map).is_err());
    }

    #[test]
    fn test_from_map_rejects_zero_id() {
        let map = as_map(json!({
            "id": 0, "title": "Dune", "author": "Herbert", "year": "1965", "status": "available"
        }));
        assert!(Book::from_map(&map).is_err());
    }

    #[test]
    fn test_from_map_rejects_blank_author() {
        let map = as_map(json!({
            "id": 2, "title": "Dune", "author": "  ", "year": "1965", "status": "available"
        }));
        let err = Book::from_map(&map).unwrap_err();
        assert!(err.to_string().contains("Author cannot be empty"));
    }

    #[test]
    fn test_from_map_accepts_legacy_status() {
        let map = as_map(json!({
            "id": 7, "title": "Мастер и Маргарита", "author": "Булгаков", "year": "1967", "status": "выдана"
        }));
        let book = Book::from_map(&map).unwrap();
        assert_eq!(book.status(), BookStatus::CheckedOut);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "[1] Dune by Frank Herbert (1965) - available"
        );
    }
}
