//! In-memory catalog backed by a JSON file
//!
//! Every successful mutation is saved before the call returns. If the save
//! fails, the mutation is undone so memory always matches the last good save.

use crate::persistence::{CatalogPersistence, LoadOutcome};
use crate::{CatalogError, CatalogResult, RecordError};
use bookshelf_core::{Book, BookId, BookStatus, SearchField};
use std::path::{Path, PathBuf};

/// How the current contents were obtained from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Books were read from an existing file
    Loaded,
    /// No backing file existed
    Missing,
    /// The backing file was unusable and the catalog started empty
    Recovered { reason: String },
}

impl LoadState {
    /// Returns true if the catalog had to discard a corrupted file
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Result of [`CatalogStore::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new book was created with this id
    Added(BookId),
    /// An identical title/author/year already exists under this id
    AlreadyExists(BookId),
}

/// Result of an id-based mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The book was found and changed
    Applied,
    /// No book has the requested id; nothing changed
    NotFound,
}

/// The catalog: an ordered list of books plus its backing file
#[derive(Debug)]
pub struct CatalogStore {
    books: Vec<Book>,
    persistence: CatalogPersistence,
    load_state: LoadState,
}

impl CatalogStore {
    /// Opens the catalog stored at `path`
    ///
    /// A missing or corrupted file yields an empty catalog; check
    /// [`CatalogStore::load_state`] to tell the two apart.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let mut store = Self {
            books: Vec::new(),
            persistence: CatalogPersistence::new(path),
            load_state: LoadState::Missing,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the backing file, replacing the in-memory books
    pub fn reload(&mut self) -> CatalogResult<&LoadState> {
        let (books, state) = match self.persistence.load()? {
            LoadOutcome::Loaded(books) => (books, LoadState::Loaded),
            LoadOutcome::Missing => (Vec::new(), LoadState::Missing),
            LoadOutcome::Recovered { reason } => (Vec::new(), LoadState::Recovered { reason }),
        };
        self.books = books;
        self.load_state = state;
        Ok(&self.load_state)
    }

    /// Writes the current books to the backing file
    pub fn save(&self) -> CatalogResult<()> {
        self.persistence.save(&self.books)
    }

    /// Returns the id the next added book will get
    ///
    /// This is `max(id) + 1`, recomputed each time. Deleting the book with the
    /// highest id makes that id available again. Fails once the highest id
    /// is `u64::MAX`.
    pub fn generate_id(&self) -> CatalogResult<BookId> {
        match self.books.iter().map(Book::id).max() {
            None => Ok(BookId::FIRST),
            Some(max) => max.next().ok_or(CatalogError::IdSpaceExhausted { max }),
        }
    }

    /// Adds a book unless one with the same title, author and year exists
    pub fn add(&mut self, title: &str, author: &str, year: &str) -> CatalogResult<AddOutcome> {
        if title.trim().is_empty() {
            return Err(RecordError::EmptyField { field: "title" }.into());
        }
        if author.trim().is_empty() {
            return Err(RecordError::EmptyField { field: "author" }.into());
        }

        if let Some(existing) = self
            .books
            .iter()
            .find(|book| book.is_same_work(title, author, year))
        {
            log::debug!("'{}' already catalogued as {}", title, existing.id());
            return Ok(AddOutcome::AlreadyExists(existing.id()));
        }

        let id = self.generate_id()?;
        self.books.push(Book::new(id, title, author, year));

        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e);
        }

        log::debug!("Added '{}' with id {}", title, id);
        Ok(AddOutcome::Added(id))
    }

    /// Removes the book with the given id
    pub fn delete(&mut self, id: BookId) -> CatalogResult<ChangeOutcome> {
        let Some(index) = self.position(id) else {
            log::debug!("Delete: no book with id {}", id);
            return Ok(ChangeOutcome::NotFound);
        };

        let removed = self.books.remove(index);

        if let Err(e) = self.save() {
            self.books.insert(index, removed);
            return Err(e);
        }

        log::debug!("Deleted book {}", id);
        Ok(ChangeOutcome::Applied)
    }

    /// Returns every book whose `field` equals `value`, ignoring case
    ///
    /// Matching is on the whole value, not a substring. Results keep catalog
    /// order.
    pub fn find(&self, field: SearchField, value: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.matches_field(field, value))
            .collect()
    }

    /// Like [`CatalogStore::find`] but takes the field by name
    ///
    /// Fails with [`RecordError::InvalidField`] for anything other than
    /// title, author or year.
    pub fn find_by_name(&self, field: &str, value: &str) -> CatalogResult<Vec<&Book>> {
        let field: SearchField = field.parse()?;
        Ok(self.find(field, value))
    }

    /// Sets the status of the book with the given id
    pub fn update_status(&mut self, id: BookId, status: BookStatus) -> CatalogResult<ChangeOutcome> {
        let Some(index) = self.position(id) else {
            log::debug!("Update status: no book with id {}", id);
            return Ok(ChangeOutcome::NotFound);
        };

        let previous = self.books[index].status();
        self.books[index].set_status(status);

        if let Err(e) = self.save() {
            self.books[index].set_status(previous);
            return Err(e);
        }

        log::debug!("Book {} is now {}", id, status);
        Ok(ChangeOutcome::Applied)
    }

    /// All books in catalog order
    pub fn records(&self) -> &[Book] {
        &self.books
    }

    /// Looks up a single book
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// How the catalog was last loaded
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }
}
