// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use bookshelf_catalog::{AddOutcome, CatalogStore, ChangeOutcome, LoadState};
use bookshelf_core::{Book, BookId, BookStatus, SearchField};
use console::style;
use std::io::Write;

/// Warn when the catalog file had to be discarded on load
pub fn report_load_state(store: &CatalogStore, out: &mut impl Write) -> Result<()> {
    if let LoadState::Recovered { reason } = store.load_state() {
        writeln!(
            out,
            "{} Catalog at {} could not be read ({}). Starting with an empty catalog; \
             the file will be overwritten on the next change.",
            style("!").yellow().bold(),
            store.path().display(),
            reason
        )?;
    }
    Ok(())
}

/// Add a new book to the catalog
pub fn add_book(
    store: &mut CatalogStore,
    title: &str,
    author: &str,
    year: &str,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = store
        .add(title, author, year)
        .context("Failed to add book")?;

    match outcome {
        AddOutcome::Added(id) => writeln!(
            out,
            "{} Added '{}' with ID {}",
            style("✓").green().bold(),
            title,
            id
        )?,
        AddOutcome::AlreadyExists(id) => writeln!(
            out,
            "'{}' is already in the catalog (ID {})",
            title, id
        )?,
    }

    Ok(())
}

/// Delete a book from the catalog
pub fn delete_book(store: &mut CatalogStore, id: BookId, out: &mut impl Write) -> Result<()> {
    let outcome = store.delete(id).context("Failed to delete book")?;

    match outcome {
        ChangeOutcome::Applied => {
            writeln!(out, "{} Book {} deleted", style("✓").green().bold(), id)?
        }
        ChangeOutcome::NotFound => writeln!(out, "No book with ID {}", id)?,
    }

    Ok(())
}

/// Search for books by one field
pub fn find_books(
    store: &CatalogStore,
    field: SearchField,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let results = store.find(field, value);

    if results.is_empty() {
        writeln!(out, "No books found with {} = '{}'", field, value)?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{} result(s) for {} = '{}'",
        style(results.len()).bold().cyan(),
        field,
        value
    )?;
    writeln!(out, "{}", "=".repeat(60))?;

    for book in results {
        print_book(book, out)?;
    }

    Ok(())
}

/// List every book in catalog order
pub fn list_books(store: &CatalogStore, out: &mut impl Write) -> Result<()> {
    if store.is_empty() {
        writeln!(out, "The catalog is empty. Use 'add' to catalogue a book.")?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{} book(s) in catalog",
        style(store.len()).bold().cyan()
    )?;
    writeln!(out, "{}", "=".repeat(60))?;

    for book in store.records() {
        print_book(book, out)?;
    }

    Ok(())
}

/// Change the availability status of a book
pub fn update_status(
    store: &mut CatalogStore,
    id: BookId,
    status: BookStatus,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = store
        .update_status(id, status)
        .context("Failed to update status")?;

    match outcome {
        ChangeOutcome::Applied => writeln!(
            out,
            "{} Book {} is now {}",
            style("✓").green().bold(),
            id,
            status
        )?,
        ChangeOutcome::NotFound => writeln!(out, "No book with ID {}", id)?,
    }

    Ok(())
}

fn print_book(book: &Book, out: &mut impl Write) -> Result<()> {
    let status = match book.status() {
        BookStatus::Available => style(book.status().as_str()).green(),
        BookStatus::CheckedOut => style(book.status().as_str()).yellow(),
    };

    writeln!(
        out,
        "{:>4}  {}  by {} ({})  [{}]",
        book.id(),
        style(book.title()).bold(),
        book.author(),
        book.year(),
        status
    )?;

    Ok(())
}
