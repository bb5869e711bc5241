// FILE: crates/cli/src/menu.rs
//
// Interactive text menu. Input is validated here before it reaches the
// catalog: ids must be integers, search fields and statuses must be one of
// the permitted values.

use crate::commands;
use anyhow::{Context, Result};
use bookshelf_catalog::CatalogStore;
use bookshelf_core::{BookId, BookStatus, SearchField};
use console::style;
use std::io::{BufRead, Write};

enum Flow {
    Continue,
    Exit,
}

/// Runs the menu until the user exits or input ends
pub fn run<R: BufRead, W: Write>(store: &mut CatalogStore, mut input: R, out: &mut W) -> Result<()> {
    commands::report_load_state(store, out)?;

    loop {
        print_menu(out)?;

        let Some(choice) = prompt(&mut input, out, "Choose an action: ")? else {
            break;
        };

        let flow = match handle_choice(choice.trim(), store, &mut input, out) {
            Ok(flow) => flow,
            Err(e) => {
                // Storage failures end the action, not the session
                log::error!("{:#}", e);
                writeln!(out, "{} {:#}", style("Error:").red().bold(), e)?;
                Flow::Continue
            }
        };

        if let Flow::Exit = flow {
            break;
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}

fn print_menu(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", style("Menu:").bold())?;
    writeln!(out, "1. Add a book")?;
    writeln!(out, "2. Delete a book")?;
    writeln!(out, "3. Find books")?;
    writeln!(out, "4. List all books")?;
    writeln!(out, "5. Change book status")?;
    writeln!(out, "6. Exit")?;
    Ok(())
}

fn handle_choice<R: BufRead, W: Write>(
    choice: &str,
    store: &mut CatalogStore,
    input: &mut R,
    out: &mut W,
) -> Result<Flow> {
    match choice {
        "1" => add(store, input, out),
        "2" => delete(store, input, out),
        "3" => find(store, input, out),
        "4" => {
            commands::list_books(store, out)?;
            Ok(Flow::Continue)
        }
        "5" => change_status(store, input, out),
        "6" => Ok(Flow::Exit),
        _ => {
            writeln!(out, "Invalid choice, try again.")?;
            Ok(Flow::Continue)
        }
    }
}

fn add<R: BufRead, W: Write>(store: &mut CatalogStore, input: &mut R, out: &mut W) -> Result<Flow> {
    let Some(title) = prompt(input, out, "Title: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(author) = prompt(input, out, "Author: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(year) = prompt(input, out, "Year: ")? else {
        return Ok(Flow::Exit);
    };

    if title.trim().is_empty() || author.trim().is_empty() {
        writeln!(out, "Title and author must not be empty.")?;
        return Ok(Flow::Continue);
    }

    commands::add_book(store, &title, &author, &year, out)?;
    Ok(Flow::Continue)
}

fn delete<R: BufRead, W: Write>(store: &mut CatalogStore, input: &mut R, out: &mut W) -> Result<Flow> {
    let Some(raw) = prompt(input, out, "ID of the book to delete: ")? else {
        return Ok(Flow::Exit);
    };

    match parse_id(&raw) {
        Some(id) => commands::delete_book(store, id, out)?,
        None => writeln!(out, "Invalid ID.")?,
    }
    Ok(Flow::Continue)
}

fn find<R: BufRead, W: Write>(store: &CatalogStore, input: &mut R, out: &mut W) -> Result<Flow> {
    let Some(raw_field) = prompt(input, out, "Search by (title/author/year): ")? else {
        return Ok(Flow::Exit);
    };

    let Ok(field) = raw_field.parse::<SearchField>() else {
        writeln!(out, "Invalid search field.")?;
        return Ok(Flow::Continue);
    };

    let Some(value) = prompt(input, out, &format!("Value to match for {}: ", field))? else {
        return Ok(Flow::Exit);
    };

    commands::find_books(store, field, &value, out)?;
    Ok(Flow::Continue)
}

fn change_status<R: BufRead, W: Write>(
    store: &mut CatalogStore,
    input: &mut R,
    out: &mut W,
) -> Result<Flow> {
    let Some(raw_id) = prompt(input, out, "ID of the book: ")? else {
        return Ok(Flow::Exit);
    };

    let Some(id) = parse_id(&raw_id) else {
        writeln!(out, "Invalid ID.")?;
        return Ok(Flow::Continue);
    };

    let Some(raw_status) = prompt(input, out, "New status (available/checked_out): ")? else {
        return Ok(Flow::Exit);
    };

    match raw_status.parse::<BookStatus>() {
        Ok(status) => commands::update_status(store, id, status, out)?,
        Err(_) => writeln!(out, "Invalid status.")?,
    }
    Ok(Flow::Continue)
}

/// Prints `message` and reads one line, without its line terminator
///
/// Returns None once input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn parse_id(raw: &str) -> Option<BookId> {
    raw.trim().parse::<u64>().ok().map(BookId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(store: &mut CatalogStore, script: &str) -> String {
        console::set_colors_enabled(false);
        let mut out = Vec::new();
        run(store, Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn setup_test_store() -> (TempDir, CatalogStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::open(temp_dir.path().join("library.json")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_exit_immediately() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "6\n");
        assert!(text.contains("1. Add a book"));
        assert!(text.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_eof_ends_session() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "");
        assert!(text.contains("Goodbye."));
    }

    #[test]
    fn test_add_then_list() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "1\nDune\nFrank Herbert\n1965\n4\n6\n");

        assert!(text.contains("Added 'Dune' with ID 1"));
        assert!(text.contains("1 book(s) in catalog"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_keeps_inner_whitespace_and_strips_crlf() {
        let (_temp, mut store) = setup_test_store();
        run_session(&mut store, "1\r\nThe  Hobbit\r\nTolkien\r\n1937\r\n6\r\n");

        assert_eq!(store.records()[0].title(), "The  Hobbit");
        assert_eq!(store.records()[0].year(), "1937");
    }

    #[test]
    fn test_add_blank_title_rejected() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "1\n\nSomeone\n2000\n6\n");

        assert!(text.contains("Title and author must not be empty."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_invalid_id() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "2\nabc\n6\n");
        assert!(text.contains("Invalid ID."));
    }

    #[test]
    fn test_delete_existing() {
        let (_temp, mut store) = setup_test_store();
        store.add("Emma", "Austen", "1815").unwrap();

        let text = run_session(&mut store, "2\n1\n6\n");

        assert!(text.contains("Book 1 deleted"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_invalid_field() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "3\nisbn\n6\n");
        assert!(text.contains("Invalid search field."));
    }

    #[test]
    fn test_find_by_author_case_insensitive() {
        let (_temp, mut store) = setup_test_store();
        store.add("The Hobbit", "Tolkien", "1937").unwrap();

        let text = run_session(&mut store, "3\nAUTHOR\ntolkien\n6\n");
        assert!(text.contains("The Hobbit"));
    }

    #[test]
    fn test_change_status() {
        let (_temp, mut store) = setup_test_store();
        store.add("Dune", "Herbert", "1965").unwrap();

        let text = run_session(&mut store, "5\n1\nchecked_out\n6\n");

        assert!(text.contains("Book 1 is now checked_out"));
        assert_eq!(store.records()[0].status(), BookStatus::CheckedOut);
    }

    #[test]
    fn test_change_status_invalid_value() {
        let (_temp, mut store) = setup_test_store();
        store.add("Dune", "Herbert", "1965").unwrap();

        let text = run_session(&mut store, "5\n1\nlost\n6\n");

        assert!(text.contains("Invalid status."));
        assert_eq!(store.records()[0].status(), BookStatus::Available);
    }

    #[test]
    fn test_invalid_choice() {
        let (_temp, mut store) = setup_test_store();
        let text = run_session(&mut store, "9\n6\n");
        assert!(text.contains("Invalid choice, try again."));
    }

    #[test]
    fn test_storage_error_does_not_end_session() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let mut store = CatalogStore::open(blocker.join("library.json")).unwrap();

        let text = run_session(&mut store, "1\nDune\nHerbert\n1965\n4\n6\n");

        assert!(text.contains("Error: Failed to add book"));
        assert!(text.contains("The catalog is empty"));
        assert!(text.contains("Goodbye."));
    }
}
