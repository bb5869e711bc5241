// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookshelf_catalog::CatalogStore;
use bookshelf_config::{ColorMode, Config, ConfigManager};
use bookshelf_core::{BookId, BookStatus, SearchField};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::io::{self, Write};
use std::path::PathBuf;

mod commands;
mod menu;

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal library catalog: track books and who has them")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("PATH")
                .help("Path to the catalog file (overrides config and BOOKSHELF_CATALOG_PATH)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory containing config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("add")
                .about("Add a book to the catalog")
                .arg(Arg::new("title").required(true).value_name("TITLE").help("Book title"))
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Book author"))
                .arg(Arg::new("year").required(true).value_name("YEAR").help("Publication year (free text)")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a book from the catalog")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("find")
                .about("Find books whose field equals a value (case-insensitive)")
                .arg(
                    Arg::new("field")
                        .required(true)
                        .value_name("FIELD")
                        .help("Field to search")
                        .value_parser(SearchField::ALL.map(|f| f.as_str())),
                )
                .arg(Arg::new("value").required(true).value_name("VALUE").help("Value to match")),
        )
        .subcommand(Command::new("list").about("List all books in the catalog"))
        .subcommand(
            Command::new("status")
                .about("Change the availability status of a book")
                .arg(id_arg())
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_name("STATUS")
                        .help("New status")
                        .value_parser(BookStatus::ALL.map(|s| s.as_str())),
                ),
        )
        .subcommand(Command::new("menu").about("Run the interactive menu (default)"))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_name("BOOK_ID")
        .help("Book ID")
        .value_parser(value_parser!(u64).range(1..))
}

/// Resolves configuration: defaults < config file < environment
fn load_config(matches: &ArgMatches) -> Config {
    let manager = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    };

    match manager {
        Ok(manager) => manager.load_with_env_overrides(),
        Err(e) => {
            log::warn!("{}, using default configuration", e);
            Config::default()
        }
    }
}

/// Installs the logger before any config is read
///
/// With `RUST_LOG` unset, records at warn and above are shown until the
/// configured level is applied. Returns true if `RUST_LOG` was set.
fn init_logging() -> bool {
    let from_env = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !from_env {
        log::set_max_level(log::LevelFilter::Warn);
    }
    from_env
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Auto => {}
        ColorMode::Always => console::set_colors_enabled(true),
        ColorMode::Never => console::set_colors_enabled(false),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| anyhow::anyhow!("Argument '{}' is required", name))
}

fn required_id(matches: &ArgMatches) -> Result<BookId> {
    matches
        .get_one::<u64>("id")
        .map(|id| BookId::new(*id))
        .ok_or_else(|| anyhow::anyhow!("Book ID is required"))
}

fn run_command(store: &mut CatalogStore, matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    match matches.subcommand() {
        Some(("add", sub)) => commands::add_book(
            store,
            required(sub, "title")?,
            required(sub, "author")?,
            required(sub, "year")?,
            out,
        ),
        Some(("delete", sub)) => commands::delete_book(store, required_id(sub)?, out),
        Some(("find", sub)) => {
            let field: SearchField = required(sub, "field")?.parse()?;
            commands::find_books(store, field, required(sub, "value")?, out)
        }
        Some(("list", _)) => commands::list_books(store, out),
        Some(("status", sub)) => {
            let status: BookStatus = required(sub, "status")?.parse()?;
            commands::update_status(store, required_id(sub)?, status, out)
        }
        _ => {
            let stdin = io::stdin();
            menu::run(store, stdin.lock(), out)
        }
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let level_from_env = init_logging();
    let config = load_config(&matches);

    if !level_from_env {
        log::set_max_level(config.app.log_level.into());
    }
    apply_color_mode(config.app.color);

    let catalog_path = matches
        .get_one::<PathBuf>("catalog")
        .cloned()
        .unwrap_or(config.catalog.path);
    log::debug!("Using catalog {}", catalog_path.display());

    let mut store = CatalogStore::open(&catalog_path)
        .with_context(|| format!("Failed to open catalog at {}", catalog_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // The menu reports load problems itself
    if !matches!(matches.subcommand_name(), None | Some("menu")) {
        commands::report_load_state(&store, &mut out)?;
    }

    run_command(&mut store, &matches, &mut out)
}
