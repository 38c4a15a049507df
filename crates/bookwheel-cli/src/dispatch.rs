use anyhow::{Context, Result, anyhow};
use bookwheel_app::{App, BookListing};
use bookwheel_core::time::format_rfc3339;
use bookwheel_tui::UiExit;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::cli::Command;

pub fn run_with_deps(command: Command, app: &App<'_>) -> Result<()> {
    match command {
        Command::Spin { url } => run_spin_command(app, &url),
        Command::Books { url, status } => run_books_command(app, &url, status.as_deref()),
    }
}

fn run_spin_command(app: &App<'_>, url: &str) -> Result<()> {
    tracing::info!(url, "starting interactive roulette");
    let exit = bookwheel_tui::run_spin(&app.config, url)?;
    tracing::info!(?exit, "roulette closed");
    spin_exit_status(exit)
}

fn spin_exit_status(exit: UiExit) -> Result<()> {
    match exit {
        UiExit::Halted(message) => Err(anyhow!(message)),
        UiExit::Completed | UiExit::Canceled => Ok(()),
    }
}

fn run_books_command(app: &App<'_>, url: &str, status: Option<&str>) -> Result<()> {
    let listing = app.books(url, status)?;
    println!("{}", render_listing(&listing)?);
    Ok(())
}

fn render_listing(listing: &BookListing) -> Result<String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Title", "Author", "Status", "Proposed by"]);

    for book in &listing.books {
        table.add_row(vec![
            Cell::new(book.id.0),
            Cell::new(book.title_or_blank()),
            Cell::new(book.author_or_blank()),
            Cell::new(book.status.as_deref().unwrap_or("")),
            Cell::new(book.proposer_or_blank()),
        ]);
    }

    let shown = match listing.status.as_deref() {
        Some(status) => format!(
            "{} of {} books with status \"{status}\"",
            listing.books.len(),
            listing.total
        ),
        None => format!("{} books", listing.total),
    };
    let statuses = if listing.statuses.is_empty() {
        "none".to_string()
    } else {
        listing.statuses.join(", ")
    };

    let fetched_at =
        format_rfc3339(listing.fetched_at).context("failed to format fetch timestamp")?;

    Ok(format!(
        "{table}\n{shown}\nStatuses: {statuses}\nFetched {fetched_at} from {}",
        listing.source.original()
    ))
}
