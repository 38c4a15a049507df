pub mod cli;
pub mod diagnostics;
pub mod dispatch;

use anyhow::Result;
use bookwheel_app::App;
use bookwheel_core::fetch::HttpSheetFetcher;
use clap::Parser;

use crate::cli::Cli;
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let diagnostics = DiagnosticsSession::initialize(cli.diagnostics)?;
    if let Some(path) = diagnostics.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let result = run_command(cli);
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "command failed");
    }
    result
}

fn run_command(cli: Cli) -> Result<()> {
    let config = bookwheel_app::load_user_config()?;
    let fetcher = HttpSheetFetcher::new()?;
    let app = App::new(&fetcher, config);

    dispatch::run_with_deps(cli.command, &app)
}
