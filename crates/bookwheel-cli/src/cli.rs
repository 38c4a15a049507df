use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookwheel")]
#[command(bin_name = "bookwheel")]
#[command(version)]
#[command(about = "Pick the next book club read from a Google Sheet with a spinning wheel")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Write a diagnostics log under ~/.config/bookwheel/diagnostics"
    )]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Load a sheet and run the interactive roulette")]
    Spin {
        #[arg(
            value_name = "URL",
            help = "Google Sheets document URL; a gid=<n> in it exports that tab instead of the first"
        )]
        url: String,
    },
    #[command(about = "Print the books in a sheet, optionally filtered by status")]
    Books {
        #[arg(
            value_name = "URL",
            help = "Google Sheets document URL; a gid=<n> in it exports that tab instead of the first"
        )]
        url: String,
        #[arg(long, value_name = "STATUS", help = "Only list books with this exact status")]
        status: Option<String>,
    },
}
