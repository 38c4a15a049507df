mod books;
mod flow;
mod load;

pub use books::BookListing;
pub use flow::{
    Action, FilterState, Flow, FlowError, Framing, Outcome, PreviewState, ResultState,
    RoulettePhase, RouletteState, Screen, clamp_attempts,
};
pub use load::{LoadError, LoadResult};

use anyhow::{Context, Result};
use bookwheel_core::config::{BookwheelConfig, load_config_or_default, resolve_config_path};
use bookwheel_core::fetch::SheetFetcher;

pub struct App<'a> {
    pub fetcher: &'a dyn SheetFetcher,
    pub config: BookwheelConfig,
}

impl<'a> App<'a> {
    pub fn new(fetcher: &'a dyn SheetFetcher, config: BookwheelConfig) -> Self {
        Self { fetcher, config }
    }
}

/// Reads `~/.config/bookwheel/config.toml`, or the defaults when it is absent.
pub fn load_user_config() -> Result<BookwheelConfig> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;
    load_config_or_default(&config_path).with_context(|| {
        format!(
            "invalid config at {}\nFix or remove the file and retry.",
            config_path.display()
        )
    })
}
