use bookwheel_core::book::BookCollection;
use bookwheel_core::import::{ParseError, parse_books};
use bookwheel_core::sheet::{SheetUrl, SheetUrlError};
use thiserror::Error;
use time::OffsetDateTime;

use crate::App;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub source: SheetUrl,
    pub books: BookCollection,
    pub statuses: Vec<String>,
    pub fetched_at: OffsetDateTime,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported page: open a Google Sheets document (got {url})")]
    UnsupportedSite { url: String },
    #[error("failed to download sheet data: {message}")]
    Download { message: String },
    #[error("failed to download sheet data: {status_text}")]
    HttpStatus { status: u16, status_text: String },
    #[error("failed to parse downloaded data: {source}")]
    Parse {
        #[source]
        source: ParseError,
    },
}

impl<'a> App<'a> {
    pub fn load(&self, url: &str) -> Result<LoadResult, LoadError> {
        let source = SheetUrl::parse(url).map_err(|error| match error {
            SheetUrlError::UnsupportedSite { url } => LoadError::UnsupportedSite { url },
        })?;

        let export_url = source.export_url();
        tracing::info!(url = %export_url, "downloading sheet export");

        let response = self
            .fetcher
            .fetch(&export_url)
            .map_err(|error| LoadError::Download {
                message: format!("{error:#}"),
            })?;

        if !response.is_ok() {
            tracing::warn!(status = response.status, "sheet export returned an error status");
            return Err(LoadError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let books = parse_books(&response.body, &self.config.columns)
            .map_err(|source| LoadError::Parse { source })?;
        let statuses = books.statuses();
        tracing::info!(
            books = books.len(),
            statuses = statuses.len(),
            "sheet export loaded"
        );

        Ok(LoadResult {
            source,
            books,
            statuses,
            fetched_at: bookwheel_core::time::now_utc(),
        })
    }
}
