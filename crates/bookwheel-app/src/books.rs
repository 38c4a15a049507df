use anyhow::Result;
use bookwheel_core::book::BookCollection;
use bookwheel_core::sheet::SheetUrl;
use time::OffsetDateTime;

use crate::App;

#[derive(Debug, Clone, PartialEq)]
pub struct BookListing {
    pub source: SheetUrl,
    pub status: Option<String>,
    pub total: usize,
    pub statuses: Vec<String>,
    pub books: BookCollection,
    pub fetched_at: OffsetDateTime,
}

impl<'a> App<'a> {
    /// Loads the sheet and applies the same status filter as the filter screen.
    pub fn books(&self, url: &str, status: Option<&str>) -> Result<BookListing> {
        let loaded = self.load(url)?;
        let status = status.map(str::trim).filter(|value| !value.is_empty());

        if let Some(term) = status
            && !loaded.statuses.iter().any(|known| known == term)
        {
            tracing::warn!(status = term, "status does not appear in the sheet");
        }

        Ok(BookListing {
            total: loaded.books.len(),
            books: loaded.books.filter_by_status(status),
            status: status.map(str::to_string),
            statuses: loaded.statuses,
            source: loaded.source,
            fetched_at: loaded.fetched_at,
        })
    }
}
