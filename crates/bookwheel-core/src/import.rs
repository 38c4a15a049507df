use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::book::{BookCollection, BookId, BookRecord};
use crate::config::ColumnConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: Option<u64>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("csv header row could not be read: {message}")]
    Header { message: String },
    #[error("{} csv row(s) could not be parsed: {}", .rows.len(), summarize(.rows))]
    Rows { rows: Vec<RowError> },
}

/// Parses a CSV export with a header row into books.
///
/// Every row error is collected; if there is at least one the whole import
/// fails. Rows whose cells are all empty are skipped.
pub fn parse_books(text: &str, columns: &ColumnConfig) -> Result<BookCollection, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ParseError::Header {
            message: error.to_string(),
        })?
        .clone();

    let mut books = Vec::new();
    let mut errors = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.iter().all(str::is_empty) {
                    continue;
                }
                books.push(book_from_record(BookId(index), &headers, &record, columns));
            }
            Err(error) => errors.push(RowError {
                line: error.position().map(|position| position.line()),
                message: error.to_string(),
            }),
        }
    }

    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "csv export contains malformed rows");
        return Err(ParseError::Rows { rows: errors });
    }

    Ok(BookCollection::new(books))
}

fn book_from_record(
    id: BookId,
    headers: &StringRecord,
    record: &StringRecord,
    columns: &ColumnConfig,
) -> BookRecord {
    let mut book = BookRecord::new(id);
    for (header, value) in headers.iter().zip(record.iter()) {
        let cell = (!value.is_empty()).then(|| value.to_string());
        if header == columns.title {
            book.title = cell;
        } else if header == columns.author {
            book.author = cell;
        } else if header == columns.status {
            book.status = cell;
        } else if header == columns.proposer {
            book.proposer = cell;
        } else {
            book.extra.insert(header.to_string(), value.to_string());
        }
    }
    book
}

fn summarize(rows: &[RowError]) -> String {
    rows.iter()
        .map(|row| match row.line {
            Some(line) => format!("line {line}: {}", row.message),
            None => row.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
