use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;

use crate::book::{BookId, BookRecord};
use crate::fetch::{FetchResponse, SheetFetcher};

#[derive(Default)]
pub struct RecordingFetcher {
    responses: Mutex<VecDeque<anyhow::Result<FetchResponse>>>,
    calls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new(responses: Vec<anyhow::Result<FetchResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl SheetFetcher for RecordingFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse> {
        self.calls.lock().expect("calls lock").push(url.to_string());

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing response")))
    }
}

pub fn response(status: u16, status_text: &str, body: &str) -> anyhow::Result<FetchResponse> {
    Ok(FetchResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    })
}

pub fn book(index: usize, title: &str, status: &str) -> BookRecord {
    let mut book = BookRecord::new(BookId(index));
    book.title = Some(title.to_string());
    book.author = Some(format!("author of {title}"));
    book.status = (!status.is_empty()).then(|| status.to_string());
    book
}
