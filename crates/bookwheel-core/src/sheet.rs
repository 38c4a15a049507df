use std::fmt;

use thiserror::Error;

const SPREADSHEET_HOST: &str = "docs.google.com/spreadsheets";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetUrlError {
    #[error("unsupported page: {url} is not a Google Sheets document")]
    UnsupportedSite { url: String },
}

/// A spreadsheet URL that was accepted as a Google Sheets document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetUrl {
    original: String,
    document: String,
    gid: Option<String>,
}

impl SheetUrl {
    pub fn parse(url: &str) -> Result<Self, SheetUrlError> {
        let trimmed = url.trim();
        if !trimmed.contains(SPREADSHEET_HOST) {
            return Err(SheetUrlError::UnsupportedSite {
                url: trimmed.to_string(),
            });
        }

        let gid = extract_gid(trimmed);

        let mut document = trimmed;
        if let Some(index) = document.find("/edit") {
            document = &document[..index];
        }
        if let Some(index) = document.find(['?', '#']) {
            document = &document[..index];
        }
        let document = document.trim_end_matches('/').to_string();

        Ok(Self {
            original: trimmed.to_string(),
            document,
            gid,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn gid(&self) -> Option<&str> {
        self.gid.as_deref()
    }

    pub fn export_url(&self) -> String {
        match &self.gid {
            Some(gid) => format!("{}/export?format=csv&gid={gid}", self.document),
            None => format!("{}/export?format=csv", self.document),
        }
    }
}

impl fmt::Display for SheetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

fn extract_gid(url: &str) -> Option<String> {
    let start = url.find(['?', '#'])?;
    url[start + 1..]
        .split(['&', '#', '?'])
        .filter_map(|pair| pair.strip_prefix("gid="))
        .map(|value| {
            value
                .chars()
                .take_while(|character| character.is_ascii_digit())
                .collect::<String>()
        })
        .find(|value| !value.is_empty())
}
