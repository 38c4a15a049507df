use anyhow::Context;
use reqwest::blocking::Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait SheetFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpSheetFetcher {
    client: Client,
}

impl HttpSheetFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bookwheel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

impl SheetFetcher for HttpSheetFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        let body = response
            .text()
            .with_context(|| format!("failed to read response body from {url}"))?;

        Ok(FetchResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
