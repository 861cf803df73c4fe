// Seams to the external services a pipeline run talks to. Production
// implementations live next to this file, fakes in `testing`.

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::domain::PromptMessages;

use super::HttpError;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Raw JSON search response, `knowledge_graph` and `organic_results` included when present.
    async fn search(&self, query: &str) -> Result<Value, HttpError>;
}

pub struct FetchedPage {
    pub status: StatusCode,
    pub html: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get_html(&self, url: &str) -> Result<FetchedPage, HttpError>;
}

#[derive(Debug, Clone, Copy)]
pub struct ScrapeOptions {
    pub js_render: bool,
    pub premium_proxy: bool,
}

#[derive(Debug)]
pub enum ScrapeError {
    /// Quota hit on the proxy, worth retrying after a pause.
    RateLimited,
    Status(StatusCode),
    Transport(reqwest::Error),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::RateLimited => write!(f, "scraping proxy rate limit reached"),
            ScrapeError::Status(status) => write!(f, "scraping proxy returned {}", status),
            ScrapeError::Transport(e) => write!(f, "scraping proxy request failed: {}", e),
        }
    }
}

impl std::error::Error for ScrapeError {}

#[async_trait]
pub trait ScrapeProxy: Send + Sync {
    async fn fetch(&self, url: &str, options: ScrapeOptions) -> Result<String, ScrapeError>;
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Content of the first choice.
    async fn complete(&self, model: &str, messages: &PromptMessages) -> anyhow::Result<String>;
}

#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn read_sheet(&self, sheet_name: &str) -> anyhow::Result<Vec<Vec<String>>>;

    async fn write_cell(
        &self,
        row: usize,
        column: &str,
        value: &str,
        sheet_name: &str,
    ) -> anyhow::Result<()>;
}
