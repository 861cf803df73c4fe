use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use super::{ScrapeError, ScrapeOptions, ScrapeProxy};

#[derive(Serialize)]
struct ZenrowsQuery<'a> {
    apikey: &'a str,
    url: &'a str,
    js_render: bool,
    premium_proxy: bool,
}

pub struct ZenrowsClient {
    client: Client,
    api_key: String,
    url: String,
}

impl ZenrowsClient {
    pub fn new(client: Client, api_key: String, base_url: &str) -> Self {
        ZenrowsClient {
            client,
            api_key,
            url: format!("{}/v1/", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ScrapeProxy for ZenrowsClient {
    async fn fetch(&self, url: &str, options: ScrapeOptions) -> Result<String, ScrapeError> {
        let res = self
            .client
            .get(&self.url)
            .query(&ZenrowsQuery {
                apikey: &self.api_key,
                url,
                js_render: options.js_render,
                premium_proxy: options.premium_proxy,
            })
            .send()
            .await
            .map_err(ScrapeError::Transport)?;

        match res.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(ScrapeError::RateLimited),
            status if status.is_success() => res.text().await.map_err(ScrapeError::Transport),
            status => Err(ScrapeError::Status(status)),
        }
    }
}
