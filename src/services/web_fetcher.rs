use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::{
    collapse_whitespace, extract_visible_text, has_scheme, truncate_website_text, SiteUrl,
};

use super::{send_with_retry, FetchedPage, HttpError, PageFetcher};

pub struct WebFetcher {
    client: Client,
}

impl WebFetcher {
    pub fn new(client: Client) -> Self {
        WebFetcher { client }
    }
}

#[async_trait]
impl PageFetcher for WebFetcher {
    async fn get_html(&self, url: &str) -> Result<FetchedPage, HttpError> {
        let res = send_with_retry(self.client.get(url)).await?;
        let status = res.status();
        let html = res.text().await?;

        Ok(FetchedPage { status, html })
    }
}

async fn fetch_text(fetcher: &dyn PageFetcher, url: &str) -> Option<String> {
    match fetcher.get_html(url).await {
        Ok(page) if page.status == StatusCode::OK => Some(extract_visible_text(&page.html)),
        Ok(page) => {
            log::warn!("{} answered {}", url, page.status);
            None
        }
        Err(e) => {
            log::warn!("Could not fetch {}: {}", url, e);
            None
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    match text.trim().is_empty() {
        true => None,
        false => Some(text),
    }
}

/// Text of a company's home page. A failed attempt is repeated once with the other scheme.
pub async fn fetch_site_text(fetcher: &dyn PageFetcher, website: &str) -> Option<String> {
    let site = SiteUrl::parse(website)?;
    log::info!("Fetching {}", site.url());

    let text = match fetch_text(fetcher, &site.url()).await {
        Some(text) => Some(text),
        None => match site.flipped() {
            Some(flipped) => fetch_text(fetcher, &flipped.url()).await,
            None => None,
        },
    };

    text.map(truncate_website_text).and_then(non_empty)
}

/// Single attempt on the URL as given, whitespace collapsed.
pub async fn fetch_page_text(fetcher: &dyn PageFetcher, url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let url = match has_scheme(url) {
        true => url.to_string(),
        false => format!("https://{}", url),
    };

    fetch_text(fetcher, &url)
        .await
        .map(|text| truncate_website_text(collapse_whitespace(&text)))
        .and_then(non_empty)
}
