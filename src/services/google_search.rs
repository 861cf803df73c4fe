use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{extract_knowledge_profile, rephrase_query, KnowledgeProfile};

use super::{send_with_retry, HttpError, SearchProvider};

#[derive(Serialize)]
struct SerpQuery<'a> {
    q: &'a str,
    location: &'a str,
    hl: &'a str,
    gl: &'a str,
    google_domain: &'a str,
    api_key: &'a str,
}

/// Google results through SerpApi.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    url: String,
}

impl SerpApiClient {
    pub fn new(client: Client, api_key: String, base_url: &str) -> Self {
        SerpApiClient {
            client,
            api_key,
            url: format!("{}/search", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Value, HttpError> {
        let params = SerpQuery {
            q: query,
            location: "Austin, Texas, United States",
            hl: "en",
            gl: "us",
            google_domain: "google.com",
            api_key: &self.api_key,
        };

        let res = send_with_retry(self.client.get(&self.url).query(&params)).await?;
        if !res.status().is_success() {
            log::error!("Search for {:?} failed with {}", query, res.status());
            return Err(HttpError::Status(res.status()));
        }

        res.json::<Value>()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))
    }
}

pub async fn lookup_knowledge(
    search: &dyn SearchProvider,
    query: &str,
) -> Result<Option<KnowledgeProfile>, HttpError> {
    let result = search.search(query).await?;
    let profile = extract_knowledge_profile(&result);

    log::info!(
        "Knowledge panel for {:?}: {}",
        query,
        match &profile {
            Some(p) => format!("{} fields", p.len()),
            None => "none".to_string(),
        }
    );

    Ok(profile)
}

/// Searches again with the domain words appended. No search is made without a website.
pub async fn rephrase_search(
    search: &dyn SearchProvider,
    company: &str,
    website: &str,
) -> Result<Option<KnowledgeProfile>, HttpError> {
    match rephrase_query(company, website) {
        Some(query) => lookup_knowledge(search, &query).await,
        None => Ok(None),
    }
}

/// Link of the first organic result for `linkedin {company} {website}`.
pub async fn find_linkedin_url(
    search: &dyn SearchProvider,
    company: &str,
    website: &str,
) -> Result<Option<String>, HttpError> {
    let query = format!("linkedin {} {}", company, website);
    let result = search.search(&query).await?;

    Ok(result
        .get("organic_results")
        .and_then(|r| r.get(0))
        .and_then(|first| first.get("link"))
        .and_then(Value::as_str)
        .map(|link| link.to_string()))
}
