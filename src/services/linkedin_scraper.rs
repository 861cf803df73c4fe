use std::{sync::Arc, time::Duration};

use backoff::{backoff::Backoff, future::retry_notify};
use rand::Rng;

use crate::{configuration::ScraperSettings, domain::LinkedInProfile};

use super::{ScrapeError, ScrapeOptions, ScrapeProxy};

const LINKEDIN_SCRAPE_OPTIONS: ScrapeOptions = ScrapeOptions {
    js_render: true,
    premium_proxy: true,
};

/// Exponential backoff for proxy rate limits.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Total attempts, the first one included.
    pub attempts: u32,
    pub min_timeout: Duration,
    pub factor: u32,
    pub max_timeout: Option<Duration>,
}

impl BackoffPolicy {
    /// Delay before retry number `retry` (0-based), scaled by `jitter` in `[1, 2)`.
    pub fn delay(&self, retry: u32, jitter: f64) -> Duration {
        let base = self.min_timeout.as_millis() as f64 * f64::from(self.factor).powi(retry as i32);
        let delay = Duration::from_millis((base * jitter).round() as u64);

        match self.max_timeout {
            Some(max) => delay.min(max),
            None => delay,
        }
    }
}

impl From<&ScraperSettings> for BackoffPolicy {
    fn from(settings: &ScraperSettings) -> Self {
        BackoffPolicy {
            attempts: settings.attempts.max(1),
            min_timeout: Duration::from_millis(settings.min_timeout_ms),
            factor: settings.factor,
            max_timeout: settings.max_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Retry schedule of a single extraction, built fresh from the policy each time.
#[derive(Debug)]
pub struct RateLimitBackoff {
    policy: BackoffPolicy,
    retries: u32,
}

impl RateLimitBackoff {
    pub fn new(policy: BackoffPolicy) -> Self {
        RateLimitBackoff { policy, retries: 0 }
    }
}

impl Backoff for RateLimitBackoff {
    fn reset(&mut self) {
        self.retries = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.retries + 1 >= self.policy.attempts {
            return None;
        }

        let jitter = rand::thread_rng().gen_range(1.0..2.0);
        let delay = self.policy.delay(self.retries, jitter);
        self.retries += 1;

        Some(delay)
    }
}

pub struct LinkedinScraper {
    proxy: Arc<dyn ScrapeProxy>,
    policy: BackoffPolicy,
}

impl LinkedinScraper {
    pub fn new(proxy: Arc<dyn ScrapeProxy>, policy: BackoffPolicy) -> Self {
        LinkedinScraper { proxy, policy }
    }

    /// Only rate limits are retried. `None` when the page could not be scraped.
    pub async fn extract_profile(&self, url: &str) -> Option<LinkedInProfile> {
        let proxy = self.proxy.as_ref();

        let html = retry_notify(
            RateLimitBackoff::new(self.policy.clone()),
            || async move {
                proxy
                    .fetch(url, LINKEDIN_SCRAPE_OPTIONS)
                    .await
                    .map_err(|e| match e {
                        ScrapeError::RateLimited => backoff::Error::transient(e),
                        e => backoff::Error::permanent(e),
                    })
            },
            |e: ScrapeError, delay: Duration| {
                log::warn!("{} on {}, retrying in {:?}", e, url, delay)
            },
        )
        .await;

        match html {
            Ok(html) => Some(LinkedInProfile::from_html(&html)),
            Err(e) => {
                log::error!("LinkedIn scrape of {} failed: {}", url, e);
                None
            }
        }
    }

    /// Sentence summary of the page, `None` when nothing could be said.
    pub async fn create_linkedin_sentence(&self, url: &str) -> Option<(LinkedInProfile, String)> {
        let profile = self.extract_profile(url).await?;
        let sentence = profile.to_sentence();

        Some((profile, sentence))
    }
}
