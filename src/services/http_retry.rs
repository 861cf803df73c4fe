use std::{fmt, time::Duration};

use rand::Rng;
use reqwest::{RequestBuilder, Response, StatusCode};

const NUM_HTTP_RETRIES: u32 = 3; // Retries after the first attempt
const BASE_RETRY_DELAY_MS: u64 = 100;

#[derive(Debug)]
pub enum HttpError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(e) => write!(f, "request failed: {}", e),
            HttpError::Status(status) => write!(f, "unexpected status: {}", status),
            HttpError::Decode(e) => write!(f, "could not decode response: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(value: reqwest::Error) -> Self {
        HttpError::Transport(value)
    }
}

fn should_retry_status(status: StatusCode) -> bool {
    status.is_server_error()
}

fn should_retry_error(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

/// `2^attempt * 100ms` plus up to 20% jitter.
pub fn retry_delay(attempt: u32) -> Duration {
    let delay = BASE_RETRY_DELAY_MS * 2_u64.pow(attempt);
    let jitter = rand::thread_rng().gen_range(0.0..0.2) * delay as f64;
    Duration::from_millis(delay + jitter as u64)
}

/// Sends the request, retrying network failures and 5xx responses.
/// The last response is returned as is, callers decide what a non-200 means.
pub async fn send_with_retry(request: RequestBuilder) -> Result<Response, HttpError> {
    let mut retry_count = 0;

    loop {
        let Some(attempt) = request.try_clone() else {
            // Streaming bodies cannot be replayed
            return Ok(request.send().await?);
        };

        match attempt.send().await {
            Ok(res) if should_retry_status(res.status()) && retry_count < NUM_HTTP_RETRIES => {
                log::warn!(
                    "Got {} from {}, retry {}/{}",
                    res.status(),
                    res.url(),
                    retry_count + 1,
                    NUM_HTTP_RETRIES
                );
            }
            Ok(res) => return Ok(res),
            Err(e) if should_retry_error(&e) && retry_count < NUM_HTTP_RETRIES => {
                log::warn!(
                    "Request error: {:?}, retry {}/{}",
                    e,
                    retry_count + 1,
                    NUM_HTTP_RETRIES
                );
            }
            Err(e) => return Err(HttpError::Transport(e)),
        }

        tokio::time::sleep(retry_delay(retry_count)).await;
        retry_count += 1;
    }
}
