use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::MonitorConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {0}")]
    Status(StatusCode),
}

pub fn create_client(config: &MonitorConfig) -> Result<Client, FetchError> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// GET a page and return its body. Non-2xx responses are errors. With
/// `max_attempts > 1` failed attempts are retried with exponential backoff.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    max_attempts: u32,
) -> Result<String, FetchError> {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let result = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                return response.text().await.map_err(FetchError::from);
            }
            Ok(response) => {
                let status = response.status();
                warn!(url, %status, "HTTP error");
                FetchError::Status(status)
            }
            Err(e) => {
                error!(url, error = %e, "Request failed");
                FetchError::Request(e)
            }
        };

        attempts += 1;
        if attempts >= max_attempts {
            return Err(result);
        }

        let delay = Duration::from_secs(2u64.pow(attempts));
        warn!(
            "Retrying {} in {:?}... (attempt {}/{})",
            url,
            delay,
            attempts + 1,
            max_attempts
        );
        sleep(delay).await;
    }
}
