use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str = concat!("lobx-cost/", env!("CARGO_PKG_VERSION"));

/// Shared GET-and-decode transport for REST book endpoints.
#[derive(Debug, Clone)]
pub struct VenueHttp {
    client: reqwest::Client,
    timeout: Duration,
}

impl VenueHttp {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        // Coinbase rejects requests without a user agent
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let res = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() { FetchError::Timeout(self.timeout) } else { FetchError::Transport(e) }
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let body = res.text().await?;
        debug!(url, bytes = body.len(), "Fetched book payload");
        Ok(serde_json::from_str(&body)?)
    }
}
