//! HTTP access to the upstream fleet provider.

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use fleet_api_types::ErrorBody;
use fleet_transit::{FetchError, FetchFuture, FleetSnapshot, SnapshotFetcher};

use crate::config::FetchConfig;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// One fixed upstream URL behind a reusable connection pool.
///
/// Every call is a single GET: no retry, no caching. Failures come back as
/// [`FetchError`] values, never as panics.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(config: &FetchConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the upstream and decode its body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            // The proxy explains its failures in an ErrorBody; anything else
            // just gets the status.
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .map(|body| body.message);
            warn!(status = status.as_u16(), url = %self.url, "upstream answered with failure status");
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(bytes = body.len(), url = %self.url, "upstream body received");
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl SnapshotFetcher for UpstreamClient {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(self.get_json::<FleetSnapshot>())
    }
}

/// reqwest's own message omits the cause chain, which is where the useful
/// part ("connection refused", "operation timed out") lives.
fn transport(error: reqwest::Error) -> FetchError {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    FetchError::Transport(message)
}
