//! Compile-time defaults, overridable by the binaries' command lines.

use std::time::Duration;

/// Polling cadence of the refresh scheduler.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest interval the scheduler accepts.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://www.amanabootcamp.org/api/fs-classwork-data/amana-transportation";

pub const DEFAULT_USER_AGENT: &str = concat!("fleet-dashboard/", env!("CARGO_PKG_VERSION"));

/// Upper bound on one request. A hung fetch otherwise stays in flight forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}
