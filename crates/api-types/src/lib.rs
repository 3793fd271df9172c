//! Wire contract of the local transportation proxy.
//!
//! Shared by the proxy server (which produces these responses) and the
//! dashboard fetcher (which reads the error body back out of failed calls).

use serde::{Deserialize, Serialize};

/// Path the proxy serves the fleet snapshot on.
pub const TRANSPORTATION_PATH: &str = "/api/transportation";

/// `Cache-Control` value attached to every successful proxy response.
pub const CACHE_CONTROL: &str = "public, s-maxage=30, stale-while-revalidate=60";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// `error` field of every failure body produced by the proxy.
pub const FETCH_FAILED: &str = "Failed to fetch transportation data";

/// Body of a non-success proxy response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self {
            error: FETCH_FAILED.to_owned(),
            message: message.into(),
        }
    }
}
