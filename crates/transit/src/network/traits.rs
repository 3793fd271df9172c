//! Pluggable fetching trait.
//!
//! External crates implement this to provide the snapshot source: the HTTP
//! client in `fleet-core`, or scripted fetchers in tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::snapshot::FleetSnapshot;
use crate::network::error::FetchError;

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FleetSnapshot, FetchError>> + Send + 'a>>;

/// Retrieve one complete fleet snapshot.
///
/// Implementations perform a single attempt: no retry, no caching.
pub trait SnapshotFetcher: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;
}

impl<T: SnapshotFetcher + ?Sized> SnapshotFetcher for Arc<T> {
    fn fetch(&self) -> FetchFuture<'_> {
        (**self).fetch()
    }
}
