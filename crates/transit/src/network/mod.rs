//! Network abstractions.

pub mod error;
pub mod traits;

pub use error::FetchError;
pub use traits::{FetchFuture, SnapshotFetcher};
