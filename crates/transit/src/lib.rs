//! # fleet-transit
//!
//! Data model for the bus-fleet dashboard.
//!
//! ## Features
//!
//! - **Snapshot model**: serde types matching the upstream fleet JSON
//! - **Closed enumerations**: status and priority strings with explicit fallbacks
//! - **Consistency checks**: report upstream contract violations without rejecting data
//! - **Pluggable fetching**: implement [`SnapshotFetcher`] to provide snapshots
//!
//! ## Example
//!
//! ```
//! use fleet_transit::prelude::*;
//!
//! let json = r#"{
//!     "company_info": {
//!         "name": "Amana Transportation", "founded": "2019",
//!         "headquarters": "Kuala Lumpur", "industry": "Public Transportation",
//!         "description": "City buses"
//!     },
//!     "bus_lines": [],
//!     "operational_summary": {
//!         "total_buses": 0, "active_buses": 0, "maintenance_buses": 0,
//!         "out_of_service_buses": 0, "total_capacity": 0,
//!         "current_passengers": 0, "average_utilization": 0
//!     }
//! }"#;
//!
//! let snapshot: FleetSnapshot = serde_json::from_str(json).unwrap();
//! assert!(snapshot.bus_lines.is_empty());
//! assert!(snapshot.bus(BusId::new(1)).is_none());
//! assert!(snapshot.anomalies().is_empty());
//! ```

pub mod identifiers;
pub mod models;
pub mod network;

#[cfg(feature = "fixtures")]
pub mod testing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::network::*;
}

pub use prelude::*;
