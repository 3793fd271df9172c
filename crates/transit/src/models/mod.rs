//! Fleet data models and closed enumerations.

pub mod anomaly;
pub mod snapshot;
pub mod types;

// Re-exports for convenience
pub use anomaly::SnapshotAnomaly;
pub use snapshot::{
    AppliedFilters, BusRecord, BusStop, CompanyInfo, Driver, Filters, FleetSnapshot, Incident,
    Location, OperationalSummary, Passengers, RouteInfo, VehicleInfo,
};
pub use types::{BusStatus, IncidentStatus, Priority};
