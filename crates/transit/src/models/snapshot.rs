//! The fleet snapshot returned by the upstream provider.
//!
//! Field names follow the upstream JSON exactly. A snapshot is never edited
//! after decoding; the next successful fetch replaces it wholesale.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub message: String,
    pub company_info: CompanyInfo,
    pub bus_lines: Vec<BusRecord>,
    pub operational_summary: OperationalSummary,
    #[serde(default)]
    pub filters: Filters,
}

impl FleetSnapshot {
    /// Exact id lookup.
    pub fn bus(&self, id: BusId) -> Option<&BusRecord> {
        self.bus_lines.iter().find(|bus| bus.id == id)
    }

    pub fn index_of(&self, id: BusId) -> Option<usize> {
        self.bus_lines.iter().position(|bus| bus.id == id)
    }

    pub fn first_active(&self) -> Option<&BusRecord> {
        self.bus_lines.iter().find(|bus| bus.status.is_active())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub founded: String,
    pub headquarters: String,
    pub industry: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalSummary {
    pub total_buses: u32,
    pub active_buses: u32,
    pub maintenance_buses: u32,
    pub out_of_service_buses: u32,
    pub total_capacity: u32,
    pub current_passengers: u32,
    pub average_utilization: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub available_statuses: Vec<String>,
    pub available_routes: Vec<String>,
    pub applied: AppliedFilters,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    pub status: Option<String>,
    #[serde(rename = "busId")]
    pub bus_id: Option<BusId>,
    #[serde(rename = "routeNumber")]
    pub route_number: Option<String>,
}

// ============================================================================
// Bus
// ============================================================================

/// One bus line. `id` identifies the same logical bus across snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub id: BusId,
    pub name: String,
    pub route_number: String,
    pub current_location: Location,
    pub status: BusStatus,
    pub passengers: Passengers,
    pub driver: Driver,
    pub bus_stops: Vec<BusStop>,
    pub incidents: Vec<Incident>,
    pub vehicle_info: VehicleInfo,
    pub route_info: RouteInfo,
}

impl BusRecord {
    /// Stops flagged as next. Upstream promises at most one but does not
    /// enforce it.
    pub fn next_stops(&self) -> impl Iterator<Item = &BusStop> {
        self.bus_stops.iter().filter(|stop| stop.is_next_stop)
    }

    pub fn position(&self) -> Point {
        self.current_location.point()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Location {
    /// x is longitude, y is latitude.
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Passengers {
    pub current: u32,
    pub capacity: u32,
    pub utilization_percentage: f64,
}

impl Passengers {
    /// `round(100 * current / capacity)`, or `None` for a zero capacity.
    pub fn derived_utilization(&self) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        Some((100.0 * f64::from(self.current) / f64::from(self.capacity)).round())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub id: String,
    pub shift_start: String,
    pub shift_end: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    pub id: StopId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "not_available", default)]
    pub estimated_arrival: Option<String>,
    pub is_next_stop: bool,
}

impl BusStop {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub reported_by: String,
    pub reported_time: String,
    pub status: IncidentStatus,
    pub priority: Priority,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub license_plate: String,
    pub model: String,
    pub year: u32,
    pub fuel_level: f64,
    pub last_maintenance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub total_distance: f64,
    pub average_speed: f64,
    #[serde(with = "not_available", default)]
    pub estimated_completion: Option<String>,
    pub frequency_minutes: f64,
}

/// The upstream writes `"N/A"` for times it does not know.
mod not_available {
    use serde::{Deserialize, Deserializer, Serializer};

    const SENTINEL: &str = "N/A";

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(SENTINEL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|value| value != SENTINEL && !value.is_empty()))
    }
}
