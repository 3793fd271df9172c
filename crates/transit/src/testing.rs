//! Snapshot builders for tests in this and downstream crates.

use crate::identifiers::*;
use crate::models::*;

/// A three-bus snapshot shaped like real upstream output.
pub const SAMPLE_JSON: &str = include_str!("../fixtures/snapshot.json");

pub fn sample() -> FleetSnapshot {
    serde_json::from_str(SAMPLE_JSON).expect("sample fixture decodes")
}

/// A bus with two stops and no incidents, positioned by its id so distinct
/// buses never share coordinates.
pub fn bus(id: u32, status: BusStatus) -> BusRecord {
    let offset = f64::from(id) / 100.0;
    BusRecord {
        id: BusId::new(id),
        name: format!("Line {id}"),
        route_number: format!("B{id:03}"),
        current_location: Location {
            latitude: 3.0 + offset,
            longitude: 101.0 + offset,
            address: format!("Stop {id} Road"),
        },
        status,
        passengers: Passengers {
            current: 10,
            capacity: 40,
            utilization_percentage: 25.0,
        },
        driver: Driver {
            name: format!("Driver {id}"),
            id: format!("DRV{id:03}"),
            shift_start: "06:00".to_owned(),
            shift_end: "18:00".to_owned(),
        },
        bus_stops: vec![
            stop(id * 10, 3.1 + offset, 101.1 + offset, true),
            stop(id * 10 + 1, 3.2 + offset, 101.2 + offset, false),
        ],
        incidents: Vec::new(),
        vehicle_info: VehicleInfo {
            license_plate: format!("WKL {id:04}"),
            model: "Scania K230UB".to_owned(),
            year: 2020,
            fuel_level: 80.0,
            last_maintenance: "2024-12-01".to_owned(),
        },
        route_info: RouteInfo {
            total_distance: 20.0,
            average_speed: 25.0,
            estimated_completion: Some("15:00".to_owned()),
            frequency_minutes: 15.0,
        },
    }
}

pub fn stop(id: u32, latitude: f64, longitude: f64, is_next_stop: bool) -> BusStop {
    BusStop {
        id: StopId::new(id),
        name: format!("Stop {id}"),
        latitude,
        longitude,
        estimated_arrival: Some("14:30".to_owned()),
        is_next_stop,
    }
}

/// Wrap buses in a snapshot whose summary agrees with them.
pub fn snapshot(bus_lines: Vec<BusRecord>) -> FleetSnapshot {
    let count = |status: BusStatus| {
        bus_lines.iter().filter(|bus| bus.status == status).count() as u32
    };
    let total_capacity = bus_lines.iter().map(|bus| bus.passengers.capacity).sum();
    let current_passengers = bus_lines.iter().map(|bus| bus.passengers.current).sum();
    let average_utilization = if bus_lines.is_empty() {
        0.0
    } else {
        let sum: f64 = bus_lines
            .iter()
            .map(|bus| bus.passengers.utilization_percentage)
            .sum();
        (sum / bus_lines.len() as f64).round()
    };

    FleetSnapshot {
        message: "ok".to_owned(),
        company_info: CompanyInfo {
            name: "Test Transit".to_owned(),
            founded: "2019".to_owned(),
            headquarters: "Kuala Lumpur".to_owned(),
            industry: "Public Transportation".to_owned(),
            description: "Fixture fleet".to_owned(),
        },
        operational_summary: OperationalSummary {
            total_buses: bus_lines.len() as u32,
            active_buses: count(BusStatus::Active),
            maintenance_buses: count(BusStatus::Maintenance),
            out_of_service_buses: count(BusStatus::OutOfService),
            total_capacity,
            current_passengers,
            average_utilization,
        },
        bus_lines,
        filters: Filters::default(),
    }
}
