use fleet_transit::{BusId, BusRecord, BusStatus, Driver, VehicleInfo};

use crate::present::style::{
    Tone, incident_status_tone, priority_tone, status_tone, stop_tone, utilization_tone,
};
use crate::view::ReadyView;

pub const PLACEHOLDER_TITLE: &str = "Select a bus to view details";
pub const PLACEHOLDER_HINT: &str =
    "Click on a bus from the list or map to see detailed information";

#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    /// Nothing selected, or the selected bus is not in this snapshot.
    Placeholder {
        title: &'static str,
        hint: &'static str,
    },
    Bus(Box<BusDetail>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BusDetail {
    pub id: BusId,
    pub name: String,
    pub route_number: String,
    pub status: BusStatus,
    pub status_tone: Tone,
    pub driver: Driver,
    pub vehicle: VehicleInfo,
    pub passengers: String,
    pub utilization: f64,
    pub utilization_tone: Tone,
    pub distance_km: f64,
    pub average_speed_kmh: f64,
    pub frequency_minutes: f64,
    pub estimated_completion: Option<String>,
    pub address: String,
    pub stops: Vec<StopLine>,
    pub incidents: Vec<IncidentLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopLine {
    /// 1-based position along the route.
    pub ordinal: usize,
    pub name: String,
    pub eta: Option<String>,
    pub is_next_stop: bool,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncidentLine {
    pub kind: String,
    pub description: String,
    pub reported_by: String,
    pub reported_time: String,
    pub priority: String,
    pub priority_tone: Tone,
    pub status: String,
    pub status_tone: Tone,
}

impl DetailView {
    pub fn new(view: &ReadyView) -> Self {
        Self::for_bus(view.selected_bus())
    }

    pub fn placeholder() -> Self {
        Self::Placeholder {
            title: PLACEHOLDER_TITLE,
            hint: PLACEHOLDER_HINT,
        }
    }

    pub fn for_bus(bus: Option<&BusRecord>) -> Self {
        match bus {
            None => Self::placeholder(),
            Some(bus) => Self::Bus(Box::new(BusDetail::new(bus))),
        }
    }

    pub fn bus(&self) -> Option<&BusDetail> {
        match self {
            Self::Bus(detail) => Some(detail),
            Self::Placeholder { .. } => None,
        }
    }
}

impl BusDetail {
    fn new(bus: &BusRecord) -> Self {
        let load = bus.passengers;
        Self {
            id: bus.id,
            name: bus.name.clone(),
            route_number: bus.route_number.clone(),
            status: bus.status,
            status_tone: status_tone(bus.status),
            driver: bus.driver.clone(),
            vehicle: bus.vehicle_info.clone(),
            passengers: format!("{}/{}", load.current, load.capacity),
            utilization: load.utilization_percentage,
            utilization_tone: utilization_tone(load.utilization_percentage),
            distance_km: bus.route_info.total_distance,
            average_speed_kmh: bus.route_info.average_speed,
            frequency_minutes: bus.route_info.frequency_minutes,
            estimated_completion: bus.route_info.estimated_completion.clone(),
            address: bus.current_location.address.clone(),
            stops: bus
                .bus_stops
                .iter()
                .enumerate()
                .map(|(index, stop)| StopLine {
                    ordinal: index + 1,
                    name: stop.name.clone(),
                    eta: stop.estimated_arrival.clone(),
                    is_next_stop: stop.is_next_stop,
                    tone: stop_tone(stop.is_next_stop),
                })
                .collect(),
            incidents: bus
                .incidents
                .iter()
                .map(|incident| IncidentLine {
                    kind: incident.kind.clone(),
                    description: incident.description.clone(),
                    reported_by: incident.reported_by.clone(),
                    reported_time: incident.reported_time.clone(),
                    priority: incident.priority.to_string(),
                    priority_tone: priority_tone(&incident.priority),
                    status: incident.status.to_string(),
                    status_tone: incident_status_tone(&incident.status),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use fleet_transit::testing::sample;

    use super::*;

    #[test]
    fn test_none_renders_placeholder() {
        let detail = DetailView::for_bus(None);
        assert_eq!(
            detail,
            DetailView::Placeholder {
                title: "Select a bus to view details",
                hint: "Click on a bus from the list or map to see detailed information",
            }
        );
        assert!(detail.bus().is_none());
    }

    #[test]
    fn test_full_attributes() {
        let snapshot = sample();
        let detail = DetailView::for_bus(snapshot.bus(BusId::new(1)));
        let bus = detail.bus().unwrap();

        assert_eq!(bus.name, "KLCC - Petaling Jaya Express");
        assert_eq!(bus.driver.id, "DRV001");
        assert_eq!(bus.vehicle.license_plate, "WKL 2891");
        assert_eq!(bus.passengers, "32/45");
        assert_eq!(bus.utilization_tone, Tone::Amber);
        assert_eq!(bus.estimated_completion.as_deref(), Some("15:10"));

        let ordinals: Vec<usize> = bus.stops.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, [1, 2, 3]);
        assert!(bus.stops[0].is_next_stop);
        assert_eq!(bus.stops[0].tone, Tone::Accent);

        assert_eq!(bus.incidents.len(), 1);
        assert_eq!(bus.incidents[0].priority_tone, Tone::Green);
        assert_eq!(bus.incidents[0].status_tone, Tone::Green);
    }

    #[test]
    fn test_incident_tones() {
        let snapshot = sample();
        let detail = DetailView::for_bus(snapshot.bus(BusId::new(2)));
        let incident = &detail.bus().unwrap().incidents[0];

        assert_eq!(incident.priority, "High");
        assert_eq!(incident.priority_tone, Tone::Red);
        assert_eq!(incident.status, "Reported");
        assert_eq!(incident.status_tone, Tone::Amber);
    }
}
