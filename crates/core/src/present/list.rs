use fleet_transit::{BusId, BusRecord, BusStatus};

use crate::present::style::{Tone, status_tone, utilization_tone};
use crate::view::{ReadyView, SelectionSink};

#[derive(Clone, Debug, PartialEq)]
pub struct BusRow {
    pub id: BusId,
    pub name: String,
    pub route_number: String,
    pub status: BusStatus,
    pub status_tone: Tone,
    pub driver: String,
    pub license_plate: String,
    /// `current/capacity (pct%)`
    pub load: String,
    /// Bar fill, clamped to `0..=100`.
    pub utilization: f64,
    pub utilization_tone: Tone,
    pub address: String,
    pub eta: Option<String>,
    pub incident_count: usize,
    pub highlighted: bool,
}

impl BusRow {
    fn new(bus: &BusRecord, highlighted: bool) -> Self {
        let load = bus.passengers;
        Self {
            id: bus.id,
            name: bus.name.clone(),
            route_number: bus.route_number.clone(),
            status: bus.status,
            status_tone: status_tone(bus.status),
            driver: bus.driver.name.clone(),
            license_plate: bus.vehicle_info.license_plate.clone(),
            load: format!(
                "{}/{} ({}%)",
                load.current, load.capacity, load.utilization_percentage
            ),
            utilization: load.utilization_percentage.clamp(0.0, 100.0),
            utilization_tone: utilization_tone(load.utilization_percentage),
            address: bus.current_location.address.clone(),
            eta: bus.route_info.estimated_completion.clone(),
            incident_count: bus.incidents.len(),
            highlighted,
        }
    }
}

/// One row per bus, in snapshot order.
#[derive(Clone, Debug, PartialEq)]
pub struct BusListView {
    pub rows: Vec<BusRow>,
}

impl BusListView {
    pub fn new(view: &ReadyView) -> Self {
        let selected = view.selected_id();
        Self {
            rows: view
                .snapshot
                .bus_lines
                .iter()
                .map(|bus| BusRow::new(bus, selected == Some(bus.id)))
                .collect(),
        }
    }

    pub fn highlighted(&self) -> Option<&BusRow> {
        self.rows.iter().find(|row| row.highlighted)
    }

    /// Select the bus on row `index`. Out-of-range clicks are ignored.
    pub fn click(&self, index: usize, sink: &dyn SelectionSink) -> Option<BusId> {
        let id = self.rows.get(index)?.id;
        sink.select(id);
        Some(id)
    }
}
