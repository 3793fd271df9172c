//! Map projection: markers, route lines and the initial viewport.
//!
//! Produces coordinates and colors only. Tiles and projection belong to
//! whichever map widget draws this.

use geo::{LineString, Point};
use palette::Srgb;

use fleet_transit::{BusId, BusRecord, BusStatus, FleetSnapshot, StopId};

use crate::present::style::{Tone, route_color, status_tone, stop_tone};
use crate::view::{ReadyView, SelectionSink};

/// KL Sentral, used when the fleet is empty.
pub const DEFAULT_LATITUDE: f64 = 3.139;
pub const DEFAULT_LONGITUDE: f64 = 101.6869;
pub const DEFAULT_ZOOM: u8 = 12;

const ROUTE_WEIGHT: f32 = 3.0;
const SELECTED_ROUTE_OPACITY: f32 = 0.8;
const ROUTE_OPACITY: f32 = 0.4;

pub fn default_center() -> Point {
    Point::new(DEFAULT_LONGITUDE, DEFAULT_LATITUDE)
}

/// First Active bus, else the first bus, else [`default_center`].
pub fn initial_center(snapshot: &FleetSnapshot) -> Point {
    snapshot
        .first_active()
        .or_else(|| snapshot.bus_lines.first())
        .map(BusRecord::position)
        .unwrap_or_else(default_center)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BusMarker {
    pub bus: BusId,
    pub position: Point,
    pub tone: Tone,
    pub color: Srgb<u8>,
    pub name: String,
    pub status: BusStatus,
    pub route_number: String,
    pub driver: String,
    /// `current/capacity`
    pub passengers: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopMarker {
    pub bus: BusId,
    pub stop: StopId,
    pub position: Point,
    pub is_next_stop: bool,
    pub tone: Tone,
    pub color: Srgb<u8>,
    pub name: String,
    pub route_number: String,
    pub eta: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteLine {
    pub bus: BusId,
    pub points: LineString,
    pub color: Srgb<u8>,
    pub weight: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: Point,
    pub zoom: u8,
    pub buses: Vec<BusMarker>,
    pub stops: Vec<StopMarker>,
    pub routes: Vec<RouteLine>,
}

impl MapView {
    pub fn new(view: &ReadyView) -> Self {
        let buses = &view.snapshot.bus_lines;
        let mut map = Self {
            center: initial_center(&view.snapshot),
            zoom: DEFAULT_ZOOM,
            buses: Vec::with_capacity(buses.len()),
            stops: Vec::new(),
            routes: Vec::new(),
        };

        for bus in buses {
            let tone = status_tone(bus.status);
            map.buses.push(BusMarker {
                bus: bus.id,
                position: bus.position(),
                tone,
                color: tone.color(),
                name: bus.name.clone(),
                status: bus.status,
                route_number: bus.route_number.clone(),
                driver: bus.driver.name.clone(),
                passengers: format!("{}/{}", bus.passengers.current, bus.passengers.capacity),
                address: bus.current_location.address.clone(),
            });

            // Every flagged stop gets the accent, however many there are.
            for stop in &bus.bus_stops {
                let tone = stop_tone(stop.is_next_stop);
                map.stops.push(StopMarker {
                    bus: bus.id,
                    stop: stop.id,
                    position: stop.point(),
                    is_next_stop: stop.is_next_stop,
                    tone,
                    color: tone.color(),
                    name: stop.name.clone(),
                    route_number: bus.route_number.clone(),
                    eta: stop.estimated_arrival.clone(),
                });
            }

            if bus.bus_stops.len() > 1 {
                map.routes.push(RouteLine {
                    bus: bus.id,
                    points: bus.bus_stops.iter().map(|stop| stop.point()).collect(),
                    color: route_color(&bus.route_number),
                    weight: ROUTE_WEIGHT,
                    opacity: if view.is_selected(bus.id) {
                        SELECTED_ROUTE_OPACITY
                    } else {
                        ROUTE_OPACITY
                    },
                });
            }
        }

        map
    }

    /// Select the bus behind a marker. Ids without a marker are ignored.
    pub fn click_bus(&self, id: BusId, sink: &dyn SelectionSink) -> bool {
        let found = self.buses.iter().any(|marker| marker.bus == id);
        if found {
            sink.select(id);
        }
        found
    }

    pub fn route(&self, bus: BusId) -> Option<&RouteLine> {
        self.routes.iter().find(|route| route.bus == bus)
    }
}
