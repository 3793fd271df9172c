//! Consistency checks over a decoded snapshot.
//!
//! The upstream contract is trusted: a snapshot with anomalies is still a
//! valid snapshot. These only exist so callers can log what looks wrong.

use crate::identifiers::BusId;
use crate::models::snapshot::{FleetSnapshot, Passengers};

/// Reported utilization may differ from the derived one by rounding only.
const UTILIZATION_TOLERANCE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SnapshotAnomaly {
    /// Sum of per-bus loads differs from `operational_summary.current_passengers`.
    #[error("summary reports {reported} passengers but buses carry {counted}")]
    PassengerTotalMismatch { reported: u32, counted: u64 },

    #[error("bus {bus} carries {current} passengers over capacity {capacity}")]
    OverCapacity { bus: BusId, current: u32, capacity: u32 },

    #[error("bus {bus} reports {reported}% utilization, load implies {derived}%")]
    UtilizationMismatch { bus: BusId, reported: f64, derived: f64 },

    #[error("bus {bus} has {count} stops flagged as next")]
    MultipleNextStops { bus: BusId, count: usize },
}

impl Passengers {
    /// What is wrong with this load, if anything. Over capacity takes
    /// precedence over a utilization mismatch.
    pub fn anomaly(&self, bus: BusId) -> Option<SnapshotAnomaly> {
        if self.current > self.capacity {
            return Some(SnapshotAnomaly::OverCapacity {
                bus,
                current: self.current,
                capacity: self.capacity,
            });
        }
        let derived = self.derived_utilization()?;
        ((derived - self.utilization_percentage).abs() >= UTILIZATION_TOLERANCE).then_some(
            SnapshotAnomaly::UtilizationMismatch {
                bus,
                reported: self.utilization_percentage,
                derived,
            },
        )
    }
}

impl FleetSnapshot {
    pub fn anomalies(&self) -> Vec<SnapshotAnomaly> {
        let mut found = Vec::new();

        let counted: u64 = self
            .bus_lines
            .iter()
            .map(|bus| u64::from(bus.passengers.current))
            .sum();
        let reported = self.operational_summary.current_passengers;
        if counted != u64::from(reported) {
            found.push(SnapshotAnomaly::PassengerTotalMismatch { reported, counted });
        }

        for bus in &self.bus_lines {
            found.extend(bus.passengers.anomaly(bus.id));

            let count = bus.next_stops().count();
            if count > 1 {
                found.push(SnapshotAnomaly::MultipleNextStops { bus: bus.id, count });
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FleetSnapshot {
        serde_json::from_str(include_str!("../../fixtures/snapshot.json")).unwrap()
    }

    #[test]
    fn test_sample_is_clean() {
        assert!(sample().anomalies().is_empty());
    }

    #[test]
    fn test_passenger_total_mismatch() {
        let mut snapshot = sample();
        snapshot.operational_summary.current_passengers = 40;

        assert_eq!(
            snapshot.anomalies(),
            vec![SnapshotAnomaly::PassengerTotalMismatch {
                reported: 40,
                counted: 32
            }]
        );
    }

    #[test]
    fn test_per_bus_anomalies() {
        let mut snapshot = sample();
        snapshot.operational_summary.current_passengers = 50 + 2;

        let express = &mut snapshot.bus_lines[0];
        express.passengers.current = 50;
        for stop in &mut express.bus_stops {
            stop.is_next_stop = true;
        }

        let shuttle = &mut snapshot.bus_lines[1];
        shuttle.passengers.current = 2;

        let found = snapshot.anomalies();
        assert_eq!(found.len(), 3);
        assert!(found.contains(&SnapshotAnomaly::OverCapacity {
            bus: BusId::new(1),
            current: 50,
            capacity: 45
        }));
        assert!(found.contains(&SnapshotAnomaly::MultipleNextStops {
            bus: BusId::new(1),
            count: 3
        }));
        assert!(found.contains(&SnapshotAnomaly::UtilizationMismatch {
            bus: BusId::new(2),
            reported: 0.0,
            derived: 5.0
        }));
    }

    #[test]
    fn test_passenger_load_checks() {
        let bus = BusId::new(7);
        let load = |current, capacity, utilization_percentage| Passengers {
            current,
            capacity,
            utilization_percentage,
        };

        assert_eq!(load(32, 45, 71.0).anomaly(bus), None);
        assert_eq!(load(32, 45, 71.4).anomaly(bus), None);
        assert_eq!(load(0, 0, 0.0).anomaly(bus), None);
        assert_eq!(
            load(50, 45, 100.0).anomaly(bus),
            Some(SnapshotAnomaly::OverCapacity {
                bus,
                current: 50,
                capacity: 45
            })
        );
        assert_eq!(
            load(32, 45, 60.0).anomaly(bus),
            Some(SnapshotAnomaly::UtilizationMismatch {
                bus,
                reported: 60.0,
                derived: 71.0
            })
        );
    }

    #[test]
    fn test_display_mentions_bus() {
        let anomaly = SnapshotAnomaly::MultipleNextStops {
            bus: BusId::new(4),
            count: 2,
        };
        assert_eq!(anomaly.to_string(), "bus 4 has 2 stops flagged as next");

        let total = SnapshotAnomaly::PassengerTotalMismatch {
            reported: 40,
            counted: 32,
        };
        assert_eq!(
            total.to_string(),
            "summary reports 40 passengers but buses carry 32"
        );
    }
}
