use chrono::{DateTime, Local, Utc};

use fleet_transit::{CompanyInfo, FleetSnapshot};

use crate::view::ReadyView;

#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    pub title: &'static str,
    pub value: String,
}

/// Company header and fleet aggregates, copied from the snapshot as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryView {
    pub company: CompanyInfo,
    pub stats: Vec<Stat>,
    pub fetched_at: DateTime<Utc>,
}

impl SummaryView {
    pub fn new(view: &ReadyView) -> Self {
        Self::from_snapshot(&view.snapshot, view.fetched_at)
    }

    pub fn from_snapshot(snapshot: &FleetSnapshot, fetched_at: DateTime<Utc>) -> Self {
        let summary = &snapshot.operational_summary;
        let stat = |title, value: u32| Stat {
            title,
            value: value.to_string(),
        };

        Self {
            company: snapshot.company_info.clone(),
            stats: vec![
                stat("Total Buses", summary.total_buses),
                stat("Active Buses", summary.active_buses),
                stat("Maintenance", summary.maintenance_buses),
                stat("Out of Service", summary.out_of_service_buses),
                stat("Total Capacity", summary.total_capacity),
                stat("Current Passengers", summary.current_passengers),
                Stat {
                    title: "Average Utilization",
                    value: format!("{}%", summary.average_utilization),
                },
            ],
            fetched_at,
        }
    }

    /// Wall-clock time of the fetch in the local zone.
    pub fn last_updated(&self) -> String {
        self.fetched_at.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}
