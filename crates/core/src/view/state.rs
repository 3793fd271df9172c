use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleet_transit::{BusId, BusRecord, FleetSnapshot};

use crate::view::selection::Selection;

/// Outcome of the most recently resolved fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchStatus {
    /// Nothing has resolved yet.
    #[default]
    Pending,
    Ready {
        snapshot: Arc<FleetSnapshot>,
        fetched_at: DateTime<Utc>,
    },
    Failed {
        reason: String,
        /// Last good snapshot, carried across consecutive failures.
        previous: Option<Arc<FleetSnapshot>>,
    },
}

impl FetchStatus {
    pub fn last_snapshot(&self) -> Option<&Arc<FleetSnapshot>> {
        match self {
            Self::Pending => None,
            Self::Ready { snapshot, .. } => Some(snapshot),
            Self::Failed { previous, .. } => previous.as_ref(),
        }
    }
}

/// Everything presentation needs, derived from a [`FetchStatus`] and a
/// [`Selection`].
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    Loading,
    Error { reason: String },
    Ready(ReadyView),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReadyView {
    pub snapshot: Arc<FleetSnapshot>,
    pub fetched_at: DateTime<Utc>,
    /// Index into `snapshot.bus_lines` of the resolved selection.
    selected: Option<usize>,
}

impl ReadyView {
    pub fn selected_bus(&self) -> Option<&BusRecord> {
        self.selected.and_then(|index| self.snapshot.bus_lines.get(index))
    }

    pub fn selected_id(&self) -> Option<BusId> {
        self.selected_bus().map(|bus| bus.id)
    }

    pub fn is_selected(&self, id: BusId) -> bool {
        self.selected_id() == Some(id)
    }
}

impl ViewState {
    /// A failure hides any previous snapshot: the error view never shows
    /// stale data.
    pub fn derive(status: &FetchStatus, selection: &Selection) -> Self {
        match status {
            FetchStatus::Pending => Self::Loading,
            FetchStatus::Failed { reason, .. } => Self::Error {
                reason: reason.clone(),
            },
            FetchStatus::Ready {
                snapshot,
                fetched_at,
            } => Self::Ready(ReadyView {
                selected: selection.resolve(snapshot),
                snapshot: Arc::clone(snapshot),
                fetched_at: *fetched_at,
            }),
        }
    }

    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            Self::Ready(ready) => Some(ready),
            Self::Loading | Self::Error { .. } => None,
        }
    }
}
