use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use fleet_transit::{BusId, FetchError, FleetSnapshot};

use crate::view::selection::{Selection, SelectionSink};
use crate::view::state::{FetchStatus, ViewState};

struct Inputs {
    status: FetchStatus,
    selection: Selection,
}

/// Sole owner of the fetch status and the selection.
///
/// The two are only changed through [`publish`](Self::publish) and
/// [`select`](Self::select). Each change re-derives the [`ViewState`] under
/// the same lock, so observers never see a status paired with a view derived
/// from an older one.
pub struct ViewStateMachine {
    inputs: Mutex<Inputs>,
    view: watch::Sender<Arc<ViewState>>,
}

impl ViewStateMachine {
    pub fn new() -> Self {
        let (view, _) = watch::channel(Arc::new(ViewState::Loading));
        Self {
            inputs: Mutex::new(Inputs {
                status: FetchStatus::Pending,
                selection: Selection::empty(),
            }),
            view,
        }
    }

    pub fn publish(&self, result: Result<FleetSnapshot, FetchError>) {
        self.publish_at(result, Utc::now());
    }

    /// Record a fetch outcome stamped with `fetched_at`.
    pub fn publish_at(&self, result: Result<FleetSnapshot, FetchError>, fetched_at: DateTime<Utc>) {
        let mut inputs = self.lock();
        inputs.status = match result {
            Ok(snapshot) => {
                for anomaly in snapshot.anomalies() {
                    warn!(%anomaly, "upstream snapshot inconsistency");
                }
                info!(bus_count = snapshot.bus_lines.len(), "fleet snapshot published");
                FetchStatus::Ready {
                    snapshot: Arc::new(snapshot),
                    fetched_at,
                }
            }
            Err(error) => {
                warn!(%error, status = ?error.status(), "fleet fetch failed");
                FetchStatus::Failed {
                    reason: error.to_string(),
                    previous: inputs.status.last_snapshot().cloned(),
                }
            }
        };
        self.rederive(&inputs);
    }

    pub fn select(&self, id: BusId) {
        let mut inputs = self.lock();
        inputs.selection.select(id);
        debug!(bus = %id, "bus selected");
        self.rederive(&inputs);
    }

    /// Current view. The returned value never changes; later updates
    /// replace it.
    pub fn view(&self) -> Arc<ViewState> {
        Arc::clone(&self.view.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.view.subscribe()
    }

    pub fn status(&self) -> FetchStatus {
        self.lock().status.clone()
    }

    pub fn selection(&self) -> Selection {
        self.lock().selection
    }

    fn rederive(&self, inputs: &Inputs) {
        let next = ViewState::derive(&inputs.status, &inputs.selection);
        self.view.send_if_modified(|current| {
            if **current == next {
                false
            } else {
                *current = Arc::new(next);
                true
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ViewStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSink for ViewStateMachine {
    fn select(&self, id: BusId) {
        ViewStateMachine::select(self, id);
    }
}
