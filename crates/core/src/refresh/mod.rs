//! Timer-driven re-fetching.
//!
//! One task owns the timer and every in-flight fetch. A tick never cancels
//! an outstanding fetch; results are published in the order they resolve,
//! so whichever fetch finishes last determines the published status.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{Notify, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use fleet_transit::{FetchError, FleetSnapshot, SnapshotFetcher};

use crate::config::{MIN_REFRESH_INTERVAL, REFRESH_INTERVAL};
use crate::view::ViewStateMachine;

type Resolved = (u64, Result<FleetSnapshot, FetchError>);

pub struct RefreshScheduler {
    fetcher: Arc<dyn SnapshotFetcher>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(fetcher: impl SnapshotFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            interval: REFRESH_INTERVAL,
        }
    }

    /// Intervals below [`MIN_REFRESH_INTERVAL`] are raised to it.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval < MIN_REFRESH_INTERVAL {
            warn!(requested = ?interval, minimum = ?MIN_REFRESH_INTERVAL, "refresh interval too short");
        }
        self.interval = interval.max(MIN_REFRESH_INTERVAL);
        self
    }

    /// Spawn the refresh loop on the current tokio runtime. The first fetch
    /// is issued immediately.
    pub fn start(self, machine: Arc<ViewStateMachine>) -> RefreshHandle {
        let gate = Arc::new(PublishGate {
            machine,
            open: Mutex::new(true),
        });
        let manual = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        info!(interval = ?self.interval, "refresh scheduler started");
        let task = tokio::spawn(run(
            self.fetcher,
            self.interval,
            Arc::clone(&gate),
            Arc::clone(&manual),
            shutdown_rx,
        ));

        RefreshHandle {
            gate,
            manual,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }
}

/// Keeps the refresh loop alive. Dropping it tears the loop down.
pub struct RefreshHandle {
    gate: Arc<PublishGate>,
    manual: Arc<Notify>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Issue an extra fetch now and restart the period from here.
    pub fn refresh_now(&self) {
        self.manual.notify_one();
    }

    /// Stop publishing and stop the timer.
    ///
    /// Once this returns no fetch result reaches the view state machine,
    /// including fetches already in flight. Calling it again does nothing.
    pub fn shutdown(&mut self) {
        self.gate.close();
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("refresh scheduler stopped");
        }
    }

    /// Shut down and wait for the loop task to exit.
    pub async fn stopped(mut self) {
        self.shutdown();
        let _ = (&mut self.task).await;
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Publishing and closing take the same lock, so a publish either completes
/// before `close` returns or never happens.
struct PublishGate {
    machine: Arc<ViewStateMachine>,
    open: Mutex<bool>,
}

impl PublishGate {
    fn publish(&self, result: Result<FleetSnapshot, FetchError>) -> bool {
        let open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            self.machine.publish(result);
        }
        *open
    }

    fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

async fn run(
    fetcher: Arc<dyn SnapshotFetcher>,
    interval: Duration,
    gate: Arc<PublishGate>,
    manual: Arc<Notify>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight: JoinSet<Resolved> = JoinSet::new();
    let mut issued: u64 = 0;
    let mut last_published: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            Some(joined) = in_flight.join_next() => match joined {
                Ok((cycle, result)) => {
                    if cycle < last_published {
                        debug!(cycle, last_published, "older fetch resolved after a newer one");
                    }
                    debug!(cycle, ok = result.is_ok(), "fetch resolved");
                    if !gate.publish(result) {
                        break;
                    }
                    last_published = cycle;
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!(error = %e, "fetch task panicked"),
            },

            _ = ticker.tick() => {
                issued += 1;
                spawn_fetch(&mut in_flight, &fetcher, issued);
            }

            _ = manual.notified() => {
                issued += 1;
                debug!(cycle = issued, "manual refresh requested");
                ticker.reset();
                spawn_fetch(&mut in_flight, &fetcher, issued);
            }
        }
    }

    in_flight.abort_all();
}

fn spawn_fetch(in_flight: &mut JoinSet<Resolved>, fetcher: &Arc<dyn SnapshotFetcher>, cycle: u64) {
    if !in_flight.is_empty() {
        debug!(cycle, outstanding = in_flight.len(), "issuing fetch while others are in flight");
    }
    let fetcher = Arc::clone(fetcher);
    in_flight.spawn(async move { (cycle, fetcher.fetch().await) });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fleet_transit::testing::{bus, snapshot};
    use fleet_transit::{BusId, BusStatus, FetchFuture};
    use tokio::time::Instant;

    use super::*;
    use crate::view::{FetchStatus, ViewState};

    /// Answers call `n` with `script[n]` after its delay.
    struct Scripted {
        calls: AtomicUsize,
        script: Vec<(u64, Result<FleetSnapshot, FetchError>)>,
    }

    impl Scripted {
        fn new(script: Vec<(u64, Result<FleetSnapshot, FetchError>)>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                script,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SnapshotFetcher for Scripted {
        fn fetch(&self) -> FetchFuture<'_> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, result) = self
                .script
                .get(n)
                .cloned()
                .unwrap_or((10_000, Err(FetchError::Transport("script exhausted".into()))));
            Box::pin(async move {
                time::sleep(Duration::from_secs(delay)).await;
                result
            })
        }
    }

    fn fleet_of(id: u32) -> Result<FleetSnapshot, FetchError> {
        Ok(snapshot(vec![bus(id, BusStatus::Active)]))
    }

    fn shown_bus(machine: &ViewStateMachine) -> Option<BusId> {
        machine
            .view()
            .ready()
            .map(|ready| ready.snapshot.bus_lines[0].id)
    }

    async fn at(start: Instant, secs: f64) {
        time::sleep_until(start + Duration::from_secs_f64(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_publish_latest_resolution() {
        let fetcher = Scripted::new(vec![(5, fleet_of(1)), (1, fleet_of(2))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let _handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 1.0).await;
        assert_eq!(*machine.view(), ViewState::Loading);

        at(start, 6.0).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(1)));

        at(start, 31.5).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(2)));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_resolved_wins_over_last_requested() {
        // First fetch is slow enough to resolve after the second one.
        let fetcher = Scripted::new(vec![(45, fleet_of(1)), (1, fleet_of(2))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let _handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 31.5).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(2)));

        at(start, 45.5).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_discards_outstanding_fetch() {
        let fetcher = Scripted::new(vec![(12, fleet_of(1)), (1, fleet_of(2))]);
        let machine = Arc::new(ViewStateMachine::new());
        let mut views = machine.subscribe();
        let start = Instant::now();
        let mut handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 10.0).await;
        handle.shutdown();

        at(start, 65.0).await;
        assert_eq!(*machine.view(), ViewState::Loading);
        assert_eq!(machine.status(), FetchStatus::Pending);
        assert!(!views.has_changed().unwrap());
        assert_eq!(fetcher.calls(), 1);

        handle.shutdown();
        handle.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_with_nothing_in_flight() {
        let fetcher = Scripted::new(vec![(1, fleet_of(1))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 5.0).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(1)));
        handle.stopped().await;

        at(start, 100.0).await;
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_handle_tears_down() {
        let fetcher = Scripted::new(vec![(3, fleet_of(1))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 1.0).await;
        drop(handle);

        at(start, 40.0).await;
        assert_eq!(*machine.view(), ViewState::Loading);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_manual_retry() {
        let unavailable = Err(FetchError::Http {
            status: 503,
            message: None,
        });
        let fetcher = Scripted::new(vec![(0, unavailable), (1, fleet_of(7)), (1, fleet_of(8))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let handle = RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

        at(start, 1.0).await;
        match &*machine.view() {
            ViewState::Error { reason } => assert!(reason.contains("503")),
            other => panic!("expected error view, got {other:?}"),
        }

        at(start, 2.0).await;
        handle.refresh_now();

        at(start, 3.5).await;
        assert_eq!(shown_bus(&machine), Some(BusId::new(7)));

        // The manual refresh restarted the period: next tick at t=32.
        at(start, 31.0).await;
        assert_eq!(fetcher.calls(), 2);
        at(start, 33.5).await;
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(shown_bus(&machine), Some(BusId::new(8)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_interval() {
        let fetcher = Scripted::new(vec![(0, fleet_of(1)), (0, fleet_of(2)), (0, fleet_of(3))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let _handle = RefreshScheduler::new(Arc::clone(&fetcher))
            .with_interval(Duration::from_secs(5))
            .start(Arc::clone(&machine));

        at(start, 11.0).await;
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(shown_bus(&machine), Some(BusId::new(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let fetcher = Scripted::new(vec![(0, fleet_of(1)), (0, fleet_of(2)), (0, fleet_of(3))]);
        let machine = Arc::new(ViewStateMachine::new());
        let start = Instant::now();
        let handle = RefreshScheduler::new(Arc::clone(&fetcher))
            .with_interval(Duration::ZERO)
            .start(Arc::clone(&machine));

        at(start, 2.5).await;
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(shown_bus(&machine), Some(BusId::new(3)));
        handle.stopped().await;
    }

    /// Resolves only once released, so the test controls when a result lands.
    struct Gated {
        started: Notify,
        release: Notify,
    }

    impl SnapshotFetcher for Gated {
        fn fetch(&self) -> FetchFuture<'_> {
            Box::pin(async move {
                self.started.notify_one();
                self.release.notified().await;
                fleet_of(1)
            })
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_publish_after_shutdown_across_threads() {
        for _ in 0..200 {
            let fetcher = Arc::new(Gated {
                started: Notify::new(),
                release: Notify::new(),
            });
            let machine = Arc::new(ViewStateMachine::new());
            let mut views = machine.subscribe();
            let mut handle =
                RefreshScheduler::new(Arc::clone(&fetcher)).start(Arc::clone(&machine));

            fetcher.started.notified().await;
            fetcher.release.notify_one();
            handle.shutdown();
            views.borrow_and_update();
            let status = machine.status();

            time::sleep(Duration::from_millis(2)).await;
            assert!(!views.has_changed().unwrap());
            assert_eq!(machine.status(), status);
            handle.stopped().await;
            assert!(!views.has_changed().unwrap());
        }
    }
}
