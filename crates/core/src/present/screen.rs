use crate::present::detail::DetailView;
use crate::present::list::BusListView;
use crate::present::map::MapView;
use crate::present::summary::SummaryView;
use crate::view::ViewState;

pub const LOADING_MESSAGE: &str = "Loading transportation data...";
pub const ERROR_TITLE: &str = "Unable to load data";
pub const RETRY_HINT: &str = "Retry";

/// Everything on screen for one [`ViewState`].
///
/// Loading and error screens carry no list, map or detail.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Loading {
        message: &'static str,
    },
    Error {
        title: &'static str,
        reason: String,
        retry_hint: &'static str,
    },
    Dashboard(Box<DashboardScreen>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardScreen {
    pub summary: SummaryView,
    pub map: MapView,
    pub list: BusListView,
    pub detail: DetailView,
}

impl Screen {
    pub fn new(view: &ViewState) -> Self {
        match view {
            ViewState::Loading => Self::Loading {
                message: LOADING_MESSAGE,
            },
            ViewState::Error { reason } => Self::Error {
                title: ERROR_TITLE,
                reason: reason.clone(),
                retry_hint: RETRY_HINT,
            },
            ViewState::Ready(ready) => Self::Dashboard(Box::new(DashboardScreen {
                summary: SummaryView::new(ready),
                map: MapView::new(ready),
                list: BusListView::new(ready),
                detail: DetailView::new(ready),
            })),
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardScreen> {
        match self {
            Self::Dashboard(dashboard) => Some(dashboard),
            Self::Loading { .. } | Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use fleet_transit::testing::sample;
    use fleet_transit::{BusId, FetchError};

    use super::*;
    use crate::view::ViewStateMachine;

    #[test]
    fn test_loading_before_first_fetch() {
        let machine = ViewStateMachine::new();
        assert_eq!(
            Screen::new(&machine.view()),
            Screen::Loading {
                message: "Loading transportation data..."
            }
        );
    }

    #[test]
    fn test_http_503_renders_only_the_error() {
        let machine = ViewStateMachine::new();
        machine.publish(Ok(sample()));
        machine.select(BusId::new(1));
        machine.publish(Err(FetchError::Http {
            status: 503,
            message: None,
        }));

        let screen = Screen::new(&machine.view());
        assert!(screen.dashboard().is_none());
        match screen {
            Screen::Error { title, reason, .. } => {
                assert_eq!(title, "Unable to load data");
                assert!(reason.contains("503"));
            }
            other => panic!("expected error screen, got {other:?}"),
        }
    }

    #[test]
    fn test_dashboard_with_unresolved_selection() {
        let machine = ViewStateMachine::new();
        machine.select(BusId::new(5));
        machine.publish(Ok(sample()));

        let screen = Screen::new(&machine.view());
        let dashboard = screen.dashboard().unwrap();
        assert_eq!(dashboard.list.rows.len(), 3);
        assert_eq!(dashboard.map.buses.len(), 3);
        assert_eq!(dashboard.detail, DetailView::placeholder());
        assert!(dashboard.list.highlighted().is_none());
    }

    #[test]
    fn test_dashboard_with_resolved_selection() {
        let machine = ViewStateMachine::new();
        machine.publish(Ok(sample()));
        machine.select(BusId::new(3));

        let screen = Screen::new(&machine.view());
        let dashboard = screen.dashboard().unwrap();
        assert_eq!(dashboard.detail.bus().map(|bus| bus.id), Some(BusId::new(3)));
        assert_eq!(dashboard.list.highlighted().map(|row| row.id), Some(BusId::new(3)));
    }
}
