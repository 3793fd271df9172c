//! Pure projections of a [`ViewState`](crate::view::ViewState) into the
//! summary, list, map and detail panels.

pub mod detail;
pub mod list;
pub mod map;
pub mod screen;
pub mod style;
pub mod summary;

pub use detail::DetailView;
pub use list::BusListView;
pub use map::MapView;
pub use screen::{DashboardScreen, Screen};
pub use summary::SummaryView;
