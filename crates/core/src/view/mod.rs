//! Fetch status and selection merged into one renderable state.

pub mod machine;
pub mod selection;
pub mod state;

pub use machine::ViewStateMachine;
pub use selection::{Selection, SelectionSink};
pub use state::{FetchStatus, ReadyView, ViewState};
