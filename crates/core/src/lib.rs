pub mod config;
pub mod fetch;
pub mod logging;
pub mod present;
pub mod refresh;
pub mod view;

// Re-export the data model from the transit crate
pub use fleet_transit as transit;
