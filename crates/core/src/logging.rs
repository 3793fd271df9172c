//! Subscriber setup shared by the binaries.
//!
//! Filter priority: `FLEET_LOG`, then `RUST_LOG`, then the `verbose` flag.

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "FLEET_LOG";

pub fn setup_logging(verbose: bool) {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        tracing_subscriber::registry()
            .with(build_filter(verbose))
            .with(layer)
            .init();
    });
}

fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(verbose))
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,fleet_core=debug,fleet_server=debug,fleet_dashboard=debug"
    } else {
        "warn,fleet_server=info"
    }
}
