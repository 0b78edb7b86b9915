//! Orbital mechanics lessons: Kepler's laws and Newton's cannon.
//!
//! The numerical core lives in `kepler_orbits`; this crate assembles lesson
//! scenes from configuration, exports their sample arrays, and renders them.

pub mod render;
pub mod scene;

use tracing_subscriber::EnvFilter;

pub use kepler_config as config;
pub use kepler_core as primitives;
pub use kepler_export as export;
pub use kepler_orbits as orbits;

/// Install the stderr `tracing` subscriber used by the binaries.
///
/// Logs go to stderr so CSV written to stdout stays clean. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
