//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Tolerates repeated initialization so scenario binaries and tests can call
/// it unconditionally.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
