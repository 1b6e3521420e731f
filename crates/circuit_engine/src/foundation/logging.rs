//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment
pub fn init() {
    env_logger::init();
}
