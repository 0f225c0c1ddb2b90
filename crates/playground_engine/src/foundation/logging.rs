//! Logging setup

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// `default_level` is used unless `RUST_LOG` is set. Safe to call more than once;
/// later calls are no-ops.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::debug!("Logging initialized (default level: {})", default_level);
    }
}
