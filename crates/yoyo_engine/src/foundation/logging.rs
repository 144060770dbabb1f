//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};
use log::LevelFilter;

/// Initialize the logging system with an `info` default filter
///
/// `RUST_LOG` still takes precedence when it is set.
pub fn init() {
    init_with_level(LevelFilter::Info);
}

/// Initialize the logging system with the given default filter
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_level(default_level: LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(default_level.to_string());
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}
