//! Logger set-up for the headless runner and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` takes precedence over [`default_level`]. Calling this again
/// after a logger is installed does nothing, so tests may call it freely.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).as_str());
    if Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("logger already installed");
    }
}
