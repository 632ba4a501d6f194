//! Helpers for running `rspec` suites with predictable output.

use rspec::{block::Suite, report::Report, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs an rspec suite serially so scenario logs read in order.
///
/// Every example runs even after a failure; the suite as a whole then fails.
///
/// # Panics
/// Panics when the runner configuration cannot be built or any example fails.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(
        report.is_success(),
        "{} of {} examples failed",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}
