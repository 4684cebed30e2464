//! Lightweight timing instrumentation.
//!
//! Timings go through `tracing` under the `gridpad::perf` target, so they
//! land wherever the subscriber writes (usually `--log-file`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Times a region until dropped.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: "gridpad::perf", scope = self.name, elapsed_ms, "scope finished");
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record a named event with free-form detail.
///
/// `detail` is only built when timing is enabled.
pub fn log_event(name: &str, detail: impl FnOnce() -> String) {
    if !is_enabled() {
        return;
    }
    tracing::debug!(target: "gridpad::perf", event = name, detail = detail().as_str());
}
