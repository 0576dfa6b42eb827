//! Optional formatted-log wiring for collaborators that want to see the core's
//! `tracing` events (attack-table init, FEN parse failures, debug-audit panics).
//!
//! The core never requires a subscriber: without one, `tracing` events are simply
//! dropped. This module exists only so a process embedding the core (a search driver,
//! a UCI loop, a test harness) can opt into formatted output the same way the
//! teacher's own `logger` module did, stripped of the file-appender plumbing that made
//! sense for a long-running engine process but not for a library crate.

#![cfg(feature = "diagnostics")]

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Install a process-wide formatted subscriber, once. Honors `RUST_LOG` if set,
/// otherwise falls back to `filter`. Safe to call more than once; later calls are
/// no-ops.
pub fn init_tracing(filter: &str) {
    INIT.get_or_init(|| {
        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
