//! Tracing setup for the binary

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "finance_tracker=warn";

/// Initializes the global tracing subscriber, writing to stderr.
///
/// `verbose` raises the crate's level to `debug`. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = if verbose {
            "finance_tracker=debug"
        } else {
            DEFAULT_DIRECTIVE
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
