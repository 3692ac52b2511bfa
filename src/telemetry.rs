//! Telemetry initialization.
//!
//! Log level is controlled by `PIREPE_LOG` (standard `EnvFilter` syntax,
//! e.g. `PIREPE_LOG=pirepe=debug`); unset means warnings only. Events go to
//! stderr so stdout stays clean for exported JSON and structured output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PIREPE_LOG";

/// Initialize the tracing subscriber. Call once, at the top of `main`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
