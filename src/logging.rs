//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with filtered output. `RUST_LOG`
//! takes precedence; otherwise `LF_DEBUG` switches on debug output.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable that enables debug logging when present.
pub const DEBUG_ENV: &str = "LF_DEBUG";

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// Install the global subscriber.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
