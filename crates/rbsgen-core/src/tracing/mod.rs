//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `rbsgen_analysis=debug`.
pub const LOG_ENV_VAR: &str = "RBSGEN_LOG";

/// Install a global fmt subscriber filtered by `RBSGEN_LOG`, falling back to
/// `default_directive` when the variable is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
