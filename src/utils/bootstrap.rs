//! Bootstrap utilities for processes hosting the reaction service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "REACTION_LOG";

/// Build the tracing filter from REACTION_LOG, falling back to `default`.
pub fn env_filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
}

/// Initialize tracing with REACTION_LOG environment variable.
///
/// Defaults to the configured filter (normally "info") if REACTION_LOG is
/// not set. Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(&config.filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_init_tracing_twice_is_harmless() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
        tracing::info!(target: "reaction", "bootstrap test");
    }

    #[test]
    #[serial]
    fn test_env_filter_prefers_environment() {
        std::env::set_var(LOG_ENV_VAR, "reaction=trace");
        let filter = env_filter("warn");
        std::env::remove_var(LOG_ENV_VAR);

        assert_eq!(filter.to_string(), "reaction=trace");
    }

    #[test]
    #[serial]
    fn test_env_filter_falls_back_on_invalid_environment() {
        std::env::set_var(LOG_ENV_VAR, "not a [valid filter");
        let filter = env_filter("reaction=debug");
        std::env::remove_var(LOG_ENV_VAR);

        assert_eq!(filter.to_string(), "reaction=debug");
    }
}
