//! Logging bootstrap

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if the
/// level is not a valid filter directive, the format is unknown, or a
/// global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> crate::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .try_init(),
        "text" => registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init(),
        other => return Err(crate::Error::Config(format!("Unknown log format: {}", other))),
    };

    result.map_err(|e| crate::Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(level: &str) -> crate::Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| crate::Error::Config(format!("Invalid log level {:?}: {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("warn,stagemail_core=trace").is_ok());
        assert!(build_filter("stagemail_core=notalevel").is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };

        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("Unknown log format"));
    }
}
