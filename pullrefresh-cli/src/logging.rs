//! Logging configuration

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,     // log level (trace, debug, info, warn, error)
    pub json_format: bool, // use JSON formatting
}

impl LoggingConfig {
    /// Initialize logging. `RUST_LOG` wins over the configured level.
    pub fn init(&self) -> anyhow::Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))?;

        // stdout carries the report, logs go to stderr
        let layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);

        if self.json_format {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer.json())
                .try_init()?;
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()?;
        }

        tracing::debug!("Logging initialized - level: {}", self.level);

        Ok(())
    }
}
