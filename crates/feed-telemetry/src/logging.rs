//! Structured logging setup.
//!
//! Log lines carry consistent fields so runs can be grepped or shipped:
//! - `service`: service name from config
//! - `topic`: BLK / TXN
//! - `hash`: canonical hash, 64 hex chars
//! - `sequence`: publisher sequence counter when present

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Handle returned once the global subscriber is installed.
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    /// Service name the logger was configured with.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Build the `EnvFilter` for a config.
///
/// Only `config.log_level` is consulted; `TelemetryConfig::from_env` has
/// already folded `RUST_LOG` in below `FEED_LOG_LEVEL`, and flags override both.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber was already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    let filter = env_filter(config)?;

    let fmt_layer = if !config.console_output {
        None
    } else if config.json_logs {
        // JSON output for containers
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(true)
                .boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(StructuredLogger {
        service_name: config.service_name.clone(),
    })
}

/// Log a notification-related event with standard fields.
#[macro_export]
macro_rules! log_notification {
    ($level:ident, $msg:expr, $topic:expr, $hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            topic = %$topic,
            hash = %$hash,
            $($($field)*,)?
            $msg
        )
    };
}
