//! Logging initialisation and span helpers.
//!
//! Command output goes to stdout; everything emitted through `tracing`
//! goes to stderr so it never mixes with `--format json` output.

use std::fmt;
use std::str::FromStr;
use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs.
    Json,
    /// Compact human-readable logs.
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::validation(format!(
                "{s} is not a valid log format (expected json or pretty)"
            ))),
        }
    }
}

/// Initializes the logging subsystem.
///
/// `default_level` applies when `RUST_LOG` is not set. Safe to call more
/// than once; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use o365_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty, "warn");
/// ```
pub fn init_logging(format: LogFormat, default_level: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tfmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tfmt::layer()
                            .with_target(false)
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    });
}

/// Creates the span used around one CSOM or REST exchange with a site.
#[must_use]
pub fn csom_span(operation: &str, web_url: &str) -> Span {
    tracing::debug_span!("spo", op = operation, web_url = web_url)
}

/// Wraps a secret so that `Debug` and `Display` never print it.
///
/// ```rust
/// use o365_core::observability::Redacted;
///
/// let token = Redacted::new(String::from("eyJ0eXAi..."));
/// assert_eq!(format!("{token}"), "[REDACTED]");
/// assert_eq!(token.expose(), "eyJ0eXAi...");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Wraps a value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    pub const fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_succeeds() {
        init_logging(LogFormat::Pretty, "warn");
        init_logging(LogFormat::Json, "debug");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_csom_span_creates_span() {
        let span = csom_span("process_query", "https://contoso.sharepoint.com");
        let _guard = span.enter();
        tracing::debug!("inside span");
    }

    #[test]
    fn test_redacted_hides_value() {
        let secret = Redacted::new(String::from("ABC"));
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "ABC");
    }
}
