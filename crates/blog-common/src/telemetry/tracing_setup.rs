//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set. Otherwise the default directive applies, which
//! keeps sqlx statement logging quiet and the blog crates at `info`.
//! `LOG_FORMAT` picks the output: `json`, `compact`, or `pretty` (default).

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

const DEFAULT_DIRECTIVE: &str = "info,sqlx=warn,tower_http=info";

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human output with span open/close events
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON for log collectors
    Json,
}

impl FromStr for LogFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(TracingError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub default_directive: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

impl TracingConfig {
    /// Read `LOG_FORMAT`; an unknown value falls back to the default format
    #[must_use]
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self {
            format,
            ..Self::default()
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self.format {
            LogFormat::Pretty => fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .boxed(),
            LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
            LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

/// Install the global subscriber configured from the environment
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::from_env())
}

pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(config.env_filter())
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(TracingError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_default_quiets_sqlx() {
        let config = TracingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.default_directive.contains("sqlx=warn"));
    }

    #[test]
    fn test_second_init_is_an_error() {
        let _ = try_init_tracing_with_config(&TracingConfig::default());
        let second = try_init_tracing_with_config(&TracingConfig::default());
        assert!(matches!(second, Err(TracingError::AlreadyInitialized)));
    }
}
