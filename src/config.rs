//! Run and logging configuration.

use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};

/// Database file used when the tour runs from the binary.
pub const DEFAULT_DB_PATH: &str = "sql_advanced_1_5.db";

/// Configuration for one tour run
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    /// Path to the SQLite database file, created if absent
    pub db_path: PathBuf,
    /// Turn on `PRAGMA foreign_keys` for the connection
    pub enforce_foreign_keys: bool,
    pub logging: LoggingConfig,
}

impl TourConfig {
    /// Default configuration pointing at another database file
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            enforce_foreign_keys: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Output layout of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// `json` and `pretty` pick those layouts; anything else is the full
    /// single-line layout.
    pub fn log_format(&self) -> LogFormat {
        match self.format.as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Full,
        }
    }

    /// Initialize the tracing subscriber. Output goes to stderr so result
    /// sets on stdout stay clean.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.log_format() {
            LogFormat::Json => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogFormat::Pretty => {
                fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogFormat::Full => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "full".into(),
        }
    }
}
