//! Logging infrastructure for the privacy-governance tools.

use std::io;
use std::path::PathBuf;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path, in addition to stderr.
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables. `PRIVGOV_LOG_LEVEL`
    /// wins over `RUST_LOG` when both are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("PRIVGOV_LOG_LEVEL") {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        }

        if let Ok(format) = std::env::var("PRIVGOV_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Ok(file_path) = std::env::var("PRIVGOV_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source) = std::env::var("PRIVGOV_LOG_SOURCE") {
            config.source_location = source.to_lowercase() == "true" || source == "1";
        }

        config
    }
}

/// Initialize logging with the given configuration. Logs go to stderr,
/// and additionally to `file_path` when one is set.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let mut layers = vec![build_layer(&config, None)?];
    if let Some(path) = &config.file_path {
        layers.push(build_layer(&config, Some(path))?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))?;

    Ok(())
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn build_layer(config: &LogConfig, file_path: Option<&PathBuf>) -> Result<BoxedLayer, LogError> {
    macro_rules! finish {
        ($layer:expr) => {
            match file_path {
                Some(path) => {
                    let file = std::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)?;
                    $layer
                        .with_writer(std::sync::Arc::new(file))
                        .with_ansi(false)
                        .boxed()
                }
                None => $layer.with_ansi(true).boxed(),
            }
        };
    }

    Ok(match config.format {
        LogFormat::Pretty => finish!(fmt::layer()
            .with_target(true)
            .with_file(config.source_location)
            .with_line_number(config.source_location)),
        LogFormat::Compact => finish!(fmt::layer().compact()),
        LogFormat::Json => finish!(fmt::layer().json()),
    })
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    Init(String),

    #[error("failed to open log file: {0}")]
    File(#[from] io::Error),
}

pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    // The process environment is shared state; tests that touch it must
    // not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.source_location);
    }

    #[test]
    fn test_config_from_env() {
        let _guard = env_guard();
        let original_level = env::var("PRIVGOV_LOG_LEVEL").ok();
        let original_format = env::var("PRIVGOV_LOG_FORMAT").ok();

        env::set_var("PRIVGOV_LOG_LEVEL", "debug");
        env::set_var("PRIVGOV_LOG_FORMAT", "json");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);

        env::remove_var("PRIVGOV_LOG_LEVEL");
        env::remove_var("PRIVGOV_LOG_FORMAT");
        if let Some(val) = original_level {
            env::set_var("PRIVGOV_LOG_LEVEL", val);
        }
        if let Some(val) = original_format {
            env::set_var("PRIVGOV_LOG_FORMAT", val);
        }
    }

    #[test]
    fn test_rust_log_fallback() {
        let _guard = env_guard();
        let original_level = env::var("PRIVGOV_LOG_LEVEL").ok();
        let original_rust_log = env::var("RUST_LOG").ok();

        env::remove_var("PRIVGOV_LOG_LEVEL");
        env::set_var("RUST_LOG", "warn");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Warn);

        env::remove_var("RUST_LOG");
        if let Some(val) = original_level {
            env::set_var("PRIVGOV_LOG_LEVEL", val);
        }
        if let Some(val) = original_rust_log {
            env::set_var("RUST_LOG", val);
        }
    }
}
