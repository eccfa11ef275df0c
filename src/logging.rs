//! Logging setup
//!
//! A [`Logger`] is built from a [`LogConfig`] and handed to whatever needs
//! it. Nothing here installs a process-wide subscriber.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::filter::{EnvFilter, LevelFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer};

/// Default file sink, appended to across runs
pub const DEFAULT_LOG_FILE: &str = "wordle_game_logs.log";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid console filter: {0}")]
    Filter(#[from] ParseError),
}

/// Where log events go and how much of them
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// File sink. `None` disables it.
    pub file: Option<PathBuf>,
    /// Most verbose level written to the file
    pub file_level: LevelFilter,
    /// `EnvFilter` directive for the stderr sink. `None` disables it.
    pub console: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            file_level: LevelFilter::TRACE,
            console: Some("info".to_string()),
        }
    }
}

/// Handle to a configured set of log sinks
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    pub fn new(config: &LogConfig) -> Result<Self, LogError> {
        let file_layer = match &config.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LogError::File {
                        path: path.clone(),
                        source,
                    })?;
                Some(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_filter(config.file_level),
                )
            }
            None => None,
        };

        let console_layer = match &config.console {
            Some(directive) => Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(EnvFilter::try_new(directive)?),
            ),
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Wrap a subscriber the caller built themselves
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// A logger that discards every event
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Run `f` with this logger receiving its events
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_receives_all_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        let logger = Logger::new(&LogConfig {
            file: Some(path.clone()),
            file_level: LevelFilter::TRACE,
            console: None,
        })
        .unwrap();

        logger.in_scope(|| {
            tracing::trace!("fine grained");
            tracing::warn!("something odd");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("fine grained"));
        assert!(contents.contains("something odd"));
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let logger = Logger::new(&LogConfig {
            file: Some(path.clone()),
            file_level: LevelFilter::INFO,
            console: None,
        })
        .unwrap();
        logger.in_scope(|| {
            tracing::debug!("too quiet");
            tracing::info!("this run");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.contains("this run"));
        assert!(!contents.contains("too quiet"));
    }

    #[test]
    fn test_unopenable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: Some(dir.path().join("missing").join("game.log")),
            ..LogConfig::default()
        };
        assert!(matches!(Logger::new(&config), Err(LogError::File { .. })));
    }
}
