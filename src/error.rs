//! Error types for configuration loading.
//!
//! The tick loop itself has no error path: invalid commands are ignored and
//! table lookups are total. Errors only arise while turning external
//! configuration into a [`crate::game::Topology`] and [`crate::game::Rules`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to load or validate match configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The configuration was not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// The configuration parsed but describes an impossible match.
    Invalid(String),
}

impl ConfigError {
    /// Create a validation error.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "invalid configuration JSON: {e}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
