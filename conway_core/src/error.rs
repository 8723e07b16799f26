//! Error types for conway_core.
//!
//! The engine and session never fail at runtime; contract violations panic.
//! Everything recoverable comes from loading and checking configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Malformed TOML
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values that parse but break an invariant
    #[error("Invalid config: {0}")]
    Validation(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<LifeError>,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
