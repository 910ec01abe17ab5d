//! Error types for XSLT engine operations

use serde::{Deserialize, Serialize};

/// Result type for XSLT engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all XSLT engine operations.
///
/// Every variant is terminal for the call that produced it: nothing is
/// retried, and no partial output is ever returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text is longer than the engine can address
    #[error("input of {len} bytes exceeds the {limit} byte limit")]
    Size { len: usize, limit: usize },

    /// XML or XSL source failed to parse
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// Stylesheet construction failed or recorded errors
    #[error("XSLT compilation error: {0}")]
    Compile(String),

    /// Applying the stylesheet produced no result
    #[error("XSLT transformation error: {0}")]
    Transform(String),

    /// A parameter name or value cannot be handed to the engine
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Stable classification of an [`Error`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Size,
    Parse,
    Compile,
    Transform,
    InvalidParameter,
    Config,
}

impl Error {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a new XSLT compilation error
    pub fn compile<S: Into<String>>(msg: S) -> Self {
        Error::Compile(msg.into())
    }

    /// Create a new XSLT transformation error
    pub fn transform<S: Into<String>>(msg: S) -> Self {
        Error::Transform(msg.into())
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Size { .. } => ErrorKind::Size,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Compile(_) => ErrorKind::Compile,
            Error::Transform(_) => ErrorKind::Transform,
            Error::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}
