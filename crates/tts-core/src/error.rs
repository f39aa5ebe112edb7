//! Unified error type for the classification workspace.
//!
//! Only genuine failures live here. A parameter value missing from the
//! table is not an error; see [`crate::estimate::Estimate::Unavailable`].
//!
//! # Example
//!
//! ```
//! use tts_core::{TtsError, TtsResult};
//!
//! fn require_rating(value: Option<f64>) -> TtsResult<f64> {
//!     value.ok_or_else(|| TtsError::Validation("MVA rating is missing".into()))
//! }
//!
//! assert!(require_rating(None).is_err());
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// A transformer record is missing or carries an invalid MVA/BIL rating
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record matches the requested identifier
    #[error("No transformer record found for '{id}'")]
    NotFound { id: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type TtsResult<T> = Result<T, TtsError>;

impl TtsError {
    pub fn not_found(id: impl Into<String>) -> Self {
        TtsError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TtsError::NotFound { .. })
    }
}

impl From<anyhow::Error> for TtsError {
    fn from(err: anyhow::Error) -> Self {
        TtsError::Other(err.to_string())
    }
}

impl From<String> for TtsError {
    fn from(s: String) -> Self {
        TtsError::Other(s)
    }
}

impl From<&str> for TtsError {
    fn from(s: &str) -> Self {
        TtsError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for TtsError {
    fn from(err: serde_json::Error) -> Self {
        TtsError::Parse(err.to_string())
    }
}
