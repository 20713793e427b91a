//! Error types for Pipeviz operations.
//!
//! Interaction and routing never fail: unknown identifiers and stray pointer
//! events degrade to no-ops. [`PipevizError`] only covers the edges of the
//! system, loading inputs and producing output.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Pipeviz operations.
#[derive(Debug, Error)]
pub enum PipevizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A scripted pointer session could not be read.
    ///
    /// Carries the script text and, when known, the byte range of the
    /// offending input for source-annotated reports.
    #[error("Session script error: {message}")]
    Script {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for PipevizError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl PipevizError {
    /// Create a new `Script` error with the associated script source.
    pub fn new_script_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Script {
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}
