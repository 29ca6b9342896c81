//! src/error.rs
//!
//! Error types for graph construction and sample sources.

use thiserror::Error;

/// Errors raised while building a graph. Nothing after construction fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    #[error("surface height must be positive, got {0}")]
    InvalidHeight(u32),

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors raised by a sample source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("serial port error: {source}")]
    Serial {
        #[from]
        source: serialport::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("source exhausted")]
    Closed,
}
