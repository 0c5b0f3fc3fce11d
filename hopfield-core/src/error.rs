//! # Error Types for the Hopfield engine
//!
//! Unified error handling across the core and its hosts.

use thiserror::Error;

/// Main error type for associative-memory operations
#[derive(Error, Debug)]
pub enum HopfieldError {
    /// A state or pattern vector does not have one entry per cell
    #[error("Size mismatch: expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot on disk is not a valid weight store
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Result type for associative-memory operations
pub type HopfieldResult<T> = Result<T, HopfieldError>;

impl HopfieldError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a corrupt-snapshot error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Fail unless `actual` matches the expected cell count
    pub fn check_len(expected: usize, actual: usize) -> HopfieldResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::SizeMismatch { expected, actual })
        }
    }
}

impl From<bincode::Error> for HopfieldError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
