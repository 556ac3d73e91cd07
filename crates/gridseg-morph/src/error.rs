//! Error types for gridseg-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gridseg_core::Error),

    /// Unsupported sample depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid structuring element size
    #[error("invalid structuring element size: {0}")]
    InvalidSize(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
