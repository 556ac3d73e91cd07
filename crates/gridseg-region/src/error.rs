//! Error types for gridseg-region

use thiserror::Error;

/// Errors that can occur during segmentation
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gridseg_core::Error),

    /// Morphology error (seed detection)
    #[error("morphology error: {0}")]
    Morph(#[from] gridseg_morph::MorphError),

    /// Unsupported sample depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid algorithm parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Algorithm selector outside the supported set
    #[error("unknown segmentation algorithm: {0:?} (expected \"region-growing\" or \"split-merge\")")]
    UnknownAlgorithm(String),
}

/// Result type for segmentation operations
pub type RegionResult<T> = Result<T, RegionError>;
