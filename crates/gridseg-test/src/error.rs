//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a test grid
    #[error("failed to build test grid: {0}")]
    GridBuild(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
