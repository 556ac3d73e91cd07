//! Gridseg - Region-based image segmentation for Rust
//!
//! # Overview
//!
//! Gridseg segments grayscale and color images into regions using:
//!
//! - Seeded region growing from local intensity minima
//! - Quadtree split-and-merge over a homogeneity threshold
//!
//! plus the supporting pieces: grayscale morphology for seed detection,
//! PNG/PNM I/O with format sniffing, and a bytes-in, bytes-out pipeline
//! for callers that never touch a decoded grid.
//!
//! # Example
//!
//! ```
//! use gridseg::{Grid, GridDepth};
//! use gridseg::region::{SegmentationAlgorithm, SegmentationParams, segment};
//!
//! // Create an 8-bit grayscale image and segment it
//! let grid = Grid::new(64, 48, GridDepth::Bit8).unwrap();
//! let result = segment(
//!     &grid,
//!     SegmentationAlgorithm::SplitMerge,
//!     &SegmentationParams::new(),
//! )
//! .unwrap();
//! assert_eq!(result.width(), 64);
//! ```

mod segment;

// Re-export core types (primary data structures used everywhere)
pub use gridseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use gridseg_io as io;
pub use gridseg_morph as morph;
pub use gridseg_region as region;

// Re-export the end-to-end pipeline
pub use segment::{SegmentError, segment_image};
