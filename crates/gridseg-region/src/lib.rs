//! gridseg-region - Region-based segmentation for gridseg
//!
//! This crate provides the segmentation algorithms:
//!
//! - **Seeded region growing** - Flood-fill growth from local-minimum seeds
//!   under a similarity tolerance
//! - **Split-and-merge** - Quadtree decomposition replacing homogeneous
//!   nodes with their mean intensity
//! - **Algorithm dispatch** - A named-algorithm front-end that handles
//!   grayscale conversion for color input
//!
//! # Examples
//!
//! ## Region growing
//!
//! ```
//! use gridseg_region::{GrowOptions, region_growing};
//! use gridseg_core::{Grid, GridDepth};
//!
//! let grid = Grid::new(10, 10, GridDepth::Bit8).unwrap();
//! let options = GrowOptions::new().with_min_size(1);
//! let segmented = region_growing(&grid, &options).unwrap();
//! assert_eq!(segmented.width(), 10);
//! ```
//!
//! ## Split-and-merge
//!
//! ```
//! use gridseg_region::{SplitMergeOptions, split_and_merge};
//! use gridseg_core::{Grid, GridDepth};
//!
//! let grid = Grid::new(16, 16, GridDepth::Bit8).unwrap();
//! let segmented = split_and_merge(&grid, &SplitMergeOptions::default()).unwrap();
//! assert_eq!(segmented.height(), 16);
//! ```
//!
//! ## Dispatch by name
//!
//! ```
//! use gridseg_region::{SegmentationAlgorithm, SegmentationParams, segment};
//! use gridseg_core::{Grid, GridDepth};
//!
//! let grid = Grid::new(8, 8, GridDepth::Bit8).unwrap();
//! let algorithm: SegmentationAlgorithm = "split-merge".parse().unwrap();
//! let segmented = segment(&grid, algorithm, &SegmentationParams::new()).unwrap();
//! ```

pub mod engine;
pub mod error;
pub mod grow;
pub mod quadtree;
pub mod seed;

// Re-export core types
pub use gridseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export seed types and functions
pub use seed::{SeedPolarity, Seeds, find_seeds};

// Re-export grow types and functions
pub use grow::{GrowOptions, region_growing};

// Re-export quadtree types and functions
pub use quadtree::{SplitMergeOptions, split_and_merge};

// Re-export engine types and functions
pub use engine::{SegmentationAlgorithm, SegmentationParams, segment};
