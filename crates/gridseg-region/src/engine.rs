//! Segmentation front-end
//!
//! Dispatches a named algorithm over an arbitrary-depth input grid.
//! Color input is converted to grayscale before segmentation and the
//! result is converted back to color, so callers always get a grid of
//! the same depth they passed in.

use crate::error::{RegionError, RegionResult};
use crate::grow::{GrowOptions, region_growing};
use crate::quadtree::{SplitMergeOptions, split_and_merge};
use gridseg_core::{Grid, GridDepth};
use std::fmt;
use std::str::FromStr;

/// Supported segmentation algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationAlgorithm {
    /// Seeded region growing from local minima
    RegionGrowing,
    /// Quadtree split-and-merge
    SplitMerge,
}

impl SegmentationAlgorithm {
    /// The wire name of the algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentationAlgorithm::RegionGrowing => "region-growing",
            SegmentationAlgorithm::SplitMerge => "split-merge",
        }
    }
}

impl fmt::Display for SegmentationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentationAlgorithm {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "region-growing" => Ok(SegmentationAlgorithm::RegionGrowing),
            "split-merge" => Ok(SegmentationAlgorithm::SplitMerge),
            other => Err(RegionError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Caller-tunable parameters shared by both algorithms
///
/// Unset fields fall back to per-algorithm defaults: tolerance 20.0 and
/// minimum region size 100 for region growing, homogeneity threshold
/// 20.0 and minimum tile size 4 for split-and-merge.
#[derive(Debug, Clone, Default)]
pub struct SegmentationParams {
    /// Similarity tolerance (growing) or homogeneity threshold (merge)
    pub threshold: Option<f32>,
    /// Minimum region pixel count (growing) or minimum tile extent
    /// (merge)
    pub min_size: Option<u32>,
}

impl SegmentationParams {
    /// Create params that use every algorithm default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the minimum size
    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = Some(min_size);
        self
    }
}

/// Segment a grid with the selected algorithm.
///
/// 32-bpp input is reduced to luma grayscale first and the segmented
/// result is expanded back to 32 bpp; 8-bpp input stays 8 bpp.
///
/// # Errors
///
/// Propagates parameter validation and depth errors from the selected
/// algorithm.
pub fn segment(
    grid: &Grid,
    algorithm: SegmentationAlgorithm,
    params: &SegmentationParams,
) -> RegionResult<Grid> {
    let was_color = grid.depth() == GridDepth::Bit32;
    let gray = grid.to_grayscale()?;

    let segmented = match algorithm {
        SegmentationAlgorithm::RegionGrowing => {
            let mut opts = GrowOptions::new();
            if let Some(t) = params.threshold {
                opts = opts.with_tolerance(t);
            }
            if let Some(m) = params.min_size {
                opts = opts.with_min_size(m as usize);
            }
            region_growing(&gray, &opts)?
        }
        SegmentationAlgorithm::SplitMerge => {
            let mut opts = SplitMergeOptions::new();
            if let Some(t) = params.threshold {
                opts = opts.with_threshold(t);
            }
            if let Some(m) = params.min_size {
                opts = opts.with_min_size(m);
            }
            split_and_merge(&gray, &opts)?
        }
    };

    if was_color {
        Ok(segmented.to_rgb()?)
    } else {
        Ok(segmented)
    }
}
