//! Split-and-merge quadtree segmentation
//!
//! Recursively partitions the grid into quadrants, replacing homogeneous
//! nodes (standard deviation at or below a threshold) with their mean
//! intensity. Nodes that reach the maximum recursion depth or the minimum
//! tile size are passed through unchanged *without* a homogeneity test:
//! the depth/size limits short-circuit the threshold check, so leaves at
//! the recursion floor may remain visibly non-homogeneous. That boundary
//! policy is part of the algorithm's contract.
//!
//! "Merge" here means replacing a node with its representative value, not
//! unioning sibling tiles: quadrants are reassembled by placement only.

use crate::error::{RegionError, RegionResult};
use gridseg_core::{Grid, GridDepth, GridMut, Rect};

/// Options for split-and-merge segmentation
#[derive(Debug, Clone)]
pub struct SplitMergeOptions {
    /// Maximum standard deviation for a node to count as homogeneous
    pub threshold: f32,
    /// Minimum tile extent; a node with min(h, w) at or below this is a
    /// leaf
    pub min_size: u32,
    /// Maximum recursion depth
    pub max_depth: u32,
}

impl Default for SplitMergeOptions {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            min_size: 4,
            max_depth: 4,
        }
    }
}

impl SplitMergeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the homogeneity threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the minimum tile size
    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the maximum recursion depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "threshold must be finite and >= 0, got {}",
                self.threshold
            )));
        }
        if self.min_size < 1 {
            return Err(RegionError::InvalidParameters(
                "min_size must be >= 1".to_string(),
            ));
        }
        if self.max_depth < 1 {
            return Err(RegionError::InvalidParameters(
                "max_depth must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Segment a grid by recursive splitting and merging.
///
/// Runs the quadtree decomposition described in the module docs over the
/// whole grid. The output always has the input's dimensions; its leaf
/// tiles exactly tile the grid with no overlap or gap. Statistics are
/// always computed from the original input, never from partially merged
/// output.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for non-8-bpp input and
/// [`RegionError::InvalidParameters`] for a negative threshold, a zero
/// `min_size`, or a zero `max_depth`.
pub fn split_and_merge(grid: &Grid, options: &SplitMergeOptions) -> RegionResult<Grid> {
    if grid.depth() != GridDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: grid.depth().bits(),
        });
    }
    options.validate()?;

    // Leaves pass through unchanged, so the output starts as a copy of
    // the input and homogeneous nodes overwrite their tile.
    let mut output = grid.to_mut();
    let root = Rect::new(0, 0, grid.width(), grid.height())?;
    segment_node(grid, &mut output, root, 0, options)?;
    Ok(output.into())
}

fn segment_node(
    input: &Grid,
    output: &mut GridMut,
    node: Rect,
    depth: u32,
    options: &SplitMergeOptions,
) -> RegionResult<()> {
    // Depth and size limits short-circuit the homogeneity test.
    if depth >= options.max_depth || node.w.min(node.h) <= options.min_size {
        return Ok(());
    }

    let sigma = input.stddev_in_rect(Some(&node))?;
    if sigma <= options.threshold {
        // Mean fill, truncated to the sample type.
        let fill = input.average_in_rect(Some(&node))? as u32;
        for y in node.y..node.y + node.h {
            for x in node.x..node.x + node.w {
                output.set_pixel_unchecked(x, y, fill);
            }
        }
        return Ok(());
    }

    // min_size >= 1 guarantees both extents are >= 2 here, so the split
    // cannot produce an empty quadrant.
    for quadrant in node.quadrants()? {
        segment_node(input, output, quadrant, depth + 1, options)?;
    }
    Ok(())
}
