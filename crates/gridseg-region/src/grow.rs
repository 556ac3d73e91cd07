//! Region growing segmentation
//!
//! Grows regions from local-minimum seeds by 4-connected flood fill under
//! a similarity tolerance, producing a grid where each accepted region is
//! painted with its seed's intensity and everything else stays 0.
//!
//! Two policies are load-bearing and deliberately preserved:
//!
//! - The tolerance test always references the seed's original value, not a
//!   running regional mean. This is not adaptive-mean growing.
//! - A region smaller than `min_size` is discarded, but its pixels remain
//!   claimed for the rest of the pass. They are never reassigned to a
//!   later region, so they stay 0 in the output. This is a known
//!   limitation of the pass structure, not an accident.

use crate::error::{RegionError, RegionResult};
use crate::seed::{SeedPolarity, find_seeds};
use gridseg_core::{Grid, GridDepth};
use std::collections::VecDeque;

/// Options for region growing
#[derive(Debug, Clone)]
pub struct GrowOptions {
    /// Maximum intensity deviation from the seed value for a pixel to
    /// join the region
    pub tolerance: f32,
    /// Minimum pixel count for a region to be kept
    pub min_size: usize,
    /// Window size for local-minimum seed detection (odd)
    pub seed_neighborhood: u32,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            tolerance: 20.0,
            min_size: 100,
            seed_neighborhood: 5,
        }
    }
}

impl GrowOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity tolerance
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum region size
    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the seed detection window size
    pub fn with_seed_neighborhood(mut self, size: u32) -> Self {
        self.seed_neighborhood = size;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        if self.min_size < 1 {
            return Err(RegionError::InvalidParameters(
                "min_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Segment a grid by seeded region growing.
///
/// For each local-minimum seed (row-major order), performs an iterative
/// 4-connected flood fill accepting pixels whose intensity is within
/// `tolerance` of the seed's value. Pixels claimed by one region are never
/// revisited, so the whole pass does O(width * height) fill steps no
/// matter how many seeds a flat image produces. Regions with at least
/// `min_size` pixels are written to the output with the seed value;
/// smaller regions leave their pixels at 0.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for non-8-bpp input and
/// [`RegionError::InvalidParameters`] for a negative tolerance, a zero
/// `min_size`, or an invalid seed window.
pub fn region_growing(grid: &Grid, options: &GrowOptions) -> RegionResult<Grid> {
    if grid.depth() != GridDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: grid.depth().bits(),
        });
    }
    options.validate()?;

    let width = grid.width();
    let height = grid.height();
    let index = |x: u32, y: u32| (y as usize) * (width as usize) + (x as usize);

    let mut visited = vec![false; (width as usize) * (height as usize)];
    let mut output = grid
        .create_template()
        .try_into_mut()
        .unwrap_or_else(|g| g.to_mut());

    let mut members: Vec<(u32, u32)> = Vec::new();
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    for (sx, sy) in find_seeds(grid, options.seed_neighborhood, SeedPolarity::Minima)? {
        if visited[index(sx, sy)] {
            continue;
        }

        let seed_value = grid.get_pixel_unchecked(sx, sy);
        let seed_f = seed_value as f32;
        members.clear();
        queue.clear();
        visited[index(sx, sy)] = true;
        queue.push_back((sx, sy));

        while let Some((x, y)) = queue.pop_front() {
            members.push((x, y));

            let try_neighbor = |nx: u32, ny: u32,
                                    visited: &mut Vec<bool>,
                                    queue: &mut VecDeque<(u32, u32)>| {
                let i = index(nx, ny);
                if !visited[i]
                    && (grid.get_pixel_unchecked(nx, ny) as f32 - seed_f).abs()
                        <= options.tolerance
                {
                    visited[i] = true;
                    queue.push_back((nx, ny));
                }
            };

            if x > 0 {
                try_neighbor(x - 1, y, &mut visited, &mut queue);
            }
            if x + 1 < width {
                try_neighbor(x + 1, y, &mut visited, &mut queue);
            }
            if y > 0 {
                try_neighbor(x, y - 1, &mut visited, &mut queue);
            }
            if y + 1 < height {
                try_neighbor(x, y + 1, &mut visited, &mut queue);
            }
        }

        if members.len() >= options.min_size {
            for &(x, y) in &members {
                output.set_pixel_unchecked(x, y, seed_value);
            }
        }
    }

    Ok(output.into())
}
