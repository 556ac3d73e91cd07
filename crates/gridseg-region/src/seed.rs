//! Seed selection
//!
//! Identifies candidate starting pixels for region growing by comparing a
//! grid against its morphological erosion (or dilation): a pixel whose
//! value equals the neighborhood minimum is a local minimum, and
//! symmetrically for maxima.
//!
//! Flat neighborhoods produce many seeds (an entirely flat grid yields
//! every pixel). That redundancy is by design; the grower's visited map
//! absorbs it, so total work stays linear in the pixel count.

use crate::error::{RegionError, RegionResult};
use gridseg_core::{Grid, GridDepth};
use gridseg_morph::{dilate_gray, erode_gray};

/// Which intensity extremum qualifies a pixel as a seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolarity {
    /// Local minima (the region grower's choice)
    #[default]
    Minima,
    /// Local maxima
    Maxima,
}

/// Lazy sequence of seed coordinates
///
/// Yields `(x, y)` pairs in row-major order. The iterator holds cheap
/// `Arc`-shared clones of the source grid and its eroded (or dilated)
/// counterpart, so no coordinate list is materialized up front even when
/// every pixel qualifies.
#[derive(Debug)]
pub struct Seeds {
    grid: Grid,
    reference: Grid,
    x: u32,
    y: u32,
}

impl Iterator for Seeds {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        while self.y < self.grid.height() {
            let (x, y) = (self.x, self.y);
            self.x += 1;
            if self.x == self.grid.width() {
                self.x = 0;
                self.y += 1;
            }
            if self.grid.get_pixel_unchecked(x, y) == self.reference.get_pixel_unchecked(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}

/// Find seed pixels as local intensity extrema.
///
/// A pixel is a seed iff its value equals the eroded (for
/// [`SeedPolarity::Minima`]) or dilated (for [`SeedPolarity::Maxima`])
/// value at its location, computed with a `neighborhood` x `neighborhood`
/// brick window clamped at the borders.
///
/// # Arguments
///
/// * `grid` - 8-bpp grayscale input
/// * `neighborhood` - window size, odd and >= 1
/// * `polarity` - which extremum qualifies
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for non-8-bpp input and a
/// morphology error for invalid window sizes.
pub fn find_seeds(grid: &Grid, neighborhood: u32, polarity: SeedPolarity) -> RegionResult<Seeds> {
    if grid.depth() != GridDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: grid.depth().bits(),
        });
    }
    let reference = match polarity {
        SeedPolarity::Minima => erode_gray(grid, neighborhood, neighborhood)?,
        SeedPolarity::Maxima => dilate_gray(grid, neighborhood, neighborhood)?,
    };
    Ok(Seeds {
        grid: grid.clone(),
        reference,
        x: 0,
        y: 0,
    })
}
