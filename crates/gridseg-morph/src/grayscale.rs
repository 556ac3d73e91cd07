//! Grayscale morphological operations
//!
//! Implements erosion and dilation for 8-bpp grayscale grids with a flat
//! brick (rectangular) structuring element:
//!
//! - **Erosion**: the minimum sample value in the neighborhood
//! - **Dilation**: the maximum sample value in the neighborhood
//!
//! # Border handling
//!
//! The window is clamped at the grid borders, so only in-image samples
//! participate. For a flat min/max filter this is equivalent to border
//! replication. The policy is fixed; seed detection in gridseg-region
//! relies on it for border pixels.

use crate::error::{MorphError, MorphResult};
use gridseg_core::{Grid, GridDepth};

fn check_args(grid: &Grid, hsize: u32, vsize: u32) -> MorphResult<()> {
    if grid.depth() != GridDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8-bit",
            actual: grid.depth().bits(),
        });
    }
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidSize(format!(
            "{hsize}x{vsize}: sizes must be >= 1"
        )));
    }
    if hsize % 2 == 0 || vsize % 2 == 0 {
        return Err(MorphError::InvalidSize(format!(
            "{hsize}x{vsize}: sizes must be odd so the window is centered"
        )));
    }
    Ok(())
}

/// Apply a centered min/max filter with a clamped hsize x vsize window.
fn rank_filter<F>(grid: &Grid, hsize: u32, vsize: u32, init: u32, pick: F) -> MorphResult<Grid>
where
    F: Fn(u32, u32) -> u32,
{
    let width = grid.width();
    let height = grid.height();
    let hr = hsize / 2;
    let vr = vsize / 2;

    let mut out = grid.create_template().try_into_mut().unwrap_or_else(|g| g.to_mut());
    for y in 0..height {
        let y0 = y.saturating_sub(vr);
        let y1 = (y + vr).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(hr);
            let x1 = (x + hr).min(width - 1);
            let mut extreme = init;
            for wy in y0..=y1 {
                for wx in x0..=x1 {
                    extreme = pick(extreme, grid.get_pixel_unchecked(wx, wy));
                }
            }
            out.set_pixel_unchecked(x, y, extreme);
        }
    }
    Ok(out.into())
}

/// Erode a grayscale grid with a brick structuring element.
///
/// Erosion computes the minimum sample value in the window, which shrinks
/// bright regions and expands dark regions. A pixel whose value survives
/// erosion unchanged is a local minimum of its neighborhood.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] for non-8-bpp grids and
/// [`MorphError::InvalidSize`] for zero or even window sizes.
pub fn erode_gray(grid: &Grid, hsize: u32, vsize: u32) -> MorphResult<Grid> {
    check_args(grid, hsize, vsize)?;
    rank_filter(grid, hsize, vsize, u32::MAX, u32::min)
}

/// Dilate a grayscale grid with a brick structuring element.
///
/// Dilation computes the maximum sample value in the window, which expands
/// bright regions and shrinks dark regions.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] for non-8-bpp grids and
/// [`MorphError::InvalidSize`] for zero or even window sizes.
pub fn dilate_gray(grid: &Grid, hsize: u32, vsize: u32) -> MorphResult<Grid> {
    check_args(grid, hsize, vsize)?;
    rank_filter(grid, hsize, vsize, 0, u32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridseg_core::GridMut;

    fn grid_of(rows: &[&[u8]]) -> Grid {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let grid = Grid::new(w, h, GridDepth::Bit8).unwrap();
        let mut gm: GridMut = grid.try_into_mut().unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                gm.set_pixel(x as u32, y as u32, u32::from(v)).unwrap();
            }
        }
        gm.into()
    }

    #[test]
    fn test_erode_takes_window_minimum() {
        let grid = grid_of(&[
            &[50, 50, 50],
            &[50, 10, 50],
            &[50, 50, 50],
        ]);
        let eroded = erode_gray(&grid, 3, 3).unwrap();
        // Every window includes the 10 at the center.
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(eroded.get_pixel(x, y), Some(10));
            }
        }
    }

    #[test]
    fn test_dilate_takes_window_maximum() {
        let grid = grid_of(&[
            &[50, 50, 50],
            &[50, 90, 50],
            &[50, 50, 50],
        ]);
        let dilated = dilate_gray(&grid, 3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(dilated.get_pixel(x, y), Some(90));
            }
        }
    }

    #[test]
    fn test_border_window_is_clamped() {
        // A dark pixel in the far corner must not influence the opposite
        // corner of a 5x5 image under a 3x3 window.
        let grid = grid_of(&[
            &[5, 80, 80, 80, 80],
            &[80, 80, 80, 80, 80],
            &[80, 80, 80, 80, 80],
            &[80, 80, 80, 80, 80],
            &[80, 80, 80, 80, 80],
        ]);
        let eroded = erode_gray(&grid, 3, 3).unwrap();
        assert_eq!(eroded.get_pixel(0, 0), Some(5));
        assert_eq!(eroded.get_pixel(1, 1), Some(5));
        assert_eq!(eroded.get_pixel(2, 2), Some(80));
        assert_eq!(eroded.get_pixel(4, 4), Some(80));
    }

    #[test]
    fn test_unit_window_is_identity() {
        let grid = grid_of(&[&[1, 2], &[3, 4]]);
        let eroded = erode_gray(&grid, 1, 1).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(eroded.get_pixel(x, y), grid.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_invalid_sizes() {
        let grid = grid_of(&[&[1, 2], &[3, 4]]);
        assert!(erode_gray(&grid, 0, 3).is_err());
        assert!(erode_gray(&grid, 3, 0).is_err());
        assert!(erode_gray(&grid, 4, 3).is_err());
        assert!(dilate_gray(&grid, 3, 2).is_err());
    }

    #[test]
    fn test_rgb_rejected() {
        let grid = Grid::new(4, 4, GridDepth::Bit32).unwrap();
        assert!(matches!(
            erode_gray(&grid, 3, 3),
            Err(MorphError::UnsupportedDepth { .. })
        ));
    }
}
