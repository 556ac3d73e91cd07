//! gridseg-test - Regression test framework for gridseg
//!
//! This crate provides a small regression test harness plus helpers for
//! building grids from literal pixel data in tests.
//!
//! # Usage
//!
//! ```ignore
//! use gridseg_test::{RegParams, grid_from_rows};
//!
//! let mut rp = RegParams::new("growseg");
//! rp.compare_values(4452.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use gridseg_core::{Grid, GridDepth};

/// Build an 8-bpp grid from rows of literal pixel values
///
/// All rows must have the same length and there must be at least one
/// non-empty row.
pub fn grid_from_rows(rows: &[&[u8]]) -> TestResult<Grid> {
    let height = rows.len() as u32;
    let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(TestError::GridBuild("empty row data".to_string()));
    }
    if rows.iter().any(|r| r.len() as u32 != width) {
        return Err(TestError::GridBuild("ragged row data".to_string()));
    }

    let grid = Grid::new(width, height, GridDepth::Bit8)
        .map_err(|e| TestError::GridBuild(e.to_string()))?;
    let mut gm = grid
        .try_into_mut()
        .map_err(|_| TestError::GridBuild("grid unexpectedly shared".to_string()))?;
    for (y, row) in rows.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            gm.set_pixel_unchecked(x as u32, y as u32, u32::from(v));
        }
    }
    Ok(gm.into())
}

/// Build an 8-bpp grid filled with a single value
pub fn uniform_grid(width: u32, height: u32, value: u8) -> TestResult<Grid> {
    let grid = Grid::new(width, height, GridDepth::Bit8)
        .map_err(|e| TestError::GridBuild(e.to_string()))?;
    let mut gm = grid
        .try_into_mut()
        .map_err(|_| TestError::GridBuild("grid unexpectedly shared".to_string()))?;
    for y in 0..height {
        for x in 0..width {
            gm.set_pixel_unchecked(x, y, u32::from(value));
        }
    }
    Ok(gm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_rows() {
        let grid = grid_from_rows(&[&[1, 2], &[3, 4]]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get_pixel(0, 0), Some(1));
        assert_eq!(grid.get_pixel(1, 1), Some(4));
    }

    #[test]
    fn test_grid_from_rows_rejects_ragged() {
        assert!(grid_from_rows(&[&[1, 2], &[3]]).is_err());
        assert!(grid_from_rows(&[]).is_err());
    }

    #[test]
    fn test_uniform_grid() {
        let grid = uniform_grid(3, 2, 9).unwrap();
        assert_eq!(grid.get_pixel(2, 1), Some(9));
    }
}
