//! Grid statistics
//!
//! Mean and standard deviation of sample values over the whole grid or a
//! rectangular sub-region. These feed the quadtree homogeneity test.

use super::{Grid, GridDepth};
use crate::error::{Error, Result};
use crate::rect::Rect;

impl Grid {
    fn stats_rect(&self, region: Option<&Rect>) -> Result<Rect> {
        if self.depth() != GridDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let rect = match region {
            Some(r) => *r,
            None => Rect::new(0, 0, self.width(), self.height())?,
        };
        if !rect.fits_in(self.width(), self.height()) {
            return Err(Error::InvalidParameter(format!(
                "rect ({},{} {}x{}) extends outside {}x{} grid",
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                self.width(),
                self.height()
            )));
        }
        Ok(rect)
    }

    /// Compute the average sample value in a rectangular region.
    ///
    /// `None` covers the whole grid. A `Rect` is never empty, so the mean
    /// is always well defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-8-bpp grids, or
    /// [`Error::InvalidParameter`] if the rect extends outside the grid.
    pub fn average_in_rect(&self, region: Option<&Rect>) -> Result<f32> {
        let rect = self.stats_rect(region)?;
        let mut sum = 0u64;
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                sum += u64::from(self.get_pixel_unchecked(x, y));
            }
        }
        Ok(sum as f32 / rect.area() as f32)
    }

    /// Compute the population standard deviation of sample values in a
    /// rectangular region.
    ///
    /// `None` covers the whole grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-8-bpp grids, or
    /// [`Error::InvalidParameter`] if the rect extends outside the grid.
    pub fn stddev_in_rect(&self, region: Option<&Rect>) -> Result<f32> {
        let rect = self.stats_rect(region)?;
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                let v = u64::from(self.get_pixel_unchecked(x, y));
                sum += v;
                sum_sq += v * v;
            }
        }
        let n = rect.area() as f64;
        let mean = sum as f64 / n;
        let variance = (sum_sq as f64 / n - mean * mean).max(0.0);
        Ok(variance.sqrt() as f32)
    }
}
