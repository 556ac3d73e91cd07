//! Axis-aligned rectangles
//!
//! `Rect` describes a rectangular sub-region of a grid. Both extents are
//! at least 1, enforced at construction, so a `Rect` is never empty.

use crate::error::{Error, Result};

/// An axis-aligned rectangle with non-zero extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width (>= 1)
    pub w: u32,
    /// Height (>= 1)
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `w` or `h` is 0.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        Ok(Rect { x, y, w, h })
    }

    /// Number of pixels covered by the rectangle.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Check whether the rectangle lies entirely within a `width`x`height`
    /// grid.
    pub fn fits_in(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.w) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.h) <= u64::from(height)
    }

    /// Split into four quadrants by integer halving.
    ///
    /// The split point is `(h / 2, w / 2)` with floor division; the bottom
    /// and right quadrants absorb the remainder when an extent is odd. The
    /// four quadrants exactly tile the rectangle, in order top-left,
    /// top-right, bottom-left, bottom-right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either extent is below 2,
    /// since halving would produce an empty quadrant.
    pub fn quadrants(&self) -> Result<[Rect; 4]> {
        if self.w < 2 || self.h < 2 {
            return Err(Error::InvalidParameter(format!(
                "cannot split {}x{} rect into quadrants",
                self.w, self.h
            )));
        }
        let w2 = self.w / 2;
        let h2 = self.h / 2;
        Ok([
            Rect {
                x: self.x,
                y: self.y,
                w: w2,
                h: h2,
            },
            Rect {
                x: self.x + w2,
                y: self.y,
                w: self.w - w2,
                h: h2,
            },
            Rect {
                x: self.x,
                y: self.y + h2,
                w: w2,
                h: self.h - h2,
            },
            Rect {
                x: self.x + w2,
                y: self.y + h2,
                w: self.w - w2,
                h: self.h - h2,
            },
        ])
    }
}
