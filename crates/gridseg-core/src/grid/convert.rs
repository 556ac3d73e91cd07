//! Channel-layout conversion
//!
//! Conversions between 8-bpp grayscale and 32-bpp RGB grids. These are pure
//! format adaptations used at the engine boundary: segmentation itself is
//! defined on single-channel grids only.

use super::{Grid, GridDepth};
use crate::error::Result;

/// Luma weights used for RGB-to-grayscale reduction (ITU-R BT.601, the
/// same weighting OpenCV applies in `cvtColor`).
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

impl Grid {
    /// Convert to an 8-bpp grayscale grid.
    ///
    /// 32-bpp input is reduced with the 0.299/0.587/0.114 luma weights,
    /// rounded to the nearest integer. 8-bpp input is returned as a cheap
    /// shared clone.
    pub fn to_grayscale(&self) -> Result<Grid> {
        match self.depth() {
            GridDepth::Bit8 => Ok(self.clone()),
            GridDepth::Bit32 => {
                let mut out = Grid::new(self.width(), self.height(), GridDepth::Bit8)?
                    .try_into_mut()
                    .unwrap_or_else(|g| g.to_mut());
                out.copy_informat_from(self);
                for y in 0..self.height() {
                    for x in 0..self.width() {
                        let (r, g, b) = super::access::rgb_components(self.get_pixel_unchecked(x, y));
                        let luma = LUMA_R * f32::from(r)
                            + LUMA_G * f32::from(g)
                            + LUMA_B * f32::from(b);
                        out.set_pixel_unchecked(x, y, luma.round() as u32);
                    }
                }
                Ok(out.into())
            }
        }
    }

    /// Convert to a 32-bpp RGB grid by replicating the gray channel.
    ///
    /// 32-bpp input is returned as a cheap shared clone.
    pub fn to_rgb(&self) -> Result<Grid> {
        match self.depth() {
            GridDepth::Bit32 => Ok(self.clone()),
            GridDepth::Bit8 => {
                let mut out = Grid::new(self.width(), self.height(), GridDepth::Bit32)?
                    .try_into_mut()
                    .unwrap_or_else(|g| g.to_mut());
                out.copy_informat_from(self);
                for y in 0..self.height() {
                    for x in 0..self.width() {
                        let v = self.get_pixel_unchecked(x, y) as u8;
                        out.set_pixel_unchecked(x, y, super::access::compose_rgb(v, v, v));
                    }
                }
                Ok(out.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_to_gray_is_shared_clone() {
        let grid = Grid::new(4, 4, GridDepth::Bit8).unwrap();
        let gray = grid.to_grayscale().unwrap();
        assert_eq!(gray.data().as_ptr(), grid.data().as_ptr());
    }

    #[test]
    fn test_rgb_to_gray_luma() {
        let grid = Grid::new(3, 1, GridDepth::Bit32).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_rgb(0, 0, 255, 0, 0).unwrap();
        gm.set_rgb(1, 0, 0, 255, 0).unwrap();
        gm.set_rgb(2, 0, 100, 100, 100).unwrap();
        let grid: Grid = gm.into();

        let gray = grid.to_grayscale().unwrap();
        assert_eq!(gray.depth(), GridDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(76)); // 0.299 * 255
        assert_eq!(gray.get_pixel(1, 0), Some(150)); // 0.587 * 255
        assert_eq!(gray.get_pixel(2, 0), Some(100)); // neutral gray
    }

    #[test]
    fn test_gray_to_rgb_replicates() {
        let grid = Grid::new(2, 1, GridDepth::Bit8).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_pixel(0, 0, 55).unwrap();
        gm.set_pixel(1, 0, 200).unwrap();
        let grid: Grid = gm.into();

        let rgb = grid.to_rgb().unwrap();
        assert_eq!(rgb.depth(), GridDepth::Bit32);
        assert_eq!(rgb.get_rgb(0, 0), Some((55, 55, 55)));
        assert_eq!(rgb.get_rgb(1, 0), Some((200, 200, 200)));
    }

    #[test]
    fn test_round_trip_preserves_gray() {
        let grid = Grid::new(2, 2, GridDepth::Bit8).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_pixel(1, 1, 123).unwrap();
        let grid: Grid = gm.into();

        let back = grid.to_rgb().unwrap().to_grayscale().unwrap();
        assert_eq!(back.get_pixel(1, 1), Some(123));
        assert_eq!(back.get_pixel(0, 0), Some(0));
    }
}
