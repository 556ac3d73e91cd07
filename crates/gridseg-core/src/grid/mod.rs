//! Grid - the 2D intensity buffer
//!
//! `Grid` is the image container the segmentation algorithms operate on.
//! It holds either 8-bit grayscale samples or packed 24-bit RGB pixels.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - 8-bit samples are packed MSB to LSB, four per word
//! - 32-bit pixels hold RGB with red in the MSB (`r<<24 | g<<16 | b<<8`)
//!
//! # Ownership model
//!
//! `Grid` uses `Arc` for efficient cloning (shared ownership). To modify
//! pixel data, convert to `GridMut` via [`Grid::try_into_mut`] or
//! [`Grid::to_mut`], then convert back with `Into<Grid>`. Algorithms take
//! `&Grid` and produce new grids; callers never observe in-place mutation.

mod access;
pub mod convert;
pub mod statistics;

pub use access::{compose_rgb, get_data_byte, rgb_components, set_data_byte};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Sample depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GridDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB (8 bits per channel, low byte unused)
    Bit32 = 32,
}

impl GridDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            GridDepth::Bit8 => 0xff,
            GridDepth::Bit32 => u32::MAX,
        }
    }
}

/// Image transport format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// PNM format (binary PGM/PPM)
    Pnm,
}

impl ImageFormat {
    /// Get the conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }
}

/// Internal grid data
#[derive(Debug)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: GridDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// Transport format the grid was decoded from
    informat: ImageFormat,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

/// Grid - the shared image container
///
/// Uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use gridseg_core::{Grid, GridDepth};
///
/// let grid = Grid::new(640, 480, GridDepth::Bit8).unwrap();
/// assert_eq!(grid.width(), 640);
/// assert_eq!(grid.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    inner: Arc<GridData>,
}

impl Grid {
    /// Create a new grid with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, so an
    /// empty grid can never be constructed.
    pub fn new(width: u32, height: u32, depth: GridDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth);
        let data = vec![0u32; (wpl as usize) * (height as usize)];
        let spp = match depth {
            GridDepth::Bit8 => 1,
            GridDepth::Bit32 => 3,
        };

        Ok(Grid {
            inner: Arc::new(GridData {
                width,
                height,
                depth,
                spp,
                wpl,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Compute words per line for given width and depth.
    ///
    /// Uses u64 arithmetic to prevent overflow for large widths.
    #[inline]
    fn compute_wpl(width: u32, depth: GridDepth) -> u32 {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        bits_per_line.div_ceil(32) as u32
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the sample depth.
    #[inline]
    pub fn depth(&self) -> GridDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the transport format the grid was decoded from.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this grid.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Create a new zero-filled grid with the same dimensions, depth, and
    /// metadata as the source.
    pub fn create_template(&self) -> Self {
        let data = vec![0u32; self.inner.data.len()];
        Grid {
            inner: Arc::new(GridData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                spp: self.inner.spp,
                wpl: self.inner.wpl,
                informat: self.inner.informat,
                data,
            }),
        }
    }

    /// Create a deep copy of this grid.
    ///
    /// Unlike `clone()`, which shares data via `Arc`, this creates a
    /// completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Grid {
            inner: Arc::new(GridData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                spp: self.inner.spp,
                wpl: self.inner.wpl,
                informat: self.inner.informat,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Check if two grids have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Grid) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<GridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GridMut { inner: data }),
            Err(arc) => Err(Grid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> GridMut {
        GridMut {
            inner: GridData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                spp: self.inner.spp,
                wpl: self.inner.wpl,
                informat: self.inner.informat,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable grid
///
/// Allows modification of image data. Convert back to an immutable
/// [`Grid`] using `Into<Grid>`. Exclusive access is enforced at compile
/// time rather than through reference counting at runtime.
#[derive(Debug)]
pub struct GridMut {
    inner: GridData,
}

impl GridMut {
    /// Get the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the sample depth.
    #[inline]
    pub fn depth(&self) -> GridDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the transport format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Set the transport format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Copy the transport format from another grid.
    pub fn copy_informat_from(&mut self, src: &Grid) {
        self.inner.informat = src.inner.informat;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        &mut self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<GridMut> for Grid {
    fn from(grid_mut: GridMut) -> Self {
        Grid {
            inner: Arc::new(grid_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        assert_eq!(GridDepth::Bit8.bits(), 8);
        assert_eq!(GridDepth::Bit8.max_value(), 255);
        assert_eq!(GridDepth::Bit32.bits(), 32);
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(100, 200, GridDepth::Bit8).unwrap();
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 200);
        assert_eq!(grid.depth(), GridDepth::Bit8);
        assert_eq!(grid.spp(), 1);
        // 100 * 8 = 800 bits = 25 words
        assert_eq!(grid.wpl(), 25);
    }

    #[test]
    fn test_grid_creation_invalid() {
        assert!(Grid::new(0, 100, GridDepth::Bit8).is_err());
        assert!(Grid::new(100, 0, GridDepth::Bit8).is_err());
    }

    #[test]
    fn test_wpl_rounds_up() {
        let grid = Grid::new(5, 1, GridDepth::Bit8).unwrap();
        assert_eq!(grid.wpl(), 2);
        let grid = Grid::new(10, 1, GridDepth::Bit32).unwrap();
        assert_eq!(grid.wpl(), 10);
    }

    #[test]
    fn test_clone_shares_data() {
        let g1 = Grid::new(50, 50, GridDepth::Bit8).unwrap();
        let g2 = g1.clone();
        assert_eq!(g1.ref_count(), 2);
        assert_eq!(g1.data().as_ptr(), g2.data().as_ptr());
    }

    #[test]
    fn test_deep_clone() {
        let g1 = Grid::new(50, 50, GridDepth::Bit8).unwrap();
        let g2 = g1.deep_clone();
        assert_eq!(g1.ref_count(), 1);
        assert_eq!(g2.ref_count(), 1);
        assert_ne!(g1.data().as_ptr(), g2.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut() {
        let grid = Grid::new(50, 50, GridDepth::Bit8).unwrap();
        let shared = grid.clone();
        // Two references: conversion must fail and hand the grid back.
        let grid = grid.try_into_mut().unwrap_err();
        drop(shared);
        assert!(grid.try_into_mut().is_ok());
    }

    #[test]
    fn test_template_zeroed() {
        let grid = Grid::new(10, 10, GridDepth::Bit8).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_informat(ImageFormat::Png);
        gm.set_pixel(3, 4, 77).unwrap();
        let grid: Grid = gm.into();

        let tmpl = grid.create_template();
        assert!(tmpl.sizes_equal(&grid));
        assert_eq!(tmpl.informat(), ImageFormat::Png);
        assert!(tmpl.data().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_sizes_equal() {
        let g1 = Grid::new(10, 20, GridDepth::Bit8).unwrap();
        let g2 = Grid::new(10, 20, GridDepth::Bit8).unwrap();
        let g3 = Grid::new(10, 20, GridDepth::Bit32).unwrap();
        let g4 = Grid::new(20, 10, GridDepth::Bit8).unwrap();
        assert!(g1.sizes_equal(&g2));
        assert!(!g1.sizes_equal(&g3));
        assert!(!g1.sizes_equal(&g4));
    }
}
