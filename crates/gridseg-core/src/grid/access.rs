//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! 8-bit samples are packed MSB to LSB within each 32-bit word, so sample 0
//! of a row occupies bits 31..24 of the row's first word. 32-bit RGB pixels
//! occupy one word each with red in the most significant byte.

use super::{Grid, GridDepth, GridMut};
use crate::error::{Error, Result};

/// Get an 8-bit sample from a row of packed words.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit sample in a row of packed words.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 8 * (3 - (x & 3));
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Compose an RGB pixel value (red in the MSB, low byte zero).
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 24) | (u32::from(g) << 16) | (u32::from(b) << 8)
}

/// Extract the RGB components of a packed pixel value.
#[inline]
pub fn rgb_components(pixel: u32) -> (u8, u8, u8) {
    (
        (pixel >> 24) as u8,
        ((pixel >> 16) & 0xff) as u8,
        ((pixel >> 8) & 0xff) as u8,
    )
}

impl Grid {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds. For 8 bpp grids the
    /// value is the sample in 0..=255; for 32 bpp it is the packed RGB word.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let line = self.row_data(y);
        match self.depth() {
            GridDepth::Bit8 => get_data_byte(line, x),
            GridDepth::Bit32 => line[x as usize],
        }
    }

    /// Get RGB values at (x, y).
    ///
    /// Returns `None` if out of bounds or the grid is not 32 bpp.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != GridDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(rgb_components)
    }
}

impl GridMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let line = self.row_data(y);
        match self.depth() {
            GridDepth::Bit8 => get_data_byte(line, x),
            GridDepth::Bit32 => line[x as usize],
        }
    }

    /// Set a pixel value at (x, y).
    ///
    /// For 8 bpp grids the value is masked to the low byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let line = self.row_data_mut(y);
        match depth {
            GridDepth::Bit8 => set_data_byte(line, x, val),
            GridDepth::Bit32 => line[x as usize] = val,
        }
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the grid is not 32 bpp, or
    /// [`Error::PixelOutOfBounds`] on bad coordinates.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != GridDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, compose_rgb(r, g, b))
    }
}
