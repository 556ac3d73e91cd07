//! gridseg-core - Grid container and pixel primitives
//!
//! This crate provides the shared data structures used throughout the
//! gridseg workspace:
//!
//! - [`Grid`] / [`GridMut`] - the 2D intensity buffer (8-bpp grayscale or
//!   32-bpp RGB) with `Arc`-shared immutable views and exclusive mutation
//! - [`Rect`] - validated axis-aligned rectangles with quadrant splitting
//! - Statistics (mean / standard deviation over rectangular regions)
//! - Grayscale/RGB channel-layout conversion
//!
//! # Example
//!
//! ```
//! use gridseg_core::{Grid, GridDepth};
//!
//! let grid = Grid::new(100, 100, GridDepth::Bit8).unwrap();
//! let mut gm = grid.try_into_mut().unwrap();
//! gm.set_pixel(10, 10, 128).unwrap();
//! let grid: Grid = gm.into();
//! assert_eq!(grid.get_pixel(10, 10), Some(128));
//! ```

pub mod error;
pub mod grid;
pub mod rect;

pub use error::{Error, Result};
pub use grid::{
    Grid, GridDepth, GridMut, ImageFormat, compose_rgb, get_data_byte, rgb_components,
    set_data_byte,
};
pub use rect::Rect;
