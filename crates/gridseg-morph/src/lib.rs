//! gridseg-morph - Grayscale morphology for gridseg
//!
//! Provides flat-brick grayscale erosion and dilation. The region crate
//! uses these to detect local intensity extrema when selecting seeds for
//! region growing.
//!
//! # Example
//!
//! ```
//! use gridseg_core::{Grid, GridDepth};
//! use gridseg_morph::erode_gray;
//!
//! let grid = Grid::new(10, 10, GridDepth::Bit8).unwrap();
//! let eroded = erode_gray(&grid, 5, 5).unwrap();
//! assert_eq!(eroded.width(), 10);
//! ```

pub mod error;
pub mod grayscale;

pub use error::{MorphError, MorphResult};
pub use grayscale::{dilate_gray, erode_gray};
