//! gridseg-io - Image encoding and decoding for gridseg
//!
//! This crate reads and writes the image formats the segmentation
//! pipeline accepts:
//!
//! - **PNG** - grayscale and color, via the `png` crate
//! - **PNM** - binary PGM (P5) and PPM (P6)
//!
//! The format of incoming bytes is sniffed from magic numbers, so
//! callers never pass a format on the decode side. Decoded grids record
//! their source format and [`encode_image`] can reproduce it.

pub mod error;
pub mod format;
pub mod png;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use gridseg_core::{Grid, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Decode an image from in-memory bytes.
///
/// The format is detected from the data's magic number. The returned
/// grid records the detected format, so a later [`encode_image`] with
/// [`Grid::informat`] round-trips the container.
pub fn decode_image(data: &[u8]) -> IoResult<Grid> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        ImageFormat::Pnm => pnm::read_pnm(Cursor::new(data)),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "cannot decode unknown format".to_string(),
        )),
    }
}

/// Encode a grid to in-memory bytes in the given format.
///
/// [`ImageFormat::Unknown`] falls back to PNG.
pub fn encode_image(grid: &Grid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Pnm => pnm::write_pnm(grid, &mut bytes)?,
        ImageFormat::Png | ImageFormat::Unknown => png::write_png(grid, &mut bytes)?,
    }
    Ok(bytes)
}

/// Read an image from a file path, detecting its format.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let data = fs::read(path)?;
    decode_image(&data)
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(grid: &Grid, path: P, format: ImageFormat) -> IoResult<()> {
    let bytes = encode_image(grid, format)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridseg_core::GridDepth;

    fn small_gray() -> Grid {
        let grid = Grid::new(2, 2, GridDepth::Bit8).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_pixel_unchecked(0, 0, 10);
        gm.set_pixel_unchecked(1, 0, 20);
        gm.set_pixel_unchecked(0, 1, 30);
        gm.set_pixel_unchecked(1, 1, 40);
        gm.into()
    }

    #[test]
    fn test_decode_records_informat() {
        let grid = small_gray();

        let pnm_bytes = encode_image(&grid, ImageFormat::Pnm).unwrap();
        let decoded = decode_image(&pnm_bytes).unwrap();
        assert_eq!(decoded.informat(), ImageFormat::Pnm);

        let png_bytes = encode_image(&grid, ImageFormat::Png).unwrap();
        let decoded = decode_image(&png_bytes).unwrap();
        assert_eq!(decoded.informat(), ImageFormat::Png);
    }

    #[test]
    fn test_unknown_format_encodes_as_png() {
        let grid = small_gray();
        let bytes = encode_image(&grid, ImageFormat::Unknown).unwrap();
        assert_eq!(
            detect_format_from_bytes(&bytes).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[0u8; 32]).is_err());
        assert!(decode_image(b"x").is_err());
    }
}
