//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) formats with a
//! maxval of 255. ASCII variants (P2/P3) and PAM (P7) are not supported.

use crate::{IoError, IoResult};
use gridseg_core::{Grid, GridDepth, ImageFormat, compose_rgb, rgb_components};
use std::io::{BufRead, Write};

/// Read a PNM image (P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P5`/`P6` magic
///
/// # Returns
/// A `Grid` at 8 bpp (PGM) or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Grid> {
    let mut header = Vec::new();
    reader.read_to_end(&mut header)?;
    read_pnm_bytes(&header)
}

fn read_pnm_bytes(data: &[u8]) -> IoResult<Grid> {
    let mut pos = 0usize;

    let magic = read_token(data, &mut pos)?;
    let spp = match magic.as_slice() {
        b"P5" => 1u32,
        b"P6" => 3u32,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM magic: {}",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let width = read_number(data, &mut pos)?;
    let height = read_number(data, &mut pos)?;
    let maxval = read_number(data, &mut pos)?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::InvalidData(format!(
            "PNM maxval {} outside supported range 1..=255",
            maxval
        )));
    }
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData("PNM with zero dimension".to_string()));
    }

    // Exactly one whitespace byte separates the header from the raster.
    if pos >= data.len() {
        return Err(IoError::DecodeError("truncated PNM header".to_string()));
    }
    pos += 1;

    let raster = &data[pos..];
    let expected = (width as usize) * (height as usize) * (spp as usize);
    if raster.len() < expected {
        return Err(IoError::DecodeError(format!(
            "truncated PNM raster: have {} bytes, need {}",
            raster.len(),
            expected
        )));
    }

    let depth = if spp == 1 { GridDepth::Bit8 } else { GridDepth::Bit32 };
    let grid = Grid::new(width, height, depth)?;
    let mut gm = grid.try_into_mut().unwrap_or_else(|g| g.to_mut());
    gm.set_informat(ImageFormat::Pnm);

    for y in 0..height {
        let row_start = (y as usize) * (width as usize) * (spp as usize);
        for x in 0..width {
            let idx = row_start + (x as usize) * (spp as usize);
            if spp == 1 {
                gm.set_pixel_unchecked(x, y, raster[idx] as u32);
            } else {
                gm.set_pixel_unchecked(
                    x,
                    y,
                    compose_rgb(raster[idx], raster[idx + 1], raster[idx + 2]),
                );
            }
        }
    }

    Ok(gm.into())
}

/// Write a `Grid` as binary PNM to a writer.
///
/// Chooses P5 (8 bpp grayscale) or P6 (32 bpp RGB) based on the sample
/// depth.
pub fn write_pnm<W: Write>(grid: &Grid, mut writer: W) -> IoResult<()> {
    let width = grid.width();
    let height = grid.height();

    match grid.depth() {
        GridDepth::Bit8 => {
            write!(writer, "P5\n{} {}\n255\n", width, height)?;
            let mut row = vec![0u8; width as usize];
            for y in 0..height {
                for x in 0..width {
                    row[x as usize] = grid.get_pixel_unchecked(x, y) as u8;
                }
                writer.write_all(&row)?;
            }
        }
        GridDepth::Bit32 => {
            write!(writer, "P6\n{} {}\n255\n", width, height)?;
            let mut row = vec![0u8; (width as usize) * 3];
            for y in 0..height {
                for x in 0..width {
                    let (r, g, b) = rgb_components(grid.get_pixel_unchecked(x, y));
                    let idx = (x as usize) * 3;
                    row[idx] = r;
                    row[idx + 1] = g;
                    row[idx + 2] = b;
                }
                writer.write_all(&row)?;
            }
        }
    }

    Ok(())
}

/// Skip whitespace and `#` comments, then collect one header token.
fn read_token(data: &[u8], pos: &mut usize) -> IoResult<Vec<u8>> {
    loop {
        while *pos < data.len() && data[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < data.len() && data[*pos] == b'#' {
            while *pos < data.len() && data[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }
    let start = *pos;
    while *pos < data.len() && !data[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    if start == *pos {
        return Err(IoError::DecodeError("truncated PNM header".to_string()));
    }
    Ok(data[start..*pos].to_vec())
}

fn read_number(data: &[u8], pos: &mut usize) -> IoResult<u32> {
    let token = read_token(data, pos)?;
    std::str::from_utf8(&token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            IoError::DecodeError(format!(
                "invalid PNM header field: {}",
                String::from_utf8_lossy(&token)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_round_trip() {
        let grid = Grid::new(3, 2, GridDepth::Bit8).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        for (i, &v) in [0u32, 50, 100, 150, 200, 255].iter().enumerate() {
            gm.set_pixel_unchecked((i % 3) as u32, (i / 3) as u32, v);
        }
        let grid: Grid = gm.into();

        let mut bytes = Vec::new();
        write_pnm(&grid, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"P5"));

        let back = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(back.depth(), GridDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Pnm);
        assert_eq!(back.get_pixel(2, 1), Some(255));
    }

    #[test]
    fn test_ppm_round_trip() {
        let grid = Grid::new(2, 1, GridDepth::Bit32).unwrap();
        let mut gm = grid.try_into_mut().unwrap();
        gm.set_pixel_unchecked(0, 0, compose_rgb(1, 2, 3));
        gm.set_pixel_unchecked(1, 0, compose_rgb(200, 100, 50));
        let grid: Grid = gm.into();

        let mut bytes = Vec::new();
        write_pnm(&grid, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"P6"));

        let back = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(back.depth(), GridDepth::Bit32);
        assert_eq!(back.get_rgb(1, 0), Some((200, 100, 50)));
    }

    #[test]
    fn test_comment_in_header() {
        let bytes = b"P5\n# created by hand\n2 1\n255\n\x10\x20".to_vec();
        let grid = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(grid.get_pixel(0, 0), Some(0x10));
        assert_eq!(grid.get_pixel(1, 0), Some(0x20));
    }

    #[test]
    fn test_truncated_raster() {
        let bytes = b"P5\n4 4\n255\n\x01\x02".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(bytes)),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_ascii_variant_rejected() {
        let bytes = b"P2\n2 2\n255\n1 2 3 4\n".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(bytes)),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bad_maxval_rejected() {
        let bytes = b"P5\n2 1\n65535\n\x00\x00\x00\x00".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(bytes)),
            Err(IoError::InvalidData(_))
        ));
    }
}
