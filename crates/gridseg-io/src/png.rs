//! PNG image format support
//!
//! Grayscale input at any bit depth is normalized to the library's 8-bpp
//! grid; color input lands in a 32-bpp RGB grid with alpha dropped.
//! Indexed PNGs are resolved through their palette.

use crate::{IoError, IoResult};
use gridseg_core::{Grid, GridDepth, ImageFormat, compose_rgb, rgb_components};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let grid_depth = match color_type {
        ColorType::Grayscale | ColorType::GrayscaleAlpha | ColorType::Indexed => GridDepth::Bit8,
        ColorType::Rgb | ColorType::Rgba => GridDepth::Bit32,
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    // Indexed PNGs carry a palette; resolve entries to luma.
    let palette_gray: Option<Vec<u8>> = if color_type == ColorType::Indexed {
        let palette = reader.info().palette.as_ref().ok_or_else(|| {
            IoError::DecodeError("indexed PNG without a palette".to_string())
        })?;
        Some(
            palette
                .chunks(3)
                .filter(|c| c.len() == 3)
                .map(|c| {
                    (0.299 * c[0] as f32 + 0.587 * c[1] as f32 + 0.114 * c[2] as f32).round() as u8
                })
                .collect(),
        )
    } else {
        None
    };

    let grid = Grid::new(width, height, grid_depth)?;
    let mut gm = grid
        .try_into_mut()
        .unwrap_or_else(|g| g.to_mut());
    gm.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    // Sub-byte grayscale samples scale up to the full 8-bit range.
    let scale_to_u8 = |val: u32, depth: BitDepth| -> u32 {
        match depth {
            BitDepth::One => val * 255,
            BitDepth::Two => val * 255 / 3,
            BitDepth::Four => val * 255 / 15,
            _ => val,
        }
    };

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) | (ColorType::Indexed, BitDepth::One) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 8) as usize;
                    let bit_idx = 7 - (x % 8);
                    let raw = ((data[byte_idx] >> bit_idx) & 1) as u32;
                    let val = match &palette_gray {
                        Some(p) => palette_lookup(p, raw)?,
                        None => scale_to_u8(raw, bit_depth),
                    };
                    gm.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Two) | (ColorType::Indexed, BitDepth::Two) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    let raw = ((data[byte_idx] >> shift) & 3) as u32;
                    let val = match &palette_gray {
                        Some(p) => palette_lookup(p, raw)?,
                        None => scale_to_u8(raw, bit_depth),
                    };
                    gm.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Four) | (ColorType::Indexed, BitDepth::Four) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 2) as usize;
                    let raw = if x % 2 == 0 {
                        (data[byte_idx] >> 4) & 0xF
                    } else {
                        data[byte_idx] & 0xF
                    } as u32;
                    let val = match &palette_gray {
                        Some(p) => palette_lookup(p, raw)?,
                        None => scale_to_u8(raw, bit_depth),
                    };
                    gm.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Eight) | (ColorType::Indexed, BitDepth::Eight) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let raw = data[row_start + x as usize] as u32;
                    let val = match &palette_gray {
                        Some(p) => palette_lookup(p, raw)?,
                        None => raw,
                    };
                    gm.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            // Keep the high byte.
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * 2);
                    gm.set_pixel_unchecked(x, y, data[idx] as u32);
                }
            }
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    gm.set_pixel_unchecked(x, y, data[idx] as u32);
                }
            }
        }
        (ColorType::Rgb, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 6 } else { 3 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    gm.set_pixel_unchecked(x, y, compose_rgb(r, g, b));
                }
            }
        }
        (ColorType::Rgba, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 8 } else { 4 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    gm.set_pixel_unchecked(x, y, compose_rgb(r, g, b));
                }
            }
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    Ok(gm.into())
}

fn palette_lookup(palette: &[u8], index: u32) -> IoResult<u32> {
    palette
        .get(index as usize)
        .map(|&v| u32::from(v))
        .ok_or_else(|| IoError::DecodeError(format!("palette index {} out of range", index)))
}

/// Write a PNG image
pub fn write_png<W: Write>(grid: &Grid, writer: W) -> IoResult<()> {
    let width = grid.width();
    let height = grid.height();

    let color_type = match grid.depth() {
        GridDepth::Bit8 => ColorType::Grayscale,
        GridDepth::Bit32 => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match color_type {
        ColorType::Grayscale => width,
        _ => width * 3,
    } as usize;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        match color_type {
            ColorType::Grayscale => {
                for x in 0..width {
                    data[row_start + x as usize] = grid.get_pixel_unchecked(x, y) as u8;
                }
            }
            _ => {
                for x in 0..width {
                    let (r, g, b) = rgb_components(grid.get_pixel_unchecked(x, y));
                    let idx = row_start + (x as usize * 3);
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
