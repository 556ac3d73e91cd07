//! Bytes-in, bytes-out segmentation pipeline
//!
//! The top-level entry point for callers that hold an encoded image
//! rather than a decoded grid. Decodes, segments with a named algorithm,
//! and re-encodes in the container the input arrived in.

use gridseg_io::{IoError, decode_image, encode_image};
use gridseg_region::{RegionError, SegmentationAlgorithm, SegmentationParams, segment};
use thiserror::Error;

/// Errors from the end-to-end segmentation pipeline
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Decoding or encoding the image failed
    #[error("image I/O error: {0}")]
    Io(#[from] IoError),

    /// Segmentation itself failed
    #[error("segmentation error: {0}")]
    Region(#[from] RegionError),
}

/// Segment an encoded image.
///
/// The input format is sniffed from the bytes and the output is encoded
/// in that same format. `algorithm` is the wire name of the algorithm,
/// `"region-growing"` or `"split-merge"`.
///
/// # Errors
///
/// Returns [`SegmentError::Io`] for undecodable input and
/// [`SegmentError::Region`] for an unknown algorithm name or invalid
/// parameters.
pub fn segment_image(
    data: &[u8],
    algorithm: &str,
    params: &SegmentationParams,
) -> Result<Vec<u8>, SegmentError> {
    let grid = decode_image(data)?;
    let algorithm: SegmentationAlgorithm = algorithm.parse()?;
    let result = segment(&grid, algorithm, params)?;
    Ok(encode_image(&result, grid.informat())?)
}
