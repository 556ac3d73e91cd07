//! Split-and-merge regression test
//!
//! Covers quadtree decomposition, mean filling of homogeneous nodes,
//! the depth and size short-circuits, and exact tiling of odd-sized
//! grids.
//!
//! Run with:
//! ```
//! cargo test -p gridseg-region --test splitmerge_reg
//! ```

use gridseg_core::Grid;
use gridseg_region::{SplitMergeOptions, split_and_merge};
use gridseg_test::{RegParams, grid_from_rows, uniform_grid};

fn count_value(grid: &Grid, value: u32) -> u64 {
    let mut n = 0u64;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get_pixel_unchecked(x, y) == value {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn splitmerge_homogeneous() {
    let mut rp = RegParams::new("splitmerge_homog");

    // A uniform grid merges at the root in one step.
    let grid = uniform_grid(16, 16, 90).unwrap();
    let out = split_and_merge(&grid, &SplitMergeOptions::default()).unwrap();
    rp.compare_values(256.0, count_value(&out, 90) as f64, 0.0);

    // Mild noise under the threshold still merges at the root, and the
    // fill value is the truncated mean.
    let grid = grid_from_rows(&[
        &[88, 92, 88, 92],
        &[92, 88, 92, 88],
        &[88, 92, 88, 92],
        &[92, 88, 92, 88],
    ])
    .unwrap();
    let opts = SplitMergeOptions::new().with_threshold(5.0).with_min_size(1);
    let out = split_and_merge(&grid, &opts).unwrap();
    rp.compare_values(16.0, count_value(&out, 90) as f64, 0.0);

    assert!(rp.cleanup(), "splitmerge homogeneous test failed");
}

#[test]
fn splitmerge_quadrant_blocks() {
    let mut rp = RegParams::new("splitmerge_blocks");

    // Four uniform 8x8 blocks: the root is heterogeneous, each quadrant
    // merges after one split.
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for y in 0..16 {
        let mut row = Vec::with_capacity(16);
        for x in 0..16 {
            let v = match (x < 8, y < 8) {
                (true, true) => 20,
                (false, true) => 80,
                (true, false) => 140,
                (false, false) => 220,
            };
            row.push(v);
        }
        rows.push(row);
    }
    let row_refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
    let grid = grid_from_rows(&row_refs).unwrap();

    let opts = SplitMergeOptions::new().with_threshold(5.0);
    let out = split_and_merge(&grid, &opts).unwrap();
    for v in [20u32, 80, 140, 220] {
        rp.compare_values(64.0, count_value(&out, v) as f64, 0.0);
    }
    rp.compare_values(16.0, out.width() as f64, 0.0);
    rp.compare_values(16.0, out.height() as f64, 0.0);

    assert!(rp.cleanup(), "splitmerge quadrant test failed");
}

#[test]
fn splitmerge_short_circuits() {
    let mut rp = RegParams::new("splitmerge_limits");

    // min_size leaf: a noisy tile at or below the minimum extent is
    // passed through unchanged even with a zero threshold.
    let grid = grid_from_rows(&[
        &[0, 255, 0, 255],
        &[255, 0, 255, 0],
        &[0, 255, 0, 255],
        &[255, 0, 255, 0],
    ])
    .unwrap();
    let opts = SplitMergeOptions::new().with_threshold(0.0).with_min_size(4);
    let out = split_and_merge(&grid, &opts).unwrap();
    rp.compare_values(8.0, count_value(&out, 0) as f64, 0.0);
    rp.compare_values(8.0, count_value(&out, 255) as f64, 0.0);

    // max_depth leaf: with depth 1 the heterogeneous root splits once
    // and every quadrant is passed through, homogeneous or not.
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for _ in 0..8 {
        let mut row = vec![10u8; 4];
        row.extend(vec![200u8; 4]);
        rows.push(row);
    }
    let row_refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
    let grid = grid_from_rows(&row_refs).unwrap();
    let opts = SplitMergeOptions::new()
        .with_threshold(5.0)
        .with_min_size(1)
        .with_max_depth(1);
    let out = split_and_merge(&grid, &opts).unwrap();
    rp.compare_values(32.0, count_value(&out, 10) as f64, 0.0);
    rp.compare_values(32.0, count_value(&out, 200) as f64, 0.0);

    assert!(rp.cleanup(), "splitmerge short-circuit test failed");
}

#[test]
fn splitmerge_rerun_is_stable() {
    let mut rp = RegParams::new("splitmerge_rerun");

    // Re-running on the output with the same threshold yields nothing
    // finer: merged tiles have zero deviation and re-merge to the same
    // fill, pass-through leaves are unchanged, and with values this far
    // apart every mixed node stays above the threshold in both passes.
    let grid = grid_from_rows(&[
        &[10, 10, 10, 200, 200, 200, 200],
        &[10, 10, 10, 200, 200, 200, 200],
        &[10, 10, 10, 200, 200, 200, 200],
        &[200, 200, 200, 200, 200, 200, 200],
        &[200, 200, 200, 200, 200, 200, 200],
    ])
    .unwrap();
    let opts = SplitMergeOptions::new().with_threshold(20.0).with_min_size(1);
    let first = split_and_merge(&grid, &opts).unwrap();
    let second = split_and_merge(&first, &opts).unwrap();
    rp.compare_grids(&first, &second);

    // The same holds when the first pass actually merges noisy tiles:
    // the fill is constant, so the second pass reproduces it exactly.
    let noisy = grid_from_rows(&[
        &[88, 92, 88, 92, 210, 190, 210, 190],
        &[92, 88, 92, 88, 190, 210, 190, 210],
        &[88, 92, 88, 92, 210, 190, 210, 190],
        &[92, 88, 92, 88, 190, 210, 190, 210],
        &[88, 92, 88, 92, 210, 190, 210, 190],
        &[92, 88, 92, 88, 190, 210, 190, 210],
        &[88, 92, 88, 92, 210, 190, 210, 190],
        &[92, 88, 92, 88, 190, 210, 190, 210],
    ])
    .unwrap();
    let first = split_and_merge(&noisy, &opts).unwrap();
    let second = split_and_merge(&first, &opts).unwrap();
    rp.compare_grids(&first, &second);
    // Both halves merged to their truncated means in pass one.
    rp.compare_values(32.0, count_value(&first, 90) as f64, 0.0);
    rp.compare_values(32.0, count_value(&first, 200) as f64, 0.0);

    assert!(rp.cleanup(), "splitmerge re-run stability test failed");
}

#[test]
fn splitmerge_odd_dimensions() {
    let mut rp = RegParams::new("splitmerge_odd");

    // Odd extents split with floor division; the bottom and right
    // quadrants absorb the remainder and the tiles still cover every
    // pixel exactly once.
    let grid = uniform_grid(13, 9, 55).unwrap();
    let opts = SplitMergeOptions::new().with_threshold(0.0).with_min_size(1);
    let out = split_and_merge(&grid, &opts).unwrap();
    rp.compare_values(13.0, out.width() as f64, 0.0);
    rp.compare_values(9.0, out.height() as f64, 0.0);
    rp.compare_values((13 * 9) as f64, count_value(&out, 55) as f64, 0.0);

    // A 1-pixel-wide strip is a size leaf immediately.
    let strip = uniform_grid(1, 20, 7).unwrap();
    let out = split_and_merge(&strip, &opts).unwrap();
    rp.compare_values(20.0, count_value(&out, 7) as f64, 0.0);

    assert!(rp.cleanup(), "splitmerge odd dimension test failed");
}
