//! Overhauser-spline grid interpolation.
//!
//! Interpolates over the 4x4 node neighborhood around the query point:
//!
//! ```text
//!     12  13  14  15
//!
//!      8   9  10  11
//!            X
//!      4   5   6   7
//!
//!      0   1   2   3
//! ```
//!
//! The fractional offsets ddx and ddy are measured from node 9, to the
//! right and down respectively.

use crate::geodesy::PRECISION;
use crate::grid::store::GridStore;

/// Overhauser (Catmull-Rom family) blending weights for a fractional
/// offset t.
fn overhauser(t: f64) -> [f64; 4] {
    [
        -0.5 * t + t * t - 0.5 * t * t * t,
        1.0 - 2.5 * t * t + 1.5 * t * t * t,
        0.5 * t + 2.0 * t * t - 1.5 * t * t * t,
        -0.5 * t * t + 0.5 * t * t * t,
    ]
}

/// Interpolate the grid at (x, y).
///
/// Returns `None` when the query point is not strictly inside the safe
/// bounding box, or when any node of the stencil carries a "no data"
/// sentinel (a very large value outside the header's value range).
/// Both are normal outcomes near the dataset edges, not errors; callers
/// fall back to the uncorrected value.
pub fn interpolate(grid: &GridStore, x: f64, y: f64) -> Option<f64> {
    let header = grid.header();
    if !(x > header.safe_min_x()
        && x < header.safe_max_x()
        && y > header.safe_min_y()
        && y < header.safe_max_y())
    {
        return None;
    }

    let fx = (x - header.min_x) / header.step_size_x;
    let fy = (y - header.min_y) / header.step_size_y;
    let ddx = fx - fx.floor();
    let ddy = 1.0 - (fy - fy.floor());

    // Lattice position of node 5; the safe-box check above keeps the
    // whole stencil inside the lattice.
    let col = fx.floor() as usize;
    let row = fy.floor() as usize;

    let f = overhauser(ddx);
    let g = overhauser(ddy);

    // g[0] weights the top stencil row (nodes 12..15), f[0] the left
    // column.
    let mut value = 0.0;
    for (j, gj) in g.iter().enumerate() {
        for (k, fk) in f.iter().enumerate() {
            let node = grid.node_at(row + 2 - j, col + k - 1)? as f64;
            if node > header.max_value + PRECISION || node < header.min_value - PRECISION {
                return None;
            }
            value += fk * gj * node;
        }
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::store::testutil::grid_bytes;
    use approx::assert_relative_eq;

    fn constant_grid(value: f32) -> GridStore {
        GridStore::load(&grid_bytes(
            6,
            6,
            [0.0, 5.0, 0.0, 5.0],
            [value as f64, value as f64],
            &vec![value; 36],
        ))
        .unwrap()
    }

    fn gradient_grid() -> GridStore {
        // value = column index, so the surface is linear in x.
        let values: Vec<f32> = (0..64).map(|i| (i % 8) as f32).collect();
        GridStore::load(&grid_bytes(8, 8, [0.0, 7.0, 0.0, 7.0], [0.0, 7.0], &values)).unwrap()
    }

    #[test]
    fn test_weights_partition_of_unity() {
        for &t in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let sum: f64 = overhauser(t).iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_grid() {
        let grid = constant_grid(7.5);
        assert_relative_eq!(grid.interpolate(2.5, 2.5).unwrap(), 7.5, epsilon = 1e-12);
        assert_relative_eq!(grid.interpolate(1.1, 3.9).unwrap(), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_gradient_reproduced() {
        // The spline reproduces linear surfaces exactly.
        let grid = gradient_grid();
        assert_relative_eq!(grid.interpolate(3.25, 3.5).unwrap(), 3.25, epsilon = 1e-9);
        assert_relative_eq!(grid.interpolate(4.0, 2.5).unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(grid.interpolate(1.5, 5.5).unwrap(), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_node_hit() {
        let grid = gradient_grid();
        assert_relative_eq!(grid.interpolate(3.0, 3.0).unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outside_safe_box() {
        let grid = gradient_grid();
        // Inside the bounding box but within one step of the edge.
        assert!(grid.interpolate(0.5, 3.0).is_none());
        assert!(grid.interpolate(6.5, 3.0).is_none());
        assert!(grid.interpolate(3.0, 0.5).is_none());
        // The safe boundary itself is excluded.
        assert!(grid.interpolate(1.0, 3.0).is_none());
        assert!(grid.interpolate(3.0, 6.0).is_none());
        // Far outside.
        assert!(grid.interpolate(100.0, 100.0).is_none());
        assert!(grid.interpolate(-100.0, 3.0).is_none());
    }

    #[test]
    fn test_non_finite_query() {
        let grid = gradient_grid();
        assert!(grid.interpolate(f64::NAN, 3.0).is_none());
        assert!(grid.interpolate(3.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_sentinel_invalidates_stencil() {
        // Outside the validity area the records hold a very large
        // value (circa 1.7e38).
        let mut values = vec![1.0f32; 64];
        values[8 * 3 + 3] = 1.7e38;
        let grid =
            GridStore::load(&grid_bytes(8, 8, [0.0, 7.0, 0.0, 7.0], [0.0, 2.0], &values)).unwrap();

        // The poisoned node (3, 3) sits in this stencil.
        assert!(grid.interpolate(3.4, 3.4).is_none());
        // Far enough away the stencil no longer touches it.
        assert_relative_eq!(grid.interpolate(5.6, 5.6).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let grid = gradient_grid();
        let a = grid.interpolate(2.71, 3.14).unwrap();
        let b = grid.interpolate(2.71, 3.14).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
