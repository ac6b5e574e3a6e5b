//! Decoding of binary Surfer(R) grid files.
//!
//! A grd file starts with the four ASCII bytes "DSBB", followed by a
//! 56-byte header (node counts, bounding box, extreme values) and then
//! one little-endian f32 record per node, row-major from the lower-left
//! corner to the upper-right.

use ndarray::Array2;

use crate::error::GridError;

const GRID_MAGIC: &[u8; 4] = b"DSBB";
const RECORD_LEN: usize = 4;

/// Header of a Surfer grid plus the derived lattice geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridHeader {
    /// Number of grid nodes in the x direction.
    pub size_x: usize,
    /// Number of grid nodes in the y direction.
    pub size_y: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Minimum value in the grid, besides the "no data" sentinels.
    pub min_value: f64,
    /// Maximum value in the grid, besides the "no data" sentinels.
    pub max_value: f64,
    pub step_size_x: f64,
    pub step_size_y: f64,
}

impl GridHeader {
    // The bounding box shrunk by one grid step per side. Queries must
    // fall strictly inside it so a full 4x4 stencil stays in range.

    pub fn safe_min_x(&self) -> f64 {
        self.min_x + self.step_size_x
    }

    pub fn safe_max_x(&self) -> f64 {
        self.max_x - self.step_size_x
    }

    pub fn safe_min_y(&self) -> f64 {
        self.min_y + self.step_size_y
    }

    pub fn safe_max_y(&self) -> f64 {
        self.max_y - self.step_size_y
    }
}

/// Cursor over the raw grid bytes; every read is bounds-checked.
struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], GridError> {
        let end = self.pos + len;
        let bytes = self.buf.get(self.pos..end).ok_or_else(|| {
            GridError::OutOfRange(format!(
                "grid data truncated: need {end} bytes, have {}",
                self.buf.len()
            ))
        })?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_i16(&mut self) -> Result<i16, GridError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn read_f64(&mut self) -> Result<f64, GridError> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(f64::from_le_bytes(raw))
    }
}

/// An immutable grid dataset: header plus the node-value lattice.
///
/// Row 0 of the lattice is the bottom edge of the grid, matching the
/// record order in the file. Loaded once, read-only afterwards, and
/// safe to share across threads.
#[derive(Clone, Debug)]
pub struct GridStore {
    header: GridHeader,
    nodes: Array2<f32>,
}

impl GridStore {
    /// Decode a Surfer grid from raw bytes.
    pub fn load(bytes: &[u8]) -> Result<Self, GridError> {
        let mut decoder = Decoder::new(bytes);

        let magic = decoder.take(4)?;
        if magic != GRID_MAGIC {
            return Err(GridError::InvalidFormat(format!(
                "expected magic \"DSBB\", found {:?}",
                String::from_utf8_lossy(magic)
            )));
        }

        let size_x = decoder.read_i16()?;
        let size_y = decoder.read_i16()?;
        let min_x = decoder.read_f64()?;
        let max_x = decoder.read_f64()?;
        let min_y = decoder.read_f64()?;
        let max_y = decoder.read_f64()?;
        let min_value = decoder.read_f64()?;
        let max_value = decoder.read_f64()?;

        if size_x < 2 || size_y < 2 {
            return Err(GridError::DegenerateGrid(format!(
                "node counts {size_x}x{size_y}, need at least 2 per axis"
            )));
        }
        let size_x = size_x as usize;
        let size_y = size_y as usize;

        let step_size_x = (max_x - min_x) / (size_x - 1) as f64;
        let step_size_y = (max_y - min_y) / (size_y - 1) as f64;
        if !(step_size_x > 0.0 && step_size_x.is_finite())
            || !(step_size_y > 0.0 && step_size_y.is_finite())
        {
            return Err(GridError::DegenerateGrid(format!(
                "step sizes ({step_size_x}, {step_size_y}) must be positive and finite"
            )));
        }

        let count = size_x * size_y;
        let body = decoder.take(count * RECORD_LEN)?;
        let mut values = Vec::with_capacity(count);
        for record in body.chunks_exact(RECORD_LEN) {
            let mut raw = [0u8; RECORD_LEN];
            raw.copy_from_slice(record);
            values.push(f32::from_le_bytes(raw));
        }

        let nodes = Array2::from_shape_vec((size_y, size_x), values)
            .map_err(|e| GridError::InvalidFormat(e.to_string()))?;

        log::debug!(
            "loaded {size_x}x{size_y} grid covering ({min_x}, {min_y})..({max_x}, {max_y})"
        );

        Ok(Self {
            header: GridHeader {
                size_x,
                size_y,
                min_x,
                max_x,
                min_y,
                max_y,
                min_value,
                max_value,
                step_size_x,
                step_size_y,
            },
            nodes,
        })
    }

    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    /// Node value by flat record index, counted row-major from the
    /// lower-left corner.
    pub fn read_node(&self, index: usize) -> Result<f32, GridError> {
        let row = index / self.header.size_x;
        let col = index % self.header.size_x;
        self.nodes.get((row, col)).copied().ok_or_else(|| {
            GridError::OutOfRange(format!(
                "record {index} outside 0..{}",
                self.header.size_x * self.header.size_y
            ))
        })
    }

    /// Node value by lattice position, row 0 at the bottom edge.
    pub(crate) fn node_at(&self, row: usize, col: usize) -> Option<f32> {
        self.nodes.get((row, col)).copied()
    }

    /// Interpolated value at (x, y); `None` outside the validity area.
    pub fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        crate::grid::interpolate::interpolate(self, x, y)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    /// Assemble Surfer grid bytes from header fields and node values.
    pub fn grid_bytes(
        size_x: i16,
        size_y: i16,
        bounds: [f64; 4],
        value_range: [f64; 2],
        values: &[f32],
    ) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(56 + values.len() * 4);
        bytes.extend_from_slice(b"DSBB");
        bytes.extend_from_slice(&size_x.to_le_bytes());
        bytes.extend_from_slice(&size_y.to_le_bytes());
        for v in bounds {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        for v in value_range {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::grid_bytes;
    use super::*;
    use approx::assert_relative_eq;

    fn sample_grid() -> GridStore {
        // 4x4 lattice over [0, 3] x [0, 3], values 0..16 from the
        // lower-left corner.
        let values: Vec<f32> = (0..16).map(|i| i as f32).collect();
        GridStore::load(&grid_bytes(
            4,
            4,
            [0.0, 3.0, 0.0, 3.0],
            [0.0, 15.0],
            &values,
        ))
        .unwrap()
    }

    #[test]
    fn test_header_fields() {
        let grid = sample_grid();
        let header = grid.header();
        assert_eq!(header.size_x, 4);
        assert_eq!(header.size_y, 4);
        assert_relative_eq!(header.step_size_x, 1.0);
        assert_relative_eq!(header.step_size_y, 1.0);
        assert_relative_eq!(header.safe_min_x(), 1.0);
        assert_relative_eq!(header.safe_max_x(), 2.0);
        assert_relative_eq!(header.safe_min_y(), 1.0);
        assert_relative_eq!(header.safe_max_y(), 2.0);
    }

    #[test]
    fn test_read_node_row_major_from_bottom_left() {
        let grid = sample_grid();
        assert_eq!(grid.read_node(0).unwrap(), 0.0);
        assert_eq!(grid.read_node(3).unwrap(), 3.0);
        // First node of the second row from the bottom.
        assert_eq!(grid.read_node(4).unwrap(), 4.0);
        assert_eq!(grid.read_node(15).unwrap(), 15.0);
    }

    #[test]
    fn test_read_node_out_of_range() {
        let grid = sample_grid();
        assert!(matches!(
            grid.read_node(16),
            Err(GridError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = grid_bytes(4, 4, [0.0, 3.0, 0.0, 3.0], [0.0, 15.0], &[0.0; 16]);
        bytes[0] = b'X';
        assert!(matches!(
            GridStore::load(&bytes),
            Err(GridError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_degenerate_node_count() {
        let bytes = grid_bytes(1, 4, [0.0, 3.0, 0.0, 3.0], [0.0, 15.0], &[0.0; 4]);
        assert!(matches!(
            GridStore::load(&bytes),
            Err(GridError::DegenerateGrid(_))
        ));
    }

    #[test]
    fn test_degenerate_bounds() {
        // max_x below min_x yields a negative step size.
        let bytes = grid_bytes(4, 4, [3.0, 0.0, 0.0, 3.0], [0.0, 15.0], &[0.0; 16]);
        assert!(matches!(
            GridStore::load(&bytes),
            Err(GridError::DegenerateGrid(_))
        ));
    }

    #[test]
    fn test_non_finite_bounds() {
        let bytes = grid_bytes(4, 4, [f64::NAN, 3.0, 0.0, 3.0], [0.0, 15.0], &[0.0; 16]);
        assert!(matches!(
            GridStore::load(&bytes),
            Err(GridError::DegenerateGrid(_))
        ));
    }

    #[test]
    fn test_truncated_body() {
        // Only 15 of the 16 records present.
        let bytes = grid_bytes(4, 4, [0.0, 3.0, 0.0, 3.0], [0.0, 15.0], &[0.0; 15]);
        assert!(matches!(
            GridStore::load(&bytes),
            Err(GridError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            GridStore::load(b"DSBB\x04\x00"),
            Err(GridError::OutOfRange(_))
        ));
    }
}
