//! PyO3 binding for the Transformer.

use ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rayon::prelude::*;

use crate::point::{Cartesian, Geographic};
use crate::transform::Transformer;

/// Coordinate transformer between ETRS89 and the Dutch RD/NAP systems.
///
/// Construct from the raw bytes of the three Surfer grids: the x and y
/// distortion corrections and the geoid model.
#[pyclass(name = "Transformer")]
pub struct PyTransformer {
    inner: Transformer,
}

#[pymethods]
impl PyTransformer {
    #[new]
    fn new(grid_dx: &[u8], grid_dy: &[u8], geoid: &[u8]) -> PyResult<Self> {
        let inner = Transformer::from_bytes(grid_dx, grid_dy, geoid)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// ETRS89 (phi, lambda, h) -> RD (x, y, bessel height).
    fn etrs2rd(&self, phi: f64, lambda: f64, h: f64) -> PyResult<(f64, f64, f64)> {
        let rd = self
            .inner
            .etrs2rd(Geographic::new(phi, lambda, h))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((rd.x, rd.y, rd.z))
    }

    /// RD (x, y, nap) -> ETRS89 (phi, lambda, approximate h).
    fn rd2etrs(&self, x: f64, y: f64, nap: f64) -> PyResult<(f64, f64, f64)> {
        let etrs = self
            .inner
            .rd2etrs(Cartesian::new(x, y, nap))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((etrs.phi, etrs.lambda, etrs.h))
    }

    /// NAP height at an ETRS89 position, or None outside the geoid
    /// grid.
    fn etrs2nap(&self, phi: f64, lambda: f64, h: f64) -> Option<f64> {
        self.inner.etrs2nap(Geographic::new(phi, lambda, h))
    }

    /// Ellipsoidal ETRS89 height from a NAP height, or None outside
    /// the geoid grid.
    fn nap2etrs(&self, phi: f64, lambda: f64, nap: f64) -> Option<f64> {
        self.inner.nap2etrs(phi, lambda, nap)
    }

    /// ETRS89 (phi, lambda, h) -> RD/NAP (x, y, nap).
    fn etrs2rdnap(&self, phi: f64, lambda: f64, h: f64) -> PyResult<(f64, f64, f64)> {
        let rdnap = self
            .inner
            .etrs2rdnap(Geographic::new(phi, lambda, h))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((rdnap.x, rdnap.y, rdnap.z))
    }

    /// RD/NAP (x, y, nap) -> ETRS89 (phi, lambda, h).
    fn rdnap2etrs(&self, x: f64, y: f64, nap: f64) -> PyResult<(f64, f64, f64)> {
        let etrs = self
            .inner
            .rdnap2etrs(Cartesian::new(x, y, nap))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((etrs.phi, etrs.lambda, etrs.h))
    }

    /// Transform an N x 3 array of (phi, lambda, h) ETRS89 rows to
    /// RD/NAP. Rows that cannot be transformed come back as NaN.
    fn etrs2rdnap_array<'py>(
        &self,
        py: Python<'py>,
        points: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let rows = rows_of(&points)?;
        let inner = &self.inner;

        let out: Vec<[f64; 3]> = py.allow_threads(move || {
            rows.par_iter()
                .map(|&[phi, lambda, h]| {
                    match inner.etrs2rdnap(Geographic::new(phi, lambda, h)) {
                        Ok(rdnap) => [rdnap.x, rdnap.y, rdnap.z],
                        Err(_) => [f64::NAN; 3],
                    }
                })
                .collect()
        });

        to_pyarray(py, out)
    }

    /// Transform an N x 3 array of (x, y, nap) RD/NAP rows to ETRS89.
    /// Rows that cannot be transformed come back as NaN.
    fn rdnap2etrs_array<'py>(
        &self,
        py: Python<'py>,
        points: PyReadonlyArray2<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let rows = rows_of(&points)?;
        let inner = &self.inner;

        let out: Vec<[f64; 3]> = py.allow_threads(move || {
            rows.par_iter()
                .map(
                    |&[x, y, nap]| match inner.rdnap2etrs(Cartesian::new(x, y, nap)) {
                        Ok(etrs) => [etrs.phi, etrs.lambda, etrs.h],
                        Err(_) => [f64::NAN; 3],
                    },
                )
                .collect()
        });

        to_pyarray(py, out)
    }
}

/// Copy an N x 3 readonly array into owned rows before the GIL is
/// released.
fn rows_of(points: &PyReadonlyArray2<'_, f64>) -> PyResult<Vec<[f64; 3]>> {
    let view = points.as_array();
    if view.ncols() != 3 {
        return Err(PyValueError::new_err(format!(
            "expected an N x 3 array, got N x {}",
            view.ncols()
        )));
    }
    Ok(view.rows().into_iter().map(|r| [r[0], r[1], r[2]]).collect())
}

fn to_pyarray(py: Python<'_>, rows: Vec<[f64; 3]>) -> PyResult<Bound<'_, PyArray2<f64>>> {
    let n = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let array =
        Array2::from_shape_vec((n, 3), flat).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(PyArray2::from_owned_array_bound(py, array))
}
