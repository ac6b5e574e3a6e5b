//! RDNAPTRANS(TM)2008 coordinate transformations for the Netherlands.
//!
//! Converts point coordinates between ETRS89 (geographic latitude and
//! longitude on GRS80), RD (the Dutch planar double stereographic
//! projection) and NAP (the Dutch orthometric height datum), using the
//! x2c/y2c distortion grids and the NLGEO2004 geoid model in binary
//! Surfer format.
//!
//! Grid data is supplied by the caller as raw bytes; the crate never
//! resolves file names or paths itself.
//!
//! ```no_run
//! use _rust::{Geographic, Transformer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let x2c = std::fs::read("x2c.grd")?;
//! let y2c = std::fs::read("y2c.grd")?;
//! let geoid = std::fs::read("nlgeo04.grd")?;
//! let tf = Transformer::from_bytes(&x2c, &y2c, &geoid)?;
//!
//! let rdnap = tf.etrs2rdnap(Geographic::new(52.1551729, 5.387203657, 43.2551))?;
//! println!("x = {}, y = {}, nap = {}", rdnap.x, rdnap.y, rdnap.z);
//! # Ok(())
//! # }
//! ```

use pyo3::prelude::*;

pub mod dms;
pub mod error;
pub mod geodesy;
pub mod grid;
pub mod point;
pub mod transform;
mod py;

pub use error::{GridError, TransformError};
pub use grid::{GridHeader, GridStore};
pub use point::{Cartesian, Geographic};
pub use transform::Transformer;

/// A Python module implemented in Rust.
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
