//! Geodetic primitives: degree-based trigonometry, reference
//! ellipsoids, datum conversions, the 7-parameter similarity transform
//! and the RD double stereographic projection.

pub mod common;
pub mod datum;
pub mod ellipsoid;
pub mod helmert;
pub mod stereographic;

/// Iteration tolerance in metres.
pub const PRECISION: f64 = 0.0001;

/// The iteration tolerance expressed in degrees.
pub const DEG_PRECISION: f64 = PRECISION / (40e6 * 360.0);

/// Cap on the latitude fixed-point iterations. Realistic inputs
/// converge within a handful of steps; hitting the cap surfaces as
/// [`crate::error::TransformError::NotConverged`].
pub const MAX_ITERATIONS: usize = 100;
