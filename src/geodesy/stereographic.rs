//! The RD double stereographic projection, centered on Amersfoort.
//!
//! The ellipsoid is first mapped conformally onto a sphere (Gaussian
//! projection), then the sphere is projected stereographically onto the
//! plane tangent near the Amersfoort base point.

use crate::error::TransformError;
use crate::geodesy::common::{atanh, deg_asin, deg_atan, deg_cos, deg_sin, deg_tan};
use crate::geodesy::ellipsoid::BESSEL_1841;
use crate::geodesy::{DEG_PRECISION, MAX_ITERATIONS, PRECISION};
use crate::point::{Cartesian, Geographic};

/// Bessel latitude of the projection base point Amersfoort, in decimal
/// degrees (52 deg 9' 22.178").
pub const PHI_AMERSFOORT_BESSEL: f64 = 52.0 + 9.0 / 60.0 + 22.178 / 3600.0;

/// Bessel longitude of Amersfoort (5 deg 23' 15.500").
pub const LAMBDA_AMERSFOORT_BESSEL: f64 = 5.0 + 23.0 / 60.0 + 15.500 / 3600.0;

/// Ellipsoidal Bessel height of Amersfoort.
pub const H_AMERSFOORT_BESSEL: f64 = 0.0;

/// Scale factor at the projection center, defined as exactly 0.9999079.
pub const SCALE_RD: f64 = 0.9999079;

/// False easting of the RD origin.
pub const X_AMERSFOORT_RD: f64 = 155_000.0;

/// False northing of the RD origin.
pub const Y_AMERSFOORT_RD: f64 = 463_000.0;

/// The RD projection with its conformal-sphere constants precomputed.
///
/// * `n`, `m`: the Gaussian projection constants (n = 1.000475...,
///   m = 0.003773...);
/// * `r_sphere`: radius of the conformal sphere, the geometric mean of
///   the principal radii of curvature in Amersfoort;
/// * `phi_pivot_sphere`: latitude of Amersfoort on the sphere.
#[derive(Clone, Copy, Debug)]
pub struct RdProjection {
    e: f64,
    n: f64,
    m: f64,
    r_sphere: f64,
    phi_pivot_sphere: f64,
    lambda_pivot_sphere: f64,
}

impl RdProjection {
    pub fn new() -> Self {
        let f = 1.0 / BESSEL_1841.inv_f;
        let ee = f * (2.0 - f);
        let e = ee.sqrt();
        // Second eccentricity squared (e' squared in some notations).
        let eea = ee / (1.0 - ee);

        let phi_pivot_sphere = deg_atan(
            deg_tan(PHI_AMERSFOORT_BESSEL)
                / (1.0 + eea * deg_cos(PHI_AMERSFOORT_BESSEL).powi(2)).sqrt(),
        );
        let lambda_pivot_sphere = LAMBDA_AMERSFOORT_BESSEL;

        // First (North-South) and second (East-West) principal radii of
        // curvature in Amersfoort.
        let r1 = BESSEL_1841.a * (1.0 - ee)
            / (1.0 - ee * deg_sin(PHI_AMERSFOORT_BESSEL).powi(2))
                .sqrt()
                .powi(3);
        let r2 = BESSEL_1841.a / (1.0 - ee * deg_sin(PHI_AMERSFOORT_BESSEL).powi(2)).sqrt();
        let r_sphere = (r1 * r2).sqrt();

        let n = (1.0 + eea * deg_cos(PHI_AMERSFOORT_BESSEL).powi(4)).sqrt();
        // Isometric latitudes of Amersfoort on the ellipsoid and the
        // sphere.
        let q_pivot = atanh(deg_sin(PHI_AMERSFOORT_BESSEL))
            - e * atanh(e * deg_sin(PHI_AMERSFOORT_BESSEL));
        let w_pivot = deg_tan(45.0 + 0.5 * phi_pivot_sphere).ln();
        let m = w_pivot - n * q_pivot;

        Self {
            e,
            n,
            m,
            r_sphere,
            phi_pivot_sphere,
            lambda_pivot_sphere,
        }
    }

    /// Project Bessel geographic coordinates onto the RD plane; only
    /// x and y of the result are meaningful (z = 0).
    pub fn forward(&self, input: Geographic) -> Cartesian {
        // Isometric latitude on the ellipsoid, then on the sphere.
        let q = atanh(deg_sin(input.phi)) - self.e * atanh(self.e * deg_sin(input.phi));
        let w = self.n * q + self.m;
        let phi_sphere = 2.0 * deg_atan(w.exp()) - 90.0;
        let delta_lambda_sphere = self.n * (input.lambda - self.lambda_pivot_sphere);

        // Distance angle psi and azimuth alpha from Amersfoort on the
        // sphere, via the half-angle formulas.
        let sin_half_psi_squared = deg_sin(0.5 * (phi_sphere - self.phi_pivot_sphere)).powi(2)
            + deg_sin(0.5 * delta_lambda_sphere).powi(2)
                * deg_cos(phi_sphere)
                * deg_cos(self.phi_pivot_sphere);
        let sin_half_psi = sin_half_psi_squared.sqrt();
        let cos_half_psi = (1.0 - sin_half_psi_squared).sqrt();
        let tan_half_psi = sin_half_psi / cos_half_psi;
        let sin_psi = 2.0 * sin_half_psi * cos_half_psi;
        let cos_psi = 1.0 - 2.0 * sin_half_psi_squared;

        let sin_alpha = deg_sin(delta_lambda_sphere) * (deg_cos(phi_sphere) / sin_psi);
        let cos_alpha = (deg_sin(phi_sphere) - deg_sin(self.phi_pivot_sphere) * cos_psi)
            / (deg_cos(self.phi_pivot_sphere) * sin_psi);
        let r = 2.0 * SCALE_RD * self.r_sphere * tan_half_psi;

        Cartesian::planar(
            r * sin_alpha + X_AMERSFOORT_RD,
            r * cos_alpha + Y_AMERSFOORT_RD,
        )
    }

    /// Invert the projection. The spherical latitude maps back to the
    /// ellipsoid through a fixed-point iteration.
    pub fn inverse(&self, rd: Cartesian) -> Result<Geographic, TransformError> {
        let r = ((rd.x - X_AMERSFOORT_RD).powi(2) + (rd.y - Y_AMERSFOORT_RD).powi(2)).sqrt();

        // At the projection origin the azimuth is conventionally fixed.
        let (sin_alpha, cos_alpha) = if r < PRECISION {
            (0.0, 1.0)
        } else {
            ((rd.x - X_AMERSFOORT_RD) / r, (rd.y - Y_AMERSFOORT_RD) / r)
        };

        let psi = 2.0 * deg_atan(r / (2.0 * SCALE_RD * self.r_sphere));
        let phi_sphere = deg_asin(
            cos_alpha * deg_cos(self.phi_pivot_sphere) * deg_sin(psi)
                + deg_sin(self.phi_pivot_sphere) * deg_cos(psi),
        );
        let delta_lambda_sphere = deg_asin(sin_alpha * deg_sin(psi) / deg_cos(phi_sphere));

        let lambda = delta_lambda_sphere / self.n + LAMBDA_AMERSFOORT_BESSEL;

        let w = atanh(deg_sin(phi_sphere));
        let q = (w - self.m) / self.n;

        let mut phi = 0.0;
        for _ in 0..MAX_ITERATIONS {
            let previous = phi;
            phi = 2.0 * deg_atan((q + self.e * atanh(self.e * deg_sin(phi))).exp()) - 90.0;
            if (phi - previous).abs() <= DEG_PRECISION {
                return Ok(Geographic::on_ellipsoid(phi, lambda));
            }
        }
        Err(TransformError::NotConverged(MAX_ITERATIONS))
    }
}

impl Default for RdProjection {
    fn default() -> Self {
        Self::new()
    }
}
