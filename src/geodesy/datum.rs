//! Conversions between ellipsoidal geographic and cartesian
//! coordinates.

use crate::error::TransformError;
use crate::geodesy::common::{deg_atan, deg_cos, deg_sin};
use crate::geodesy::ellipsoid::Ellipsoid;
use crate::geodesy::{DEG_PRECISION, MAX_ITERATIONS};
use crate::point::{Cartesian, Geographic};

/// Closed-form conversion from geographic to cartesian coordinates.
///
/// `n` is the second (East-West) principal radius of curvature.
pub fn geographic_to_cartesian(geo: Geographic, ellipsoid: Ellipsoid) -> Cartesian {
    let ee = ellipsoid.e2();
    let n = ellipsoid.a / (1.0 - ee * deg_sin(geo.phi).powi(2)).sqrt();

    let x = (n + geo.h) * deg_cos(geo.phi) * deg_cos(geo.lambda);
    let y = (n + geo.h) * deg_cos(geo.phi) * deg_sin(geo.lambda);
    let z = (n * (1.0 - ee) + geo.h) * deg_sin(geo.phi);

    Cartesian::new(x, y, z)
}

/// Inverse conversion; the latitude has no closed form and is solved by
/// fixed-point iteration from phi = 0.
pub fn cartesian_to_geographic(
    c: Cartesian,
    ellipsoid: Ellipsoid,
) -> Result<Geographic, TransformError> {
    let ee = ellipsoid.e2();
    let rho = (c.x * c.x + c.y * c.y).sqrt();

    let mut phi = 0.0;
    let mut n = ellipsoid.a;
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let previous = phi;
        n = ellipsoid.a / (1.0 - ee * deg_sin(phi).powi(2)).sqrt();
        phi = deg_atan(c.z / rho + n * ee * (deg_sin(phi) / rho));
        if (phi - previous).abs() <= DEG_PRECISION {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(TransformError::NotConverged(MAX_ITERATIONS));
    }

    let lambda = deg_atan(c.y / c.x);
    let h = rho * deg_cos(phi) + c.z * deg_sin(phi) - n * (1.0 - ee * deg_sin(phi).powi(2));

    Ok(Geographic::new(phi, lambda, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::ellipsoid::{BESSEL_1841, GRS80};
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_on_prime_meridian() {
        let c = geographic_to_cartesian(Geographic::on_ellipsoid(0.0, 0.0), GRS80);
        assert_relative_eq!(c.x, GRS80.a, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip_grs80() {
        for &(phi, lambda, h) in &[
            (52.155, 5.387, 43.25),
            (53.41, 6.77, 0.0),
            (50.79, 5.77, 245.9),
            (51.0, 3.2, -10.0),
        ] {
            let geo = Geographic::new(phi, lambda, h);
            let back = cartesian_to_geographic(geographic_to_cartesian(geo, GRS80), GRS80).unwrap();
            assert_relative_eq!(back.phi, phi, epsilon = 1e-9);
            assert_relative_eq!(back.lambda, lambda, epsilon = 1e-9);
            assert_relative_eq!(back.h, h, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_bessel() {
        let geo = Geographic::new(52.156160556, 5.387638889, 0.0);
        let back =
            cartesian_to_geographic(geographic_to_cartesian(geo, BESSEL_1841), BESSEL_1841)
                .unwrap();
        assert_relative_eq!(back.phi, geo.phi, epsilon = 1e-9);
        assert_relative_eq!(back.lambda, geo.lambda, epsilon = 1e-9);
        assert_relative_eq!(back.h, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_height_moves_point_radially() {
        let low = geographic_to_cartesian(Geographic::new(52.0, 5.0, 0.0), GRS80);
        let high = geographic_to_cartesian(Geographic::new(52.0, 5.0, 100.0), GRS80);
        let d = ((high.x - low.x).powi(2) + (high.y - low.y).powi(2) + (high.z - low.z).powi(2))
            .sqrt();
        assert_relative_eq!(d, 100.0, epsilon = 1e-6);
    }
}
