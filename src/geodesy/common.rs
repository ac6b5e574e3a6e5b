//! Trigonometric helpers for angles in degrees.
//!
//! The Dutch geodetic formulas are published with angles in decimal
//! degrees; these helpers convert at the boundary so the formulas keep
//! their published shape.

use std::f64::consts::PI;

/// Sine of an angle in degrees.
pub fn deg_sin(alpha: f64) -> f64 {
    (alpha / 180.0 * PI).sin()
}

/// Cosine of an angle in degrees.
pub fn deg_cos(alpha: f64) -> f64 {
    (alpha / 180.0 * PI).cos()
}

/// Tangent of an angle in degrees.
pub fn deg_tan(alpha: f64) -> f64 {
    (alpha / 180.0 * PI).tan()
}

/// Inverse sine, in degrees.
pub fn deg_asin(a: f64) -> f64 {
    a.asin() * 180.0 / PI
}

/// Inverse tangent, in degrees.
pub fn deg_atan(a: f64) -> f64 {
    a.atan() * 180.0 / PI
}

/// Inverse hyperbolic tangent, written out so the isometric-latitude
/// formulas keep their published shape.
pub fn atanh(a: f64) -> f64 {
    0.5 * ((1.0 + a) / (1.0 - a)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_sin_cos_tan() {
        assert_relative_eq!(deg_sin(30.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(deg_cos(60.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(deg_tan(45.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(deg_sin(90.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deg_inverses() {
        assert_relative_eq!(deg_asin(1.0), 90.0, epsilon = 1e-12);
        assert_relative_eq!(deg_atan(1.0), 45.0, epsilon = 1e-12);
        assert_relative_eq!(deg_asin(deg_sin(52.15)), 52.15, epsilon = 1e-12);
    }

    #[test]
    fn test_atanh_matches_std() {
        for &a in &[-0.9, -0.5, 0.0, 0.1, 0.0816, 0.75] {
            assert_relative_eq!(atanh(a), f64::atanh(a), epsilon = 1e-15);
        }
    }
}
