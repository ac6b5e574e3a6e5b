//! Sexagesimal (degrees/minutes/seconds) angles.

/// An angle in degrees, minutes and seconds.
///
/// The sign of the angle is carried by the degrees field; minutes and
/// seconds are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Angle {
    pub const fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// The angle in decimal degrees.
    pub fn to_decimal(self) -> f64 {
        let magnitude = self.degrees.abs() + self.minutes / 60.0 + self.seconds / 3600.0;
        if self.degrees.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Split a decimal angle into degrees, minutes and seconds.
    pub fn from_decimal(decimal: f64) -> Self {
        let magnitude = decimal.abs();
        let degrees = magnitude.floor();
        let fractional_minutes = (magnitude - degrees) * 60.0;
        let minutes = fractional_minutes.floor();
        let seconds = (fractional_minutes - minutes) * 60.0;
        Self {
            degrees: degrees.copysign(decimal),
            minutes,
            seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_amersfoort_latitude() {
        // 52 deg 9' 22.178" is the Bessel latitude of Amersfoort.
        let angle = Angle::new(52.0, 9.0, 22.178);
        assert_relative_eq!(
            angle.to_decimal(),
            52.0 + 9.0 / 60.0 + 22.178 / 3600.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_roundtrip() {
        for &decimal in &[5.387638889, 52.156160556, 0.25, 179.999] {
            let angle = Angle::from_decimal(decimal);
            assert_relative_eq!(angle.to_decimal(), decimal, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_negative_angle() {
        let angle = Angle::from_decimal(-3.5);
        assert_relative_eq!(angle.degrees, -3.0);
        assert_relative_eq!(angle.minutes, 30.0);
        assert_relative_eq!(angle.to_decimal(), -3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_fraction_of_a_degree() {
        // Sign survives even when the whole-degree part is zero.
        let angle = Angle::from_decimal(-0.5);
        assert_relative_eq!(angle.to_decimal(), -0.5, epsilon = 1e-12);
    }
}
