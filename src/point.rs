/// A geographic position on a reference ellipsoid.
///
/// Latitude and longitude are in decimal degrees, following the Dutch
/// geodetic convention; height is ellipsoidal, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geographic {
    /// Latitude in decimal degrees.
    pub phi: f64,
    /// Longitude in decimal degrees.
    pub lambda: f64,
    /// Ellipsoidal height in metres.
    pub h: f64,
}

impl Geographic {
    pub const fn new(phi: f64, lambda: f64, h: f64) -> Self {
        Self { phi, lambda, h }
    }

    /// A position on the ellipsoid surface (h = 0).
    pub const fn on_ellipsoid(phi: f64, lambda: f64) -> Self {
        Self {
            phi,
            lambda,
            h: 0.0,
        }
    }

    /// The same position with the height replaced.
    pub fn with_h(self, h: f64) -> Self {
        Self { h, ..self }
    }
}

/// A right-handed cartesian position in metres.
///
/// Doubles as an RD planar coordinate, where `x` is the easting, `y`
/// the northing and `z` carries a height.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A planar coordinate (z = 0).
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// The same position with z replaced.
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }
}
