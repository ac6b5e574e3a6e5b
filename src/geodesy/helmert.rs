//! 3-D 7-parameter (Helmert) similarity transformation about an
//! arbitrary pivot point.

use crate::point::Cartesian;

/// Parameters of a similarity transform: translations in metres,
/// rotations in radians, delta the scale offset (scale = 1 + delta).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelmertParams {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
}

impl HelmertParams {
    pub const fn new(
        tx: f64,
        ty: f64,
        tz: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
        delta: f64,
    ) -> Self {
        Self {
            tx,
            ty,
            tz,
            alpha,
            beta,
            gamma,
            delta,
        }
    }
}

/// Datum transformation Bessel -> ETRS89, relative to the Amersfoort
/// pivot point. Not to be confused with parameters about the center of
/// the ellipsoid.
pub const BESSEL_TO_ETRS: HelmertParams = HelmertParams::new(
    593.0248, 25.9984, 478.7459, 1.9342e-6, -1.6677e-6, 9.1019e-6, 4.0725e-6,
);

/// Algebraic inverse of [`BESSEL_TO_ETRS`].
pub const ETRS_TO_BESSEL: HelmertParams = HelmertParams::new(
    -593.0248, -25.9984, -478.7459, -1.9342e-6, 1.6677e-6, -9.1019e-6, -4.0725e-6,
);

/// Apply the similarity transform about `pivot`:
///
/// ```text
/// output = (1 + delta) * R(alpha, beta, gamma) * (input - pivot) + t + pivot
/// ```
pub fn similarity_transform(
    input: Cartesian,
    params: HelmertParams,
    pivot: Cartesian,
) -> Cartesian {
    let HelmertParams {
        alpha,
        beta,
        gamma,
        delta,
        ..
    } = params;

    // Rotation matrix rows [a b c; d e f; g h i].
    let a = gamma.cos() * beta.cos();
    let b = gamma.cos() * beta.sin() * alpha.sin() + gamma.sin() * alpha.cos();
    let c = -gamma.cos() * beta.sin() * alpha.cos() + gamma.sin() * alpha.sin();
    let d = -gamma.sin() * beta.cos();
    let e = -gamma.sin() * beta.sin() * alpha.sin() + gamma.cos() * alpha.cos();
    let f = gamma.sin() * beta.sin() * alpha.cos() + gamma.cos() * alpha.sin();
    let g = beta.sin();
    let h = -beta.cos() * alpha.sin();
    let i = beta.cos() * alpha.cos();

    let x = input.x - pivot.x;
    let y = input.y - pivot.y;
    let z = input.z - pivot.z;

    Cartesian::new(
        (1.0 + delta) * (a * x + b * y + c * z) + params.tx + pivot.x,
        (1.0 + delta) * (d * x + e * y + f * z) + params.ty + pivot.y,
        (1.0 + delta) * (g * x + h * y + i * z) + params.tz + pivot.z,
    )
}
