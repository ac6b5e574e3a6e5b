//! The RDNAPTRANS(TM)2008 transformation pipeline between ETRS89 and
//! the Dutch RD/NAP systems.

use crate::error::{GridError, TransformError};
use crate::geodesy::datum::{cartesian_to_geographic, geographic_to_cartesian};
use crate::geodesy::ellipsoid::{BESSEL_1841, GRS80};
use crate::geodesy::helmert::{similarity_transform, BESSEL_TO_ETRS, ETRS_TO_BESSEL};
use crate::geodesy::stereographic::{
    RdProjection, H_AMERSFOORT_BESSEL, LAMBDA_AMERSFOORT_BESSEL, PHI_AMERSFOORT_BESSEL,
};
use crate::grid::GridStore;
use crate::point::{Cartesian, Geographic};

/// Mean difference between NAP and ellipsoidal Bessel heights, used to
/// approximate the Bessel height when only a NAP height is known.
pub const MEAN_GEOID_HEIGHT_BESSEL: f64 = 0.0;

/// Offset between ellipsoidal ETRS89 heights reduced by the geoid
/// height and orthometric NAP heights, per the RDNAPTRANS(TM)2008
/// definition.
pub const NAP_HEIGHT_OFFSET: f64 = 0.0088;

/// Converts point coordinates between ETRS89, RD and NAP.
///
/// Holds the three read-only grid datasets (the x and y distortion
/// corrections in RD metres and the geoid model in ETRS89 degrees)
/// plus the precomputed projection and pivot points. A constructed
/// `Transformer` is immutable and safe to share across threads.
///
/// Points outside the grids' validity areas are still transformed; the
/// result then lacks the modelled distortion correction (or uses the
/// ellipsoidal height approximation) instead of failing.
pub struct Transformer {
    grid_dx: GridStore,
    grid_dy: GridStore,
    geoid: GridStore,
    projection: RdProjection,
    pivot_bessel: Cartesian,
    pivot_etrs: Cartesian,
}

impl Transformer {
    /// Build a transformer from three loaded grids: x correction,
    /// y correction and geoid height.
    pub fn new(grid_dx: GridStore, grid_dy: GridStore, geoid: GridStore) -> Self {
        let amersfoort = Geographic::new(
            PHI_AMERSFOORT_BESSEL,
            LAMBDA_AMERSFOORT_BESSEL,
            H_AMERSFOORT_BESSEL,
        );
        let pivot_bessel = geographic_to_cartesian(amersfoort, BESSEL_1841);
        let pivot_etrs = Cartesian::new(
            pivot_bessel.x + BESSEL_TO_ETRS.tx,
            pivot_bessel.y + BESSEL_TO_ETRS.ty,
            pivot_bessel.z + BESSEL_TO_ETRS.tz,
        );

        log::debug!(
            "transformer ready; Amersfoort pivot (Bessel) = ({:.3}, {:.3}, {:.3})",
            pivot_bessel.x,
            pivot_bessel.y,
            pivot_bessel.z
        );

        Self {
            grid_dx,
            grid_dy,
            geoid,
            projection: RdProjection::new(),
            pivot_bessel,
            pivot_etrs,
        }
    }

    /// Decode the three grid blobs and build a transformer.
    ///
    /// This is the seam for whatever supplies the grid resources; the
    /// crate itself never resolves file names or paths.
    pub fn from_bytes(
        grid_dx: &[u8],
        grid_dy: &[u8],
        geoid: &[u8],
    ) -> Result<Self, GridError> {
        Ok(Self::new(
            GridStore::load(grid_dx)?,
            GridStore::load(grid_dy)?,
            GridStore::load(geoid)?,
        ))
    }

    /// Convert ETRS89 coordinates to RD coordinates.
    ///
    /// The z of the result carries the ellipsoidal Bessel height
    /// through unchanged.
    pub fn etrs2rd(&self, etrs: Geographic) -> Result<Cartesian, TransformError> {
        ensure_finite(&[etrs.phi, etrs.lambda, etrs.h], "etrs2rd")?;

        let cartesian_etrs = geographic_to_cartesian(etrs, GRS80);
        let cartesian_bessel =
            similarity_transform(cartesian_etrs, ETRS_TO_BESSEL, self.pivot_etrs);
        let geographic_bessel = cartesian_to_geographic(cartesian_bessel, BESSEL_1841)?;

        let pseudo_rd = self.projection.forward(geographic_bessel);
        Ok(self.rd_correction(pseudo_rd).with_z(geographic_bessel.h))
    }

    /// Convert RD coordinates (z = NAP height) to ETRS89 coordinates.
    pub fn rd2etrs(&self, rd: Cartesian) -> Result<Geographic, TransformError> {
        ensure_finite(&[rd.x, rd.y, rd.z], "rd2etrs")?;

        // Approximate the ellipsoidal Bessel height from the NAP input.
        // The constant is off by up to a metre, which moves the
        // resulting position by less than 0.0001 m.
        let h_bessel = rd.z + MEAN_GEOID_HEIGHT_BESSEL;

        let pseudo_rd = self.inv_rd_correction(rd);
        let bessel = self.projection.inverse(pseudo_rd)?;
        let cartesian_bessel = geographic_to_cartesian(bessel.with_h(h_bessel), BESSEL_1841);
        let cartesian_etrs =
            similarity_transform(cartesian_bessel, BESSEL_TO_ETRS, self.pivot_bessel);

        cartesian_to_geographic(cartesian_etrs, GRS80)
    }

    /// NAP height of an ETRS89 position.
    ///
    /// `None` outside the geoid grid; callers fall back to the
    /// ellipsoidal height as an approximation.
    pub fn etrs2nap(&self, etrs: Geographic) -> Option<f64> {
        if !etrs.h.is_finite() {
            return None;
        }
        self.geoid
            .interpolate(etrs.lambda, etrs.phi)
            .map(|n| etrs.h - n + NAP_HEIGHT_OFFSET)
    }

    /// Ellipsoidal ETRS89 height from a NAP height at (phi, lambda).
    ///
    /// `None` outside the geoid grid, same fallback contract as
    /// [`Self::etrs2nap`].
    pub fn nap2etrs(&self, phi: f64, lambda: f64, nap: f64) -> Option<f64> {
        if !nap.is_finite() {
            return None;
        }
        self.geoid
            .interpolate(lambda, phi)
            .map(|n| nap + n - NAP_HEIGHT_OFFSET)
    }

    /// Convert ETRS89 coordinates to RD with a NAP height in z.
    ///
    /// Outside the geoid grid the z falls back to the ellipsoidal
    /// Bessel height produced by [`Self::etrs2rd`].
    pub fn etrs2rdnap(&self, etrs: Geographic) -> Result<Cartesian, TransformError> {
        let rd = self.etrs2rd(etrs)?;
        Ok(match self.etrs2nap(etrs) {
            Some(nap) => rd.with_z(nap),
            None => rd,
        })
    }

    /// Convert RD/NAP coordinates to ETRS89.
    ///
    /// The height is recomputed from the input NAP height at the
    /// resulting position; outside the geoid grid it falls back to the
    /// approximate height produced by [`Self::rd2etrs`].
    pub fn rdnap2etrs(&self, rdnap: Cartesian) -> Result<Geographic, TransformError> {
        let etrs = self.rd2etrs(rdnap)?;
        Ok(match self.nap2etrs(etrs.phi, etrs.lambda, rdnap.z) {
            Some(h) => etrs.with_h(h),
            None => etrs,
        })
    }

    /// Apply the modelled RD distortion to a pseudo-RD position.
    ///
    /// Outside the corrections' validity area the pseudo-RD value
    /// passes through unchanged.
    fn rd_correction(&self, pseudo: Cartesian) -> Cartesian {
        match (
            self.grid_dx.interpolate(pseudo.x, pseudo.y),
            self.grid_dy.interpolate(pseudo.x, pseudo.y),
        ) {
            (Some(dx), Some(dy)) => Cartesian::new(pseudo.x - dx, pseudo.y - dy, pseudo.z),
            _ => pseudo,
        }
    }

    /// Remove the modelled RD distortion.
    ///
    /// The grid values are formally in pseudo-RD; sampling them at the
    /// RD position introduces an error below 0.0001 m.
    fn inv_rd_correction(&self, rd: Cartesian) -> Cartesian {
        match (
            self.grid_dx.interpolate(rd.x, rd.y),
            self.grid_dy.interpolate(rd.x, rd.y),
        ) {
            (Some(dx), Some(dy)) => Cartesian::new(rd.x + dx, rd.y + dy, rd.z),
            _ => rd,
        }
    }
}

fn ensure_finite(values: &[f64], operation: &str) -> Result<(), TransformError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TransformError::NonFinite(format!(
            "{operation} requires finite input coordinates"
        )))
    }
}
