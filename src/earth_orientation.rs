//! # Earth orientation
//!
//! Low-precision nutation, obliquity of the ecliptic and precession between J2000.0 and the
//! equinox of date.
//!
//! All functions take the 1900-based day count of the civil date at 0h UT; these quantities
//! change slowly enough that the time of day is ignored.
use log::debug;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, ARCSEC_PER_DEG, DAYS_PER_CENTURY, MJD, MJD1900_J2000, RADEG};
use crate::coordinates::Equatorial;
use crate::ref_system::{radec_to_unit_vector, rotmt, unit_vector_to_radec, Axis, RefEpoch};

/// `360 * frac(rate * t)`: the revolutions part of a fundamental argument, in degrees.
fn revolutions(rate: f64, t: f64) -> Degree {
    let a = rate * t;
    360.0 * (a - a.floor())
}

/// Nutation in longitude (Δψ) and in obliquity (Δε).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutation {
    /// Δψ in degrees
    pub longitude: Degree,
    /// Δε in degrees
    pub obliquity: Degree,
}

/// Compute the nutation angles with a truncated series of the main periodic terms.
///
/// Arguments
/// ---------
/// * `mjd`: day count (1900 epoch) of the date
///
/// Return
/// ------
/// * The nutation in longitude and in obliquity, in degrees.
///
/// Description
/// -----------
/// The series uses five fundamental arguments, all polynomials in Julian centuries since
/// 1900.0: the Sun's mean longitude, the Moon's mean longitude, the mean anomalies of the
/// Sun and of the Moon and the longitude of the Moon's ascending node. Terms are summed in
/// arcseconds and converted to degrees. Accuracy is about 0.01".
pub fn nutation(mjd: MJD) -> Nutation {
    let t = mjd / DAYS_PER_CENTURY;
    let t2 = t * t;

    let l2 = 2.0 * (2.796967e2 + 3.03e-4 * t2 + revolutions(1.000021358e2, t)) * RADEG;
    let d2 = 2.0 * (2.704342e2 - 1.133e-3 * t2 + revolutions(1.336855231e3, t)) * RADEG;
    let m1 = (3.584758e2 - 1.5e-4 * t2 + revolutions(9.999736056e1, t)) * RADEG;
    let m2 = (2.961046e2 + 9.192e-3 * t2 + revolutions(1.325552359e3, t)) * RADEG;
    let n1 = (2.591833e2 + 2.078e-3 * t2 - revolutions(5.372616667, t)) * RADEG;
    let n2 = 2.0 * n1;

    let dp = (-17.2327 - 1.737e-2 * t) * n1.sin()
        + (-1.2729 - 1.3e-4 * t) * l2.sin()
        + 2.088e-1 * n2.sin()
        - 2.037e-1 * d2.sin()
        + (1.261e-1 - 3.1e-4 * t) * m1.sin()
        + 6.75e-2 * m2.sin()
        - (4.97e-2 - 1.2e-4 * t) * (l2 + m1).sin()
        - 3.42e-2 * (d2 - n1).sin()
        - 2.61e-2 * (d2 + m2).sin()
        + 2.14e-2 * (l2 - m1).sin()
        - 1.49e-2 * (l2 - d2 + m2).sin()
        + 1.24e-2 * (l2 - n1).sin()
        + 1.14e-2 * (d2 - m2).sin();

    let de = (9.21 + 9.1e-4 * t) * n1.cos()
        + (5.522e-1 - 2.9e-4 * t) * l2.cos()
        - 9.04e-2 * n2.cos()
        + 8.84e-2 * d2.cos()
        + 2.16e-2 * (l2 + m1).cos()
        + 1.83e-2 * (d2 - n1).cos()
        + 1.13e-2 * (d2 + m2).cos()
        + 9.3e-3 * (l2 - m1).cos()
        - 6.6e-3 * (l2 - n1).cos();

    Nutation {
        longitude: dp / ARCSEC_PER_DEG,
        obliquity: de / ARCSEC_PER_DEG,
    }
}

/// Mean obliquity of the ecliptic (IAU 1976 polynomial), in degrees.
///
/// ```text
/// ε₀ = 23.43929167° − (46.815″·T + 0.0006″·T² − 0.00181″·T³)
/// ```
/// with `T` in Julian centuries since J2000.0.
pub fn mean_obliquity(mjd: MJD) -> Degree {
    let t = (mjd - MJD1900_J2000) / DAYS_PER_CENTURY;
    23.43929167 - (46.815 + (0.0006 - 0.00181 * t) * t) * t / ARCSEC_PER_DEG
}

/// Nutation and obliquity for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarthOrientation {
    pub nutation: Nutation,
    /// Mean obliquity in degrees
    pub mean_obliquity: Degree,
    /// True obliquity (mean obliquity plus nutation in obliquity) in degrees
    pub obliquity: Degree,
}

impl EarthOrientation {
    pub fn at(mjd: MJD) -> Self {
        let nutation = nutation(mjd);
        let mean_obliquity = mean_obliquity(mjd);
        debug!(
            "earth orientation at mjd1900 {mjd}: dpsi = {:.6}°, deps = {:.6}°, eps = {:.6}°",
            nutation.longitude,
            nutation.obliquity,
            mean_obliquity + nutation.obliquity
        );
        EarthOrientation {
            nutation,
            mean_obliquity,
            obliquity: mean_obliquity + nutation.obliquity,
        }
    }
}

/// Precession rotations between the mean equator and equinox of J2000.0 and of a date.
///
/// The equatorial precession angles ζ, z and θ (IAU 1976, in degrees per Julian century
/// since J2000.0) are combined as
///
/// ```text
/// P = R_z(z) · R_y(−θ) · R_z(ζ)
/// ```
/// with [`rotmt`] active rotations, so that `x_date = P · x_J2000`. The inverse matrix is the
/// transpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionMatrices {
    /// J2000.0 → date
    pub from_j2000: Matrix3<f64>,
    /// date → J2000.0
    pub to_j2000: Matrix3<f64>,
    /// The date the matrices were built for
    pub epoch: MJD,
}

impl PrecessionMatrices {
    pub fn at(mjd: MJD) -> Self {
        let t = (mjd - MJD1900_J2000) / DAYS_PER_CENTURY;

        let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
        let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
        let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

        let from_j2000 = rotmt(z, Axis::Z) * rotmt(-theta, Axis::Y) * rotmt(zeta, Axis::Z);
        debug!("precession matrices rebuilt for mjd1900 {mjd}");

        PrecessionMatrices {
            from_j2000,
            to_j2000: from_j2000.transpose(),
            epoch: mjd,
        }
    }

    /// Rotation matrix taking a direction from the frame of `from` to the frame of `to`.
    ///
    /// Only J2000.0 and the epoch these matrices were built for are available; any other
    /// [`RefEpoch::OfDate`] is rebuilt on the fly.
    pub fn rotation(&self, from: RefEpoch, to: RefEpoch) -> Matrix3<f64> {
        let to_j2000 = match from {
            RefEpoch::J2000 => Matrix3::identity(),
            RefEpoch::OfDate(d) if d == self.epoch => self.to_j2000,
            RefEpoch::OfDate(d) => PrecessionMatrices::at(d).to_j2000,
        };
        let from_j2000 = match to {
            RefEpoch::J2000 => Matrix3::identity(),
            RefEpoch::OfDate(d) if d == self.epoch => self.from_j2000,
            RefEpoch::OfDate(d) => PrecessionMatrices::at(d).from_j2000,
        };
        from_j2000 * to_j2000
    }

    /// Precess a J2000.0 position to the equinox of date.
    pub fn precess_from_j2000(&self, eq: &Equatorial) -> Equatorial {
        unit_vector_to_radec(&(self.from_j2000 * radec_to_unit_vector(eq)))
    }

    /// Precess a position referred to the equinox of date back to J2000.0.
    pub fn precess_to_j2000(&self, eq: &Equatorial) -> Equatorial {
        unit_vector_to_radec(&(self.to_j2000 * radec_to_unit_vector(eq)))
    }
}
