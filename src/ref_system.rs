use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{DPI, HOURS_TO_DEG, MJD, MJD1900_J2000, RADEG};
use crate::coordinates::Equatorial;

/// Reference epoch of an equatorial frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RefEpoch {
    /// Mean equator and equinox of J2000.0
    J2000,
    /// Mean equator and equinox of the given date (1900-based day count)
    OfDate(MJD),
}

impl RefEpoch {
    pub fn date(&self) -> MJD {
        match *self {
            RefEpoch::J2000 => MJD1900_J2000,
            RefEpoch::OfDate(d) => d,
        }
    }
}

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix is an **active rotation** of a vector by `alpha` in the direct
/// (counter-clockwise) sense, so that the rotated vector is `x' = R · x`.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians
/// * `axis`: the rotation axis
///
/// Return
/// ------
/// * An orthonormal matrix, `R.transpose()` is its inverse.
///
/// See also
/// --------
/// * [`crate::earth_orientation::PrecessionMatrices`] – chains three of these rotations
pub fn rotmt(alpha: f64, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit vector pointing at an equatorial position.
pub fn radec_to_unit_vector(eq: &Equatorial) -> Vector3<f64> {
    let (sin_ra, cos_ra) = eq.ra_radians().sin_cos();
    let (sin_dec, cos_dec) = eq.dec_radians().sin_cos();
    Vector3::new(cos_ra * cos_dec, sin_ra * cos_dec, sin_dec)
}

/// Convert a direction vector back into right ascension and declination.
///
/// The vector does not need to be normalised. A zero vector maps to `(0h, 0°)` and a vector
/// along the polar axis keeps a right ascension of 0h.
///
/// See also
/// --------
/// * [`radec_to_unit_vector`] – the inverse conversion
pub fn unit_vector_to_radec(v: &Vector3<f64>) -> Equatorial {
    let norm = v.norm();
    if norm == 0. {
        return Equatorial::new(0.0, 0.0);
    }

    let delta = (v.z / norm).clamp(-1.0, 1.0).asin();

    let cos_delta = delta.cos();
    if cos_delta == 0.0 {
        return Equatorial::new(0.0, delta / RADEG);
    }

    let alpha = v.y.atan2(v.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    Equatorial::new(alpha / RADEG / HOURS_TO_DEG, delta / RADEG)
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotmt() {
        let r = rotmt(FRAC_PI_2, Axis::Z);
        let v = r * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);

        let r = rotmt(FRAC_PI_2, Axis::X);
        let v = r * Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);

        let r = rotmt(0.3, Axis::Y);
        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_unit_vector_round_trip() {
        for (ra, dec) in [(0.0, 0.0), (5.5, 22.0), (18.25, -60.5), (23.99, 89.0)] {
            let eq = Equatorial::new(ra, dec);
            let back = unit_vector_to_radec(&radec_to_unit_vector(&eq));
            assert_relative_eq!(back.ra, ra, epsilon = 1e-12);
            assert_relative_eq!(back.dec, dec, epsilon = 1e-12);
        }

        let pole = unit_vector_to_radec(&Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(pole.ra, 0.0);
        assert_relative_eq!(pole.dec, 90.0);

        let zero = unit_vector_to_radec(&Vector3::zeros());
        assert_eq!((zero.ra, zero.dec), (0.0, 0.0));
    }

    #[test]
    fn test_ref_epoch() {
        assert_eq!(RefEpoch::J2000.date(), 36525.0);
        assert_eq!(RefEpoch::OfDate(45197.5).date(), 45197.5);
    }
}
