//! Geocentric apparent position of the Sun.
//!
//! The theory uses the mean elements of the Earth's orbit as polynomials in Julian centuries
//! since 1900.0, a Kepler solution for the equation of the centre, and the main periodic
//! perturbations by Venus, Mars, Jupiter and the Moon. Accuracy is about 0.01°.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bodies::{centuries_since_1900, turn_deg};
use crate::constants::{AstronomicalUnit, Degree, Hours, Radian, MJD, RADEG};
use crate::coordinates::{ecliptic_to_equatorial, normalize_radians, Ecliptic, Position};
use crate::earth_orientation::EarthOrientation;
use crate::ephem_errors::EphemError;
use crate::kepler::{solve_anomaly, AnomalySolution};
use crate::params::EphemerisParams;

/// Constant of annual aberration applied to the longitude, in degrees.
const ABERRATION: Degree = 5.69e-3;

/// Result of a Sun computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunState {
    /// Apparent ecliptic (latitude 0) and equatorial place
    pub position: Position,
    /// Geometric true longitude, in radians
    pub true_longitude: Radian,
    /// Earth-Sun distance
    pub radius_vector: AstronomicalUnit,
    /// Mean anomaly of the Sun, in radians
    pub mean_anomaly: Radian,
    pub anomaly: AnomalySolution,
}

/// Compute the apparent position of the Sun.
///
/// Arguments
/// ---------
/// * `mjd`: day count (1900 epoch) of the date at 0h UT
/// * `ut`: universal time of day in hours
/// * `orientation`: nutation and obliquity of the date
/// * `params`: Kepler solver settings
///
/// Return
/// ------
/// * The apparent ecliptic longitude (nutation and aberration applied), the equatorial place
///   for the true obliquity of the date and the radius vector.
pub fn sun_position(
    mjd: MJD,
    ut: Hours,
    orientation: &EarthOrientation,
    params: &EphemerisParams,
) -> Result<SunState, EphemError> {
    let t = centuries_since_1900(mjd, ut);
    let t2 = t * t;

    let l = 2.7969668e2 + 3.025e-4 * t2 + turn_deg(1.000021359e2 * t);
    let m = 3.5847583e2 - (1.5e-4 + 3.3e-6 * t) * t2 + turn_deg(9.999736042e1 * t);
    let e = 1.675104e-2 - 4.18e-5 * t - 1.26e-7 * t2;

    let anomaly = solve_anomaly(m, e, params.kepler_tolerance, params.kepler_max_iter)?;

    // Venus, Mars, Jupiter, Moon and the long-period term
    let a1 = (1.5323e2 + turn_deg(6.255209472e1 * t)) * RADEG;
    let b1 = (2.1657e2 + turn_deg(1.251041894e2 * t)) * RADEG;
    let c1 = (3.1269e2 + turn_deg(9.156766028e1 * t)) * RADEG;
    let d1 = (3.5074e2 + 1.44e-3 * t2 + turn_deg(1.236853095e3 * t)) * RADEG;
    let e1 = (2.3119e2 + 2.02e1 * t) * RADEG;
    let h1 = (3.534e2 + turn_deg(1.831353208e2 * t)) * RADEG;

    let d2 = 1.34e-3 * a1.cos()
        + 1.54e-3 * b1.cos()
        + 2e-3 * c1.cos()
        + 1.79e-3 * d1.sin()
        + 1.78e-3 * e1.sin();
    let d3 = 5.43e-6 * a1.sin()
        + 1.575e-5 * b1.sin()
        + 1.627e-5 * c1.sin()
        + 3.076e-5 * d1.cos()
        + 9.27e-6 * h1.sin();

    let true_longitude = normalize_radians(anomaly.true_anomaly + (l - m + d2) * RADEG);
    let radius_vector = 1.0000002 * (1.0 - e * anomaly.eccentric_anomaly.cos()) + d3;

    let apparent = true_longitude / RADEG + orientation.nutation.longitude - ABERRATION;
    let ecliptic = Ecliptic::new(apparent, 0.0);
    let equatorial = ecliptic_to_equatorial(&ecliptic, orientation.obliquity);

    debug!(
        "sun at mjd1900 {mjd} + {ut}h: lon = {:.5}°, R = {radius_vector:.6} AU",
        ecliptic.longitude
    );

    Ok(SunState {
        position: Position::from_ecliptic(ecliptic, equatorial),
        true_longitude,
        radius_vector,
        mean_anomaly: m * RADEG,
        anomaly,
    })
}

#[cfg(test)]
mod sun_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sun_at(mjd: MJD, ut: Hours) -> SunState {
        sun_position(mjd, ut, &EarthOrientation::at(mjd), &EphemerisParams::default()).unwrap()
    }

    #[test]
    fn test_sun_meeus() {
        // Meeus, example 25.a: 1992-10-13 0h, RA 13h13m31.4s, Dec -7°47'06", R = 0.99766 AU
        let sun = sun_at(33888.5, 0.0);
        assert_abs_diff_eq!(sun.position.equatorial.ra * 15.0, 198.38083, epsilon = 0.01);
        assert_abs_diff_eq!(sun.position.equatorial.dec, -7.78507, epsilon = 0.01);
        assert_abs_diff_eq!(sun.radius_vector, 0.99766, epsilon = 1e-4);

        let ecl = sun.position.ecliptic.unwrap();
        assert_abs_diff_eq!(ecl.longitude, 199.90895, epsilon = 0.01);
        assert_eq!(ecl.latitude, 0.0);
    }

    #[test]
    fn test_sun_autumn_2023() {
        let sun = sun_at(45197.5, 12.0);
        assert_abs_diff_eq!(sun.position.equatorial.ra, 12.43286, epsilon = 1e-4);
        assert_abs_diff_eq!(sun.position.equatorial.dec, -2.80664, epsilon = 1e-4);
        assert!(sun.radius_vector > 1.0 && sun.radius_vector < 1.0017);
    }

    #[test]
    fn test_sun_moves_east() {
        let before = sun_at(45197.5, 0.0).position.ecliptic.unwrap().longitude;
        let after = sun_at(45198.5, 0.0).position.ecliptic.unwrap().longitude;
        let daily = after - before;
        assert!(daily > 0.95 && daily < 1.05, "{daily}");
    }
}
