//! Geocentric apparent position and horizontal parallax of the Moon.
//!
//! A reduced lunar theory: mean arguments with the main long-period corrections, then three
//! periodic series for the longitude, the latitude and the equatorial horizontal parallax.
//! The series are kept as data in [`LONGITUDE_TERMS`], [`LATITUDE_TERMS`] and
//! [`PARALLAX_TERMS`]. Positions are good to a few hundredths of a degree.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bodies::{centuries_since_1900, turn_deg};
use crate::constants::{Degree, Hours, Radian, MJD, RADEG};
use crate::coordinates::{ecliptic_to_equatorial, normalize_radians, Ecliptic, Position};
use crate::earth_orientation::EarthOrientation;

/// One periodic term `coefficient · E^e_power · f(D·anomaly + …)` of a lunar series.
///
/// The integer multipliers apply to the mean anomaly of the Moon, the mean elongation, the
/// mean anomaly of the Sun and the argument of latitude. `E` is the eccentricity factor of
/// the Earth's orbit, raised to the number of times the solar anomaly enters the argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarTerm {
    pub coefficient: f64,
    pub anomaly: i8,
    pub elongation: i8,
    pub sun_anomaly: i8,
    pub latitude_argument: i8,
    pub e_power: i32,
}

impl LunarTerm {
    const fn new(
        coefficient: f64,
        anomaly: i8,
        elongation: i8,
        sun_anomaly: i8,
        latitude_argument: i8,
        e_power: i32,
    ) -> Self {
        LunarTerm {
            coefficient,
            anomaly,
            elongation,
            sun_anomaly,
            latitude_argument,
            e_power,
        }
    }

    fn argument(&self, args: &MoonArguments) -> Radian {
        self.anomaly as f64 * args.anomaly
            + self.elongation as f64 * args.elongation
            + self.sun_anomaly as f64 * args.sun_anomaly
            + self.latitude_argument as f64 * args.latitude_argument
    }
}

/// Periodic terms of the longitude, in degrees (sine series).
pub const LONGITUDE_TERMS: [LunarTerm; 50] = [
    LunarTerm::new(6.28875, 1, 0, 0, 0, 0),
    LunarTerm::new(1.274018, -1, 2, 0, 0, 0),
    LunarTerm::new(0.658309, 0, 2, 0, 0, 0),
    LunarTerm::new(0.213616, 2, 0, 0, 0, 0),
    LunarTerm::new(-0.185596, 0, 0, 1, 0, 1),
    LunarTerm::new(-0.114336, 0, 0, 0, 2, 0),
    LunarTerm::new(0.058793, -2, 2, 0, 0, 0),
    LunarTerm::new(0.057212, -1, 2, -1, 0, 1),
    LunarTerm::new(0.05332, 1, 2, 0, 0, 0),
    LunarTerm::new(0.045874, 0, 2, -1, 0, 1),
    LunarTerm::new(0.041024, 1, 0, -1, 0, 1),
    LunarTerm::new(-0.034718, 0, 1, 0, 0, 0),
    LunarTerm::new(-0.030465, 1, 0, 1, 0, 1),
    LunarTerm::new(0.015326, 0, 2, 0, -2, 0),
    LunarTerm::new(-0.012528, 1, 0, 0, 2, 0),
    LunarTerm::new(-0.01098, -1, 0, 0, 2, 0),
    LunarTerm::new(0.010674, -1, 4, 0, 0, 0),
    LunarTerm::new(0.010034, 3, 0, 0, 0, 0),
    LunarTerm::new(0.008548, -2, 4, 0, 0, 0),
    LunarTerm::new(-0.00791, -1, 2, 1, 0, 1),
    LunarTerm::new(-0.006783, 0, 2, 1, 0, 1),
    LunarTerm::new(0.005162, 1, -1, 0, 0, 0),
    LunarTerm::new(0.005, 0, 1, 1, 0, 1),
    LunarTerm::new(0.003862, 0, 4, 0, 0, 0),
    LunarTerm::new(0.004049, 1, 2, -1, 0, 1),
    LunarTerm::new(0.003996, 2, 2, 0, 0, 0),
    LunarTerm::new(0.003665, -3, 2, 0, 0, 0),
    LunarTerm::new(0.002695, 2, 0, -1, 0, 1),
    LunarTerm::new(0.002602, 1, -2, 0, -2, 0),
    LunarTerm::new(0.002396, -2, 2, -1, 0, 1),
    LunarTerm::new(-0.002349, 1, 1, 0, 0, 0),
    LunarTerm::new(0.002249, 0, 2, -2, 0, 2),
    LunarTerm::new(-0.002125, 2, 0, 1, 0, 1),
    LunarTerm::new(-0.002079, 0, 0, 2, 0, 2),
    LunarTerm::new(0.002059, -1, 2, -2, 0, 2),
    LunarTerm::new(-0.001773, 1, 2, 0, -2, 0),
    LunarTerm::new(-0.001595, 0, 2, 0, 2, 0),
    LunarTerm::new(0.00122, -1, 4, -1, 0, 1),
    LunarTerm::new(-0.00111, 2, 0, 0, 2, 0),
    LunarTerm::new(0.000892, 1, -3, 0, 0, 0),
    LunarTerm::new(-0.000811, 1, 2, 1, 0, 1),
    LunarTerm::new(0.000761, -2, 4, -1, 0, 1),
    LunarTerm::new(0.000704, 1, -2, -2, 0, 2),
    LunarTerm::new(0.000693, -2, 2, 1, 0, 1),
    LunarTerm::new(0.000598, 0, 2, -1, -2, 1),
    LunarTerm::new(0.00055, 1, 4, 0, 0, 0),
    LunarTerm::new(0.000538, 4, 0, 0, 0, 0),
    LunarTerm::new(0.000521, 0, 4, -1, 0, 1),
    LunarTerm::new(0.000486, 2, -1, 0, 0, 0),
    LunarTerm::new(0.000717, 1, 0, -2, 0, 2),
];

/// Periodic terms of the latitude, in degrees (sine series).
pub const LATITUDE_TERMS: [LunarTerm; 45] = [
    LunarTerm::new(5.128189, 0, 0, 0, 1, 0),
    LunarTerm::new(0.280606, 1, 0, 0, 1, 0),
    LunarTerm::new(0.277693, 1, 0, 0, -1, 0),
    LunarTerm::new(0.173238, 0, 2, 0, -1, 0),
    LunarTerm::new(0.055413, -1, 2, 0, 1, 0),
    LunarTerm::new(0.046272, -1, 2, 0, -1, 0),
    LunarTerm::new(0.032573, 0, 2, 0, 1, 0),
    LunarTerm::new(0.017198, 2, 0, 0, 1, 0),
    LunarTerm::new(0.009267, 1, 2, 0, -1, 0),
    LunarTerm::new(0.008823, 2, 0, 0, -1, 0),
    LunarTerm::new(0.008247, 0, 2, -1, -1, 1),
    LunarTerm::new(0.004323, -2, 2, 0, -1, 0),
    LunarTerm::new(0.0042, 1, 2, 0, 1, 0),
    LunarTerm::new(0.003372, 0, -2, -1, 1, 1),
    LunarTerm::new(0.002472, -1, 2, -1, 1, 1),
    LunarTerm::new(0.002222, 0, 2, -1, 1, 1),
    LunarTerm::new(0.002072, -1, 2, -1, -1, 1),
    LunarTerm::new(0.001877, 1, 0, -1, 1, 1),
    LunarTerm::new(0.001828, -1, 4, 0, -1, 0),
    LunarTerm::new(-0.001803, 0, 0, 1, 1, 1),
    LunarTerm::new(-0.00175, 0, 0, 0, 3, 0),
    LunarTerm::new(0.00157, 1, 0, -1, -1, 1),
    LunarTerm::new(-0.001487, 0, 1, 0, 1, 0),
    LunarTerm::new(-0.001481, 1, 0, 1, 1, 1),
    LunarTerm::new(0.001417, -1, 0, -1, 1, 1),
    LunarTerm::new(0.00135, 0, 0, -1, 1, 1),
    LunarTerm::new(0.00133, 0, -1, 0, 1, 0),
    LunarTerm::new(0.001106, 3, 0, 0, 1, 0),
    LunarTerm::new(0.00102, 0, 4, 0, -1, 0),
    LunarTerm::new(0.000833, -1, 4, 0, 1, 0),
    LunarTerm::new(0.000781, 1, 0, 0, -3, 0),
    LunarTerm::new(0.00067, -2, 4, 0, 1, 0),
    LunarTerm::new(0.000606, 0, 2, 0, -3, 0),
    LunarTerm::new(0.000597, 2, 2, 0, -1, 0),
    LunarTerm::new(0.000492, 1, 2, -1, -1, 1),
    LunarTerm::new(0.00045, 2, -2, 0, -1, 0),
    LunarTerm::new(0.000439, 3, 0, 0, -1, 0),
    LunarTerm::new(0.000423, 2, 2, 0, 1, 0),
    LunarTerm::new(0.000422, -3, 2, 0, -1, 0),
    LunarTerm::new(-0.000367, -1, 2, 1, 1, 1),
    LunarTerm::new(-0.000353, 0, 2, 1, 1, 1),
    LunarTerm::new(0.000331, 0, 4, 0, 1, 0),
    LunarTerm::new(0.000317, 1, 2, -1, 1, 1),
    LunarTerm::new(0.000306, 0, 2, -2, -1, 2),
    LunarTerm::new(-0.000283, 1, 0, 0, 3, 0),
];

/// Periodic terms of the horizontal parallax, in degrees (cosine series).
pub const PARALLAX_TERMS: [LunarTerm; 30] = [
    LunarTerm::new(0.051818, 1, 0, 0, 0, 0),
    LunarTerm::new(0.009531, -1, 2, 0, 0, 0),
    LunarTerm::new(0.007843, 0, 2, 0, 0, 0),
    LunarTerm::new(0.002824, 2, 0, 0, 0, 0),
    LunarTerm::new(0.000857, 1, 2, 0, 0, 0),
    LunarTerm::new(0.000533, 0, 2, -1, 0, 1),
    LunarTerm::new(0.000401, -1, 2, -1, 0, 1),
    LunarTerm::new(0.00032, 1, 0, -1, 0, 1),
    LunarTerm::new(-0.000271, 0, 1, 0, 0, 0),
    LunarTerm::new(-0.000264, 1, 0, 1, 0, 1),
    LunarTerm::new(-0.000198, -1, 0, 0, 2, 0),
    LunarTerm::new(0.000173, 3, 0, 0, 0, 0),
    LunarTerm::new(0.000167, -1, 4, 0, 0, 0),
    LunarTerm::new(-0.000111, 0, 0, 1, 0, 1),
    LunarTerm::new(0.000103, -2, 4, 0, 0, 0),
    LunarTerm::new(-8.4e-05, 2, -2, 0, 0, 0),
    LunarTerm::new(-8.3e-05, 0, 2, 1, 0, 1),
    LunarTerm::new(7.9e-05, 2, 2, 0, 0, 0),
    LunarTerm::new(7.2e-05, 0, 4, 0, 0, 0),
    LunarTerm::new(6.4e-05, 1, 2, -1, 0, 1),
    LunarTerm::new(-6.3e-05, -1, 2, 1, 0, 1),
    LunarTerm::new(4.1e-05, 0, 1, 1, 0, 1),
    LunarTerm::new(3.5e-05, 2, 0, -1, 0, 1),
    LunarTerm::new(-3.3e-05, 3, -2, 0, 0, 0),
    LunarTerm::new(-3e-05, 1, 1, 0, 0, 0),
    LunarTerm::new(-2.9e-05, 0, -2, 0, 2, 0),
    LunarTerm::new(-2.9e-05, 2, 0, 1, 0, 1),
    LunarTerm::new(2.6e-05, 0, 2, -2, 0, 2),
    LunarTerm::new(-2.3e-05, 1, -2, 0, 2, 0),
    LunarTerm::new(1.9e-05, -1, 4, -1, 0, 1),
];

/// Mean arguments of the lunar theory at one instant, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MoonArguments {
    mean_longitude: Radian,
    anomaly: Radian,
    elongation: Radian,
    sun_anomaly: Radian,
    latitude_argument: Radian,
    node: Radian,
    /// Long-period node term used in the latitude correction
    node_term: Radian,
    /// Eccentricity factor of the Earth's orbit
    e: f64,
}

impl MoonArguments {
    fn at(mjd: MJD, ut: Hours) -> Self {
        let t = centuries_since_1900(mjd, ut);
        let t2 = t * t;
        let q = mjd + ut / 24.0;

        let mut ml = 2.70434164e2 + turn_deg(q / 2.732158213e1) - (1.133e-3 - 1.9e-6 * t) * t2;
        let mut ms = 3.58475833e2 + turn_deg(q / 3.652596407e2) - (1.5e-4 + 3.3e-6 * t) * t2;
        let mut md = 2.96104608e2 + turn_deg(q / 2.755455094e1) + (9.192e-3 + 1.44e-5 * t) * t2;
        let mut me = 3.50737486e2 + turn_deg(q / 2.953058868e1) - (1.436e-3 - 1.9e-6 * t) * t2;
        let mut mf = 11.250889 + turn_deg(q / 2.721222039e1) - (3.211e-3 + 3e-7 * t) * t2;
        let na = 2.59183275e2 - turn_deg(q / 6.798363307e3) + (2.078e-3 + 2.2e-6 * t) * t2;

        let s1 = ((51.2 + 20.2 * t) * RADEG).sin();
        let s2 = (na * RADEG).sin();
        let s3 = 3.964e-3 * ((346.56 + (132.87 - 9.1731e-3 * t) * t) * RADEG).sin();
        let c = (na + 275.05 - 2.3 * t) * RADEG;
        let s4 = c.sin();

        ml += 2.33e-4 * s1 + s3 + 1.964e-3 * s2;
        ms -= 1.778e-3 * s1;
        md += 8.17e-4 * s1 + s3 + 2.541e-3 * s2;
        mf += s3 - 2.4691e-2 * s2 - 4.328e-3 * s4;
        me += 2.011e-3 * s1 + s3 + 1.964e-3 * s2;

        MoonArguments {
            mean_longitude: ml * RADEG,
            anomaly: md * RADEG,
            elongation: me * RADEG,
            sun_anomaly: ms * RADEG,
            latitude_argument: mf * RADEG,
            node: na * RADEG,
            node_term: c,
            e: 1.0 - (2.495e-3 + 7.52e-6 * t) * t,
        }
    }

    fn sine_series(&self, terms: &[LunarTerm]) -> Degree {
        terms
            .iter()
            .map(|term| term.coefficient * self.e.powi(term.e_power) * term.argument(self).sin())
            .sum()
    }

    fn cosine_series(&self, terms: &[LunarTerm]) -> Degree {
        terms
            .iter()
            .map(|term| term.coefficient * self.e.powi(term.e_power) * term.argument(self).cos())
            .sum()
    }
}

/// Result of a Moon computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonState {
    /// Apparent ecliptic place (nutation in longitude applied) and equatorial place
    pub position: Position,
    /// Geometric ecliptic longitude, in radians
    pub geometric_longitude: Radian,
    /// Ecliptic latitude, in radians
    pub latitude: Radian,
    /// Equatorial horizontal parallax, in degrees
    pub horizontal_parallax: Degree,
}

impl MoonState {
    /// Geocentric distance in Earth equatorial radii.
    pub fn distance_earth_radii(&self) -> f64 {
        1.0 / (self.horizontal_parallax * RADEG).sin()
    }
}

/// Compute the apparent position of the Moon.
///
/// Arguments
/// ---------
/// * `mjd`: day count (1900 epoch) of the date at 0h UT
/// * `ut`: universal time of day in hours
/// * `orientation`: nutation and obliquity of the date
///
/// Return
/// ------
/// * The geocentric apparent place and the equatorial horizontal parallax. The place is not
///   corrected for the observer's position, see [`crate::refraction::lunar_parallax`].
pub fn moon_position(mjd: MJD, ut: Hours, orientation: &EarthOrientation) -> MoonState {
    let args = MoonArguments::at(mjd, ut);

    let geometric_longitude =
        normalize_radians(args.mean_longitude + args.sine_series(&LONGITUDE_TERMS) * RADEG);

    let g = args.sine_series(&LATITUDE_TERMS);
    let latitude =
        g * RADEG * (1.0 - 4.664e-4 * args.node.cos() - 7.54e-5 * args.node_term.cos());

    let horizontal_parallax = 9.50724e-1 + args.cosine_series(&PARALLAX_TERMS);

    let ecliptic = Ecliptic::new(
        geometric_longitude / RADEG + orientation.nutation.longitude,
        latitude / RADEG,
    );
    let equatorial = ecliptic_to_equatorial(&ecliptic, orientation.obliquity);

    debug!(
        "moon at mjd1900 {mjd} + {ut}h: lon = {:.5}°, lat = {:.5}°, hp = {horizontal_parallax:.5}°",
        ecliptic.longitude, ecliptic.latitude
    );

    MoonState {
        position: Position::from_ecliptic(ecliptic, equatorial),
        geometric_longitude,
        latitude,
        horizontal_parallax,
    }
}

#[cfg(test)]
mod moon_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_moon_meeus() {
        // Meeus, example 47.a: 1992-04-12 0h, lambda = 133.162655°, beta = -3.229126°,
        // parallax 0.991990°, RA 134.688470°, Dec 13.768368°
        let moon = moon_position(33704.5, 0.0, &EarthOrientation::at(33704.5));
        assert_abs_diff_eq!(moon.geometric_longitude / RADEG, 133.162655, epsilon = 5e-3);
        assert_abs_diff_eq!(moon.latitude / RADEG, -3.229126, epsilon = 1e-3);
        assert_abs_diff_eq!(moon.horizontal_parallax, 0.991990, epsilon = 1e-4);
        assert_abs_diff_eq!(moon.position.equatorial.ra * 15.0, 134.688470, epsilon = 5e-3);
        assert_abs_diff_eq!(moon.position.equatorial.dec, 13.768368, epsilon = 5e-3);

        // Meeus gives a distance of 368409.7 km
        let km = moon.distance_earth_radii() * 6378.14;
        assert_abs_diff_eq!(km, 368409.7, epsilon = 50.0);
    }

    #[test]
    fn test_moon_autumn_2023() {
        let moon = moon_position(45197.5, 12.0, &EarthOrientation::at(45197.5));
        assert_abs_diff_eq!(moon.position.equatorial.ra, 1.361093, epsilon = 1e-5);
        assert_abs_diff_eq!(moon.position.equatorial.dec, 8.308750, epsilon = 1e-4);
        assert_abs_diff_eq!(moon.horizontal_parallax, 1.001120, epsilon = 1e-5);
    }

    #[test]
    fn test_series_sizes() {
        assert_eq!(LONGITUDE_TERMS[0].coefficient, 6.28875);
        assert_eq!(LATITUDE_TERMS[0].latitude_argument, 1);
        assert!(PARALLAX_TERMS
            .iter()
            .all(|t| t.e_power == t.sun_anomaly.unsigned_abs() as i32));
    }
}
