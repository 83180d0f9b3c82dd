//! Mean orbital elements of the planets, as polynomials in Julian centuries since 1900.0.
use serde::{Deserialize, Serialize};

use crate::bodies::{turn_deg, Planet};
use crate::constants::{ArcSec, AstronomicalUnit, Degree, DAYS_PER_CENTURY};
use crate::coordinates::normalize_degrees;

/// Mean daily motion in degrees per day of one revolution per century.
const DEG_PER_DAY_PER_CENTURY_REV: f64 = 9.856263e-3;

/// Polynomial coefficients `[a0, a1, a2, a3]` of one planet's elements.
///
/// The mean longitude is `a0 + 360·frac(a1·T) + a2·T² + a3·T³` (`a1` in revolutions per
/// century); the other angular elements and the eccentricity are plain cubics in `T`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ElementPolynomials {
    mean_longitude: [f64; 4],
    perihelion_longitude: [f64; 4],
    eccentricity: [f64; 4],
    inclination: [f64; 4],
    node_longitude: [f64; 4],
    semi_major_axis: AstronomicalUnit,
    angular_diameter: ArcSec,
    magnitude: f64,
}

const ELEMENT_POLYNOMIALS: [ElementPolynomials; 7] = [
    // Mercury
    ElementPolynomials {
        mean_longitude: [178.179078, 415.2057519, 3.011e-4, 0.0],
        perihelion_longitude: [75.899697, 1.5554889, 2.947e-4, 0.0],
        eccentricity: [2.0561421e-1, 2.046e-5, -3e-8, 0.0],
        inclination: [7.002881, 1.8608e-3, -1.83e-5, 0.0],
        node_longitude: [47.145944, 1.1852083, 1.739e-4, 0.0],
        semi_major_axis: 3.870986e-1,
        angular_diameter: 6.74,
        magnitude: -0.42,
    },
    // Venus
    ElementPolynomials {
        mean_longitude: [342.767053, 162.5533664, 3.097e-4, 0.0],
        perihelion_longitude: [130.163833, 1.4080361, -9.764e-4, 0.0],
        eccentricity: [6.82069e-3, -4.774e-5, 9.1e-8, 0.0],
        inclination: [3.393631, 1.0058e-3, -1.0e-6, 0.0],
        node_longitude: [75.779647, 8.9985e-1, 4.1e-4, 0.0],
        semi_major_axis: 7.233316e-1,
        angular_diameter: 16.92,
        magnitude: -4.4,
    },
    // Mars
    ElementPolynomials {
        mean_longitude: [293.737334, 53.17137642, 3.107e-4, 0.0],
        perihelion_longitude: [3.34218203e2, 1.8407584, 1.299e-4, -1.19e-6],
        eccentricity: [9.33129e-2, 9.2064e-5, -7.7e-8, 0.0],
        inclination: [1.850333, -6.75e-4, 1.26e-5, 0.0],
        node_longitude: [48.786442, 7.709917e-1, -1.4e-6, -5.33e-6],
        semi_major_axis: 1.5236883,
        angular_diameter: 9.36,
        magnitude: -1.52,
    },
    // Jupiter
    ElementPolynomials {
        mean_longitude: [238.049257, 8.434172183, 3.347e-4, -1.65e-6],
        perihelion_longitude: [1.2720972e1, 1.6099617, 1.05627e-3, -3.43e-6],
        eccentricity: [4.833475e-2, 1.6418e-4, -4.676e-7, -1.7e-9],
        inclination: [1.308736, -5.6961e-3, 3.9e-6, 0.0],
        node_longitude: [99.443414, 1.01053, 3.5222e-4, -8.51e-6],
        semi_major_axis: 5.202561,
        angular_diameter: 196.74,
        magnitude: -9.4,
    },
    // Saturn
    ElementPolynomials {
        mean_longitude: [266.564377, 3.398638567, 3.245e-4, -5.8e-6],
        perihelion_longitude: [9.1098214e1, 1.9584158, 8.2636e-4, 4.61e-6],
        eccentricity: [5.589232e-2, -3.455e-4, -7.28e-7, 7.4e-10],
        inclination: [2.492519, -3.9189e-3, -1.549e-5, 4.0e-8],
        node_longitude: [112.790414, 8.731951e-1, -1.5218e-4, -5.31e-6],
        semi_major_axis: 9.554747,
        angular_diameter: 165.6,
        magnitude: -8.88,
    },
    // Uranus
    ElementPolynomials {
        mean_longitude: [244.19747, 1.194065406, 3.16e-4, -6.0e-7],
        perihelion_longitude: [1.71548692e2, 1.4844328, 2.372e-4, -6.1e-7],
        eccentricity: [4.63444e-2, -2.658e-5, 7.7e-8, 0.0],
        inclination: [7.72464e-1, 6.253e-4, 3.95e-5, 0.0],
        node_longitude: [73.477111, 4.986678e-1, 1.3117e-3, 0.0],
        semi_major_axis: 19.21814,
        angular_diameter: 65.8,
        magnitude: -7.19,
    },
    // Neptune
    ElementPolynomials {
        mean_longitude: [84.457994, 6.107942056e-1, 3.205e-4, -6.0e-7],
        perihelion_longitude: [4.6727364e1, 1.4245744, 3.9082e-4, -6.05e-7],
        eccentricity: [8.99704e-3, 6.33e-6, -2.0e-9, 0.0],
        inclination: [1.779242, -9.5436e-3, -9.1e-6, 0.0],
        node_longitude: [130.681389, 1.098935, 2.4987e-4, -4.718e-6],
        semi_major_axis: 30.10957,
        angular_diameter: 62.2,
        magnitude: -6.87,
    },
];

fn cubic(c: &[f64; 4], t: f64) -> f64 {
    ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
}

/// Mean elements of one planet at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetElements {
    /// Mean longitude, [0, 360)
    pub mean_longitude: Degree,
    /// Mean daily motion, degrees per day
    pub daily_motion: Degree,
    /// Longitude of perihelion
    pub perihelion_longitude: Degree,
    pub eccentricity: f64,
    pub inclination: Degree,
    /// Longitude of the ascending node
    pub node_longitude: Degree,
    pub semi_major_axis: AstronomicalUnit,
    /// Angular diameter at 1 AU
    pub angular_diameter: ArcSec,
    /// Magnitude at 1 AU
    pub magnitude: f64,
}

impl PlanetElements {
    /// Element by its historical column number, 1 (mean longitude) to 9 (magnitude).
    pub fn column(&self, j: usize) -> Option<f64> {
        match j {
            1 => Some(self.mean_longitude),
            2 => Some(self.daily_motion),
            3 => Some(self.perihelion_longitude),
            4 => Some(self.eccentricity),
            5 => Some(self.inclination),
            6 => Some(self.node_longitude),
            7 => Some(self.semi_major_axis),
            8 => Some(self.angular_diameter),
            9 => Some(self.magnitude),
            _ => None,
        }
    }

    /// Mean anomaly in degrees, `light_time` days before the table epoch.
    pub fn mean_anomaly(&self, light_time: f64) -> Degree {
        self.mean_longitude - self.perihelion_longitude - light_time * self.daily_motion
    }
}

/// The elements of all seven planets evaluated at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementTable {
    /// Julian centuries since 1900.0
    pub centuries: f64,
    planets: [PlanetElements; 7],
}

impl ElementTable {
    /// Evaluate the element polynomials at `t` Julian centuries since 1900.0.
    pub fn at(t: f64) -> Self {
        let planets = ELEMENT_POLYNOMIALS.map(|p| {
            let [a0, a1, a2, a3] = p.mean_longitude;
            PlanetElements {
                mean_longitude: normalize_degrees(a0 + turn_deg(a1 * t) + (a3 * t + a2) * t * t),
                daily_motion: a1 * DEG_PER_DAY_PER_CENTURY_REV + (a2 + a3) / DAYS_PER_CENTURY,
                perihelion_longitude: cubic(&p.perihelion_longitude, t),
                eccentricity: cubic(&p.eccentricity, t),
                inclination: cubic(&p.inclination, t),
                node_longitude: cubic(&p.node_longitude, t),
                semi_major_axis: p.semi_major_axis,
                angular_diameter: p.angular_diameter,
                magnitude: p.magnitude,
            }
        });
        ElementTable {
            centuries: t,
            planets,
        }
    }

    pub fn get(&self, planet: Planet) -> &PlanetElements {
        &self.planets[planet.index()]
    }

    /// Table entry for planet `i` (1..=7) and column `j` (1..=9).
    pub fn element(&self, i: u8, j: usize) -> Option<f64> {
        let planet = Planet::try_from(i).ok()?;
        self.get(planet).column(j)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Planet, &PlanetElements)> {
        Planet::ALL.into_iter().zip(self.planets.iter())
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_at_epoch() {
        let table = ElementTable::at(0.0);
        let mercury = table.get(Planet::Mercury);
        assert_eq!(mercury.mean_longitude, 178.179078);
        assert_eq!(mercury.eccentricity, 2.0561421e-1);
        assert_abs_diff_eq!(mercury.daily_motion, 4.0923, epsilon = 1e-4);
        assert_eq!(table.element(7, 7), Some(30.10957));
        assert_eq!(table.element(5, 9), Some(-8.88));
        assert_eq!(table.element(0, 1), None);
        assert_eq!(table.element(1, 10), None);
    }

    #[test]
    fn test_table_in_2023() {
        let table = ElementTable::at(1.2374537987679672);
        for (planet, el) in table.iter() {
            assert!((0.0..360.0).contains(&el.mean_longitude), "{planet}");
            assert!(el.eccentricity > 0.0 && el.eccentricity < 0.25, "{planet}");
            assert!(el.daily_motion > 0.0, "{planet}");
        }
        // Mars moves about 0.524° a day
        assert_abs_diff_eq!(table.get(Planet::Mars).daily_motion, 0.524, epsilon = 1e-3);
    }

    #[test]
    fn test_mean_anomaly_light_time() {
        let table = ElementTable::at(1.0);
        let venus = table.get(Planet::Venus);
        let m0 = venus.mean_anomaly(0.0);
        let m1 = venus.mean_anomaly(0.01);
        assert_abs_diff_eq!(m0 - m1, 0.01 * venus.daily_motion, epsilon = 1e-12);
    }
}
