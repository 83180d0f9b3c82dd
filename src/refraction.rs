//! # Atmospheric refraction and lunar parallax
//!
//! Corrections applied to a computed place before it is compared with what an observer
//! actually sees:
//!
//! - [`refract`] lifts a geometric altitude to the apparent (refracted) one,
//! - [`unrefract`] removes refraction from an observed altitude,
//! - [`lunar_parallax`] moves the Moon's geocentric place to the observer's site.
//!
//! The refraction model is a two-branch fit in the true altitude `y`:
//!
//! ```text
//! y ≥ 15°      :  R = 7.888888e-5 · P / ((273 + T) · tan y)                      (radians)
//! −5° ≤ y < 15°:  R = (1.594e-1 + 1.96e-2·y + 2e-5·y²) · P
//!                     / ((273 + T) · (1 + 5.05e-1·y + 8.45e-2·y²))               (degrees, y in °)
//! y < −5°      :  R = 0
//! ```
//! with the pressure `P` in hectopascals and the temperature `T` in °C.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, Radian, HOURS_TO_DEG, INHG_TO_HPA, RADEG};
use crate::coordinates::{normalize_hours, normalize_radians, Equatorial, Horizontal};
use crate::observer::Observer;
use crate::params::EphemerisParams;

/// Lowest altitude of the tangent branch, 15° in radians.
const HIGH_ALTITUDE: Radian = 2.617994e-1;

/// Below this altitude (about −5°) no refraction is applied.
const LOWEST_ALTITUDE: Radian = -8.7e-2;

/// Air pressure and temperature at the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Pressure in hectopascals (millibars)
    pub pressure: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
}

impl Default for Atmosphere {
    /// Standard conditions: 1010 hPa and 10 °C.
    fn default() -> Self {
        Atmosphere::metric(1010.0, 10.0)
    }
}

impl Atmosphere {
    pub fn metric(pressure_hpa: f64, temperature_c: f64) -> Self {
        Atmosphere {
            pressure: pressure_hpa,
            temperature: temperature_c,
        }
    }

    /// Build from a pressure in inches of mercury and a temperature in degrees Fahrenheit.
    pub fn imperial(pressure_inhg: f64, temperature_f: f64) -> Self {
        Atmosphere::metric(
            pressure_inhg * INHG_TO_HPA,
            (temperature_f - 32.0) * (5.0 / 9.0),
        )
    }

    /// Refraction in radians for a body at the true altitude `y` (radians).
    pub fn refraction_at(&self, y: Radian) -> Radian {
        let kelvin = 273.0 + self.temperature;
        if y >= HIGH_ALTITUDE {
            7.888888e-5 * self.pressure / (kelvin * y.tan())
        } else if y >= LOWEST_ALTITUDE {
            let yd = y * 5.729578e1;
            let a = ((2e-5 * yd + 1.96e-2) * yd + 1.594e-1) * self.pressure;
            let b = kelvin * ((8.45e-2 * yd + 5.05e-1) * yd + 1.0);
            (a / b) * 1.745329e-2
        } else {
            0.0
        }
    }
}

/// Apply refraction to a geometric altitude.
///
/// The refraction depends on the altitude at which the ray is actually seen, so the
/// correction is iterated: `R₁ = R(h + R₀)` until two successive values agree within
/// `params.refraction_tolerance` radians, the correction is zero, or
/// `params.refraction_max_iter` passes were made.
///
/// Arguments
/// ---------
/// * `hz`: the geometric horizontal place
/// * `atmosphere`: pressure and temperature at the site
/// * `params`: loop tolerance and cap
///
/// Return
/// ------
/// * The apparent place, with the same azimuth.
pub fn refract(hz: &Horizontal, atmosphere: &Atmosphere, params: &EphemerisParams) -> Horizontal {
    let altitude = hz.altitude * RADEG;

    let mut correction = 0.0;
    let mut passes = 0;
    loop {
        let previous = correction;
        correction = atmosphere.refraction_at(altitude + previous);
        passes += 1;

        if correction == 0.0 || (correction - previous).abs() <= params.refraction_tolerance {
            break;
        }
        if passes >= params.refraction_max_iter {
            debug!("refraction loop stopped after {passes} passes at h = {}°", hz.altitude);
            break;
        }
    }

    Horizontal::new((altitude + correction) / RADEG, hz.azimuth)
}

/// Remove refraction from an apparent altitude, in a single pass.
pub fn unrefract(hz: &Horizontal, atmosphere: &Atmosphere) -> Horizontal {
    let altitude = hz.altitude * RADEG;
    let correction = atmosphere.refraction_at(altitude);
    Horizontal::new((altitude - correction) / RADEG, hz.azimuth)
}

/// Topocentric place of the Moon from its geocentric place.
///
/// Arguments
/// ---------
/// * `eq`: geocentric right ascension and declination
/// * `lst`: local sidereal time in hours
/// * `observer`: the site, latitude and elevation are used
/// * `horizontal_parallax`: equatorial horizontal parallax of the Moon, in degrees
///
/// Return
/// ------
/// * The right ascension and declination seen from the observer's site.
///
/// Details
/// -------
/// With `ρ·sin φ′`, `ρ·cos φ′` from [`Observer::parallax_coefficients`], `r = 1 / sin π` the
/// Moon's distance in Earth radii and `H` the geocentric hour angle:
///
/// ```text
/// ΔH = atan( ρcosφ′·sin H / (r·cos δ − ρcosφ′·cos H) )
/// H′ = H + ΔH
/// δ′ = atan( cos H′·(r·sin δ − ρsinφ′) / (r·cos δ·cos H − ρcosφ′) )
/// ```
pub fn lunar_parallax(
    eq: &Equatorial,
    lst: Hours,
    observer: &Observer,
    horizontal_parallax: Degree,
) -> Equatorial {
    let (rho_cos, rho_sin) = observer.parallax_coefficients();
    let r = 1.0 / (horizontal_parallax * RADEG).sin();

    let ha = normalize_hours(lst - eq.ra) * HOURS_TO_DEG * RADEG;
    let (sin_ha, cos_ha) = ha.sin_cos();
    let (sin_dec, cos_dec) = eq.dec_radians().sin_cos();

    let shift = (rho_cos * sin_ha / (r * cos_dec - rho_cos * cos_ha)).atan();
    let topo_ha = ha + shift;
    let dec = (topo_ha.cos() * (r * sin_dec - rho_sin) / (r * cos_dec * cos_ha - rho_cos)).atan();

    let topo_ha_hours = normalize_radians(topo_ha) / RADEG / HOURS_TO_DEG;
    Equatorial::new(lst - topo_ha_hours, dec / RADEG)
}

#[cfg(test)]
mod refraction_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_atmosphere() {
        let atm = Atmosphere::default();
        // about 34' at the horizon and 1' at 45°
        assert_abs_diff_eq!(atm.refraction_at(0.0) / RADEG * 60.0, 34.13, epsilon = 0.05);
        assert_abs_diff_eq!(atm.refraction_at(45.0 * RADEG) / RADEG * 60.0, 0.96, epsilon = 0.02);
        assert_eq!(atm.refraction_at(-10.0 * RADEG), 0.0);
    }

    #[test]
    fn test_imperial_units() {
        let atm = Atmosphere::imperial(29.92, 50.0);
        assert_abs_diff_eq!(atm.pressure, 1013.21, epsilon = 0.01);
        assert_abs_diff_eq!(atm.temperature, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_refraction_lifts_altitude() {
        let params = EphemerisParams::default();
        let atm = Atmosphere::default();

        let hz = Horizontal::new(30.0, 120.0);
        let seen = refract(&hz, &atm, &params);
        assert!(seen.altitude > hz.altitude);
        assert_eq!(seen.azimuth, 120.0);
        // the fixed point satisfies h' = h + R(h')
        let fixed = 30.0 + atm.refraction_at(seen.altitude * RADEG) / RADEG;
        assert_abs_diff_eq!(seen.altitude, fixed, epsilon = 1e-6);

        let below = refract(&Horizontal::new(-10.0, 10.0), &atm, &params);
        assert_abs_diff_eq!(below.altitude, -10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unrefract_near_inverse() {
        let params = EphemerisParams::default();
        let atm = Atmosphere::metric(1000.0, 20.0);
        for alt in [20.0, 45.0, 80.0] {
            let hz = Horizontal::new(alt, 200.0);
            let back = unrefract(&refract(&hz, &atm, &params), &atm);
            assert_abs_diff_eq!(back.altitude, alt, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_lunar_parallax_on_meridian() {
        // on the meridian the hour angle is unchanged and the Moon is pushed south
        let site = Observer::new(45.0, 0.0, 0.0);
        let eq = Equatorial::new(6.0, 10.0);
        let topo = lunar_parallax(&eq, 6.0, &site, 0.95);
        assert_abs_diff_eq!(topo.ra, 6.0, epsilon = 1e-9);
        assert!(topo.dec < eq.dec);
        // roughly π·sin(z) with z = 35°
        assert_abs_diff_eq!(eq.dec - topo.dec, 0.95 * (35.0 * RADEG).sin(), epsilon = 0.03);
    }

    #[test]
    fn test_lunar_parallax_east_of_meridian() {
        // a rising Moon is pushed toward the eastern horizon: smaller hour angle, larger RA
        let site = Observer::default();
        let eq = Equatorial::new(1.361093, 8.30875);
        let topo = lunar_parallax(&eq, eq.ra - 4.0, &site, 1.00112);
        assert_abs_diff_eq!((topo.ra - eq.ra) * 15.0, 0.553420, epsilon = 1e-5);
        assert_abs_diff_eq!(topo.dec, 7.580347, epsilon = 1e-5);
    }
}
