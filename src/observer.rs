//! # Observer location
//!
//! The geographic site of the session: geodetic latitude, east longitude and height above
//! sea level, plus the geocentric parallax coefficients derived from them.
//!
//! Latitude is expected in [-90, 90] and longitude in [-180, 180]. These ranges are not
//! enforced; out-of-range values give meaningless but finite results.
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter, EARTH_AXIS_RATIO, EARTH_EQUATORIAL_RADIUS, RADEG};

/// Geographic location of the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude, positive north
    pub latitude: Degree,
    /// Longitude, positive east
    pub longitude: Degree,
    /// Height above sea level
    pub elevation: Meter,
}

impl Default for Observer {
    fn default() -> Self {
        Observer {
            latitude: 51.178889,
            longitude: -1.826111,
            elevation: 0.0,
        }
    }
}

impl Observer {
    pub fn new(latitude: Degree, longitude: Degree, elevation: Meter) -> Self {
        Observer {
            latitude,
            longitude,
            elevation,
        }
    }

    pub fn sin_lat(&self) -> f64 {
        (self.latitude * RADEG).sin()
    }

    pub fn cos_lat(&self) -> f64 {
        (self.latitude * RADEG).cos()
    }

    /// Geocentric parallax coefficients `(ρ·cos φ′, ρ·sin φ′)` in Earth equatorial radii.
    ///
    /// See also
    /// --------
    /// * [`lat_alt_to_parallax`] – the underlying conversion
    pub fn parallax_coefficients(&self) -> (f64, f64) {
        lat_alt_to_parallax(self.latitude * RADEG, self.elevation)
    }
}

/// Convert a geodetic latitude and a height into the observer's geocentric
/// parallax coefficients.
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude in radians
/// * `height`: height above the reference ellipsoid in meters
///
/// Return
/// ------
/// * `(rho_cos_phi, rho_sin_phi)`: the observer's distance from the Earth's axis and from the
///   equatorial plane, in units of the equatorial radius.
///
/// Details
/// -------
/// ```text
/// u = atan( (sin φ * (b/a)) / cos φ )
/// ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
/// ρ_cosφ = cos u + (h/a) * cos φ
/// ```
pub fn lat_alt_to_parallax(lat: f64, height: Meter) -> (f64, f64) {
    let u = (lat.sin() * EARTH_AXIS_RATIO).atan2(lat.cos());
    let h = height / EARTH_EQUATORIAL_RADIUS;

    let rho_sin_phi = EARTH_AXIS_RATIO * u.sin() + h * lat.sin();
    let rho_cos_phi = u.cos() + h * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallax_coefficients() {
        let (c, s) = lat_alt_to_parallax(0.0, 0.0);
        assert_relative_eq!(c, 1.0, epsilon = 1e-15);
        assert_relative_eq!(s, 0.0, epsilon = 1e-15);

        let (c, s) = lat_alt_to_parallax(90.0 * RADEG, 0.0);
        assert_relative_eq!(c, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s, EARTH_AXIS_RATIO, epsilon = 1e-12);

        // Meeus, example 11.a: Palomar, 33°21'22" N, 1706 m
        let palomar = Observer::new(33.356111, -116.8625, 1706.0);
        let (c, s) = palomar.parallax_coefficients();
        assert_relative_eq!(c, 0.836339, epsilon = 1e-5);
        assert_relative_eq!(s, 0.546861, epsilon = 1e-5);
    }

    #[test]
    fn test_default_site() {
        let site = Observer::default();
        assert_eq!(site.latitude, 51.178889);
        assert_eq!(site.longitude, -1.826111);
        assert_relative_eq!(
            site.sin_lat().powi(2) + site.cos_lat().powi(2),
            1.0,
            epsilon = 1e-15
        );
    }
}
