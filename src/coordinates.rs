//! # Celestial coordinate types and transforms
//!
//! Value types for the three coordinate systems handled by the crate and the stateless
//! spherical-trigonometry transforms between them:
//!
//! - [`Equatorial`]: right ascension (hours) and declination (degrees)
//! - [`Horizontal`]: altitude and azimuth (degrees, azimuth measured from north through east)
//! - [`Ecliptic`]: ecliptic longitude and latitude (degrees)
//!
//! A body computation returns a [`Position`] grouping the equatorial view with the ecliptic
//! and horizontal views when they are known.
//!
//! Trigonometric values are recomputed from the stored angles on demand.
//!
//! ## Singularities
//!
//! Near the poles and the zenith some denominators vanish. They are clamped to `1e-10`
//! (`1e-20` for the ecliptic latitude cosine) and `acos` arguments are clamped to `[-1, 1]`,
//! which yields bounded values instead of NaN. Round trips lose accuracy in those regions.
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, Radian, DPI, HOURS_TO_DEG, RADEG};
use crate::observer::Observer;

/// Bring an hour value into [0, 24).
pub fn normalize_hours(h: Hours) -> Hours {
    wrap(h, 24.0)
}

/// Bring an angle in degrees into [0, 360).
pub fn normalize_degrees(d: Degree) -> Degree {
    wrap(d, 360.0)
}

/// Bring an angle in radians into [0, 2π).
pub fn normalize_radians(r: Radian) -> Radian {
    wrap(r, DPI)
}

fn wrap(x: f64, modulus: f64) -> f64 {
    let r = x.rem_euclid(modulus);
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    if r >= modulus {
        0.0
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in hours, [0, 24)
    pub ra: Hours,
    /// Declination in degrees
    pub dec: Degree,
}

impl Equatorial {
    pub fn new(ra: Hours, dec: Degree) -> Self {
        Equatorial {
            ra: normalize_hours(ra),
            dec,
        }
    }

    pub fn ra_radians(&self) -> Radian {
        self.ra * HOURS_TO_DEG * RADEG
    }

    pub fn dec_radians(&self) -> Radian {
        self.dec * RADEG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    pub altitude: Degree,
    /// Azimuth in degrees from north through east, [0, 360)
    pub azimuth: Degree,
}

impl Horizontal {
    pub fn new(altitude: Degree, azimuth: Degree) -> Self {
        Horizontal {
            altitude,
            azimuth: normalize_degrees(azimuth),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ecliptic {
    pub longitude: Degree,
    pub latitude: Degree,
}

impl Ecliptic {
    pub fn new(longitude: Degree, latitude: Degree) -> Self {
        Ecliptic {
            longitude: normalize_degrees(longitude),
            latitude,
        }
    }
}

/// A computed or manually entered position, with every view that is known for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub equatorial: Equatorial,
    pub ecliptic: Option<Ecliptic>,
    pub horizontal: Option<Horizontal>,
}

impl Position {
    pub fn from_equatorial(equatorial: Equatorial) -> Self {
        Position {
            equatorial,
            ecliptic: None,
            horizontal: None,
        }
    }

    pub fn from_ecliptic(ecliptic: Ecliptic, equatorial: Equatorial) -> Self {
        Position {
            equatorial,
            ecliptic: Some(ecliptic),
            horizontal: None,
        }
    }
}

/// Transform equatorial coordinates into altitude/azimuth for an observer.
///
/// Arguments
/// ---------
/// * `eq`: the equatorial position
/// * `lst`: local sidereal time in hours
/// * `observer`: the site, only its latitude is used
///
/// Return
/// ------
/// * The horizontal position, azimuth measured from north through east.
pub fn equatorial_to_horizontal(eq: &Equatorial, lst: Hours, observer: &Observer) -> Horizontal {
    let ha = normalize_hours(lst - eq.ra) * HOURS_TO_DEG * RADEG;
    let (sin_ha, cos_ha) = ha.sin_cos();
    let (sin_dec, cos_dec) = eq.dec_radians().sin_cos();
    let (sin_lat, cos_lat) = (observer.sin_lat(), observer.cos_lat());

    let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_ha;
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    let b = (cos_lat * alt.cos()).max(1e-10);
    let cos_az = (sin_dec - sin_lat * sin_alt) / b;
    let mut az = cos_az.clamp(-1.0, 1.0).acos();
    if sin_ha > 0.0 {
        az = DPI - az;
    }

    Horizontal::new(alt / RADEG, az / RADEG)
}

/// Transform altitude/azimuth back into equatorial coordinates for an observer.
///
/// See also
/// --------
/// * [`equatorial_to_horizontal`] – the forward transform
pub fn horizontal_to_equatorial(hz: &Horizontal, lst: Hours, observer: &Observer) -> Equatorial {
    let (sin_alt, cos_alt) = (hz.altitude * RADEG).sin_cos();
    let (sin_az, cos_az) = (hz.azimuth * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (observer.sin_lat(), observer.cos_lat());

    let sin_dec = sin_alt * sin_lat + cos_alt * cos_lat * cos_az;
    let dec = sin_dec.clamp(-1.0, 1.0).asin();

    let b = (cos_lat * dec.cos()).max(1e-10);
    let cos_ha = (sin_alt - sin_lat * sin_dec) / b;
    let mut ha = cos_ha.clamp(-1.0, 1.0).acos();
    if sin_az > 0.0 {
        ha = DPI - ha;
    }

    let ha_hours = ha / RADEG / HOURS_TO_DEG;
    Equatorial::new(lst - ha_hours, dec / RADEG)
}

/// Rotate ecliptic coordinates into equatorial coordinates.
///
/// Arguments
/// ---------
/// * `ecl`: ecliptic longitude and latitude
/// * `obliquity`: obliquity of the ecliptic in degrees (true obliquity for apparent places)
pub fn ecliptic_to_equatorial(ecl: &Ecliptic, obliquity: Degree) -> Equatorial {
    let (se, ce) = (obliquity * RADEG).sin_cos();
    let (sx, cx) = (ecl.longitude * RADEG).sin_cos();
    let sy = (ecl.latitude * RADEG).sin();
    let mut cy = (ecl.latitude * RADEG).cos();
    if cy.abs() < 1e-20 {
        cy = 1e-20;
    }
    let ty = sy / cy;

    let dec = (sy * ce + cy * se * sx).clamp(-1.0, 1.0).asin();
    let ra = normalize_radians((sx * ce - ty * se).atan2(cx));

    Equatorial::new(ra / RADEG / HOURS_TO_DEG, dec / RADEG)
}

/// Rotate equatorial coordinates into ecliptic coordinates.
///
/// Inverse of [`ecliptic_to_equatorial`] for the same obliquity.
pub fn equatorial_to_ecliptic(eq: &Equatorial, obliquity: Degree) -> Ecliptic {
    let (se, ce) = (obliquity * RADEG).sin_cos();
    let (sa, ca) = eq.ra_radians().sin_cos();
    let sd = eq.dec_radians().sin();
    let mut cd = eq.dec_radians().cos();
    if cd.abs() < 1e-20 {
        cd = 1e-20;
    }
    let td = sd / cd;

    let lat = (sd * ce - cd * se * sa).clamp(-1.0, 1.0).asin();
    let lon = normalize_radians((sa * ce + td * se).atan2(ca));

    Ecliptic::new(lon / RADEG, lat / RADEG)
}
