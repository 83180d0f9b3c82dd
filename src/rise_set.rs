//! # Rising and setting
//!
//! Horizon crossings of a body, as local sidereal times and azimuths.
//!
//! [`solve_rise_set`] handles a fixed place on the sky. The Sun and the Moon move during the
//! day, so [`sun_rise_set`] and [`moon_rise_set`] start from the place at local noon and then
//! re-evaluate the body at each estimated crossing with [`refine_rise_set`]. Each refinement
//! iteration is one rising pass plus one setting pass; there is no convergence test.
//!
//! Local sidereal times are turned back into civil times with a
//! [`SiderealClock`](crate::time::SiderealClock) for the date and site.
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bodies::moon::moon_position;
use crate::bodies::sun::sun_position;
use crate::constants::{Degree, Hours, DPI, HOURS_TO_DEG, MJD, RADEG};
use crate::coordinates::{normalize_hours, normalize_radians, Equatorial};
use crate::earth_orientation::EarthOrientation;
use crate::ephem_errors::EphemError;
use crate::observer::Observer;
use crate::params::EphemerisParams;
use crate::time::SiderealClock;

/// Local sidereal times and azimuths of rising and setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseSet {
    pub rise_lst: Hours,
    pub set_lst: Hours,
    /// Azimuth at rising, degrees from north through east
    pub rise_azimuth: Degree,
    pub set_azimuth: Degree,
}

impl RiseSet {
    /// Local civil time of rising.
    pub fn rise_time(&self, clock: &SiderealClock) -> Hours {
        clock.lst_to_local_time(self.rise_lst)
    }

    /// Local civil time of setting.
    pub fn set_time(&self, clock: &SiderealClock) -> Hours {
        clock.lst_to_local_time(self.set_lst)
    }
}

/// Solve the horizon crossings of a fixed equatorial place.
///
/// Arguments
/// ---------
/// * `eq`: right ascension and declination of the body
/// * `observer`: the site, only its latitude is used
/// * `dip`: vertical displacement of the body's centre at the crossing, in degrees,
///   positive below the geometric horizon
///
/// Return
/// ------
/// * The local sidereal times and azimuths of rising and setting, or
///   [`EphemError::Circumpolar`] / [`EphemError::NeverRises`] when the body does not cross
///   the horizon.
///
/// Details
/// -------
/// ```text
/// cos H = −(sin d + sin φ·sin δ) / (cos φ·cos δ)
/// cos A = (sin δ + sin d·sin φ) / (cos d·cos φ)
/// LST_rise = α − H,  LST_set = α + H,  A_rise = A,  A_set = 360° − A
/// ```
pub fn solve_rise_set(eq: &Equatorial, observer: &Observer, dip: Degree) -> Result<RiseSet, EphemError> {
    let (sin_d, cos_d) = (dip * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (observer.sin_lat(), observer.cos_lat());
    let (sin_dec, cos_dec) = eq.dec_radians().sin_cos();

    let cos_h = -(sin_d + sin_lat * sin_dec) / (cos_lat * cos_dec);
    if cos_h < -1.0 {
        warn!("no setting at latitude {}° for dec {}°", observer.latitude, eq.dec);
        return Err(EphemError::Circumpolar);
    }
    if cos_h > 1.0 {
        warn!("no rising at latitude {}° for dec {}°", observer.latitude, eq.dec);
        return Err(EphemError::NeverRises);
    }

    let cos_a = ((sin_dec + sin_d * sin_lat) / (cos_d * cos_lat)).clamp(-1.0, 1.0);
    let h = cos_h.acos() / RADEG / HOURS_TO_DEG;
    let azimuth = cos_a.acos();

    Ok(RiseSet {
        rise_lst: normalize_hours(24.0 + eq.ra - h),
        set_lst: normalize_hours(eq.ra + h),
        rise_azimuth: normalize_radians(azimuth) / RADEG,
        set_azimuth: normalize_radians(DPI - azimuth) / RADEG,
    })
}

/// Horizon dip of the Moon's centre for a horizontal parallax `hp` in degrees.
///
/// Semi-diameter (`0.27249·sin π`) plus refraction (34′) minus parallax.
pub fn moon_horizon_dip(hp: Degree) -> Degree {
    let p = hp * RADEG;
    (2.7249e-1 * p.sin() + 9.8902e-3 - p) / RADEG
}

/// Iterate the crossings of a moving body.
///
/// Arguments
/// ---------
/// * `clock`: sidereal clock of the date and site
/// * `observer`: the site
/// * `first_guess`: UT at which the first estimate is made
/// * `iterations`: number of rising + setting refinement passes
/// * `body`: place and horizon dip of the body at a given UT
///
/// Return
/// ------
/// * The rising time and azimuth of the last rising pass and the setting time and azimuth
///   of the last setting pass, or the first failure of [`solve_rise_set`] or of `body`.
pub fn refine_rise_set<F>(
    clock: &SiderealClock,
    observer: &Observer,
    first_guess: Hours,
    iterations: usize,
    mut body: F,
) -> Result<RiseSet, EphemError>
where
    F: FnMut(Hours) -> Result<(Equatorial, Degree), EphemError>,
{
    let (eq, dip) = body(first_guess)?;
    let mut rising = solve_rise_set(&eq, observer, dip)?;
    let mut setting = rising;

    for pass in 1..=iterations {
        let rise_ut = clock.lst_to_ut(rising.rise_lst);
        let set_ut = clock.lst_to_ut(setting.set_lst);

        let (eq, dip) = body(rise_ut)?;
        rising = solve_rise_set(&eq, observer, dip)?;
        let (eq, dip) = body(set_ut)?;
        setting = solve_rise_set(&eq, observer, dip)?;

        debug!(
            "rise/set pass {pass}: rise LST {:.5} h (UT {rise_ut:.5}), set LST {:.5} h (UT {set_ut:.5})",
            rising.rise_lst, setting.set_lst
        );
    }

    Ok(RiseSet {
        rise_lst: rising.rise_lst,
        set_lst: setting.set_lst,
        rise_azimuth: rising.rise_azimuth,
        set_azimuth: setting.set_azimuth,
    })
}

/// Sunrise and sunset on the civil date whose 0h UT day count is `mjd`.
///
/// The first estimate uses the Sun's place at local noon, `12 − clock.offset` UT.
pub fn sun_rise_set(
    mjd: MJD,
    clock: &SiderealClock,
    observer: &Observer,
    params: &EphemerisParams,
) -> Result<RiseSet, EphemError> {
    let orientation = EarthOrientation::at(mjd);
    refine_rise_set(
        clock,
        observer,
        12.0 - clock.offset,
        params.sun_refinement_iterations,
        |ut| {
            let sun = sun_position(mjd, ut, &orientation, params)?;
            Ok((sun.position.equatorial, params.sun_horizon_dip_deg))
        },
    )
}

/// Moonrise and moonset on the civil date whose 0h UT day count is `mjd`.
///
/// The horizon dip is recomputed from the Moon's parallax at every evaluation, see
/// [`moon_horizon_dip`].
pub fn moon_rise_set(
    mjd: MJD,
    clock: &SiderealClock,
    observer: &Observer,
    params: &EphemerisParams,
) -> Result<RiseSet, EphemError> {
    let orientation = EarthOrientation::at(mjd);
    refine_rise_set(
        clock,
        observer,
        12.0 - clock.offset,
        params.moon_refinement_iterations,
        |ut| {
            let moon = moon_position(mjd, ut, &orientation);
            Ok((
                moon.position.equatorial,
                moon_horizon_dip(moon.horizontal_parallax),
            ))
        },
    )
}

#[cfg(test)]
mod rise_set_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const AUTUMN_2023: MJD = 45197.5;

    #[test]
    fn test_circumpolar_and_never_rises() {
        let north = Observer::new(80.0, 0.0, 0.0);
        assert_eq!(
            solve_rise_set(&Equatorial::new(3.0, 85.0), &north, 0.0),
            Err(EphemError::Circumpolar)
        );
        assert_eq!(
            solve_rise_set(&Equatorial::new(3.0, -85.0), &north, 0.0),
            Err(EphemError::NeverRises)
        );
    }

    #[test]
    fn test_equator_crossing() {
        // a body on the equator, no dip: up for exactly 12 sidereal hours, rising due east
        let site = Observer::new(40.0, 0.0, 0.0);
        let rs = solve_rise_set(&Equatorial::new(5.0, 0.0), &site, 0.0).unwrap();
        assert_abs_diff_eq!(rs.rise_lst, 23.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rs.set_lst, 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rs.rise_azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rs.set_azimuth, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_moon_dip() {
        // at a mean parallax of 57' the centre is still 0.12° up when the Moon rises
        assert_abs_diff_eq!(moon_horizon_dip(0.95), -0.124479, epsilon = 1e-5);
        assert!(moon_horizon_dip(1.0) < moon_horizon_dip(0.9));
    }

    #[test]
    fn test_sunrise_sunset() {
        let site = Observer::default();
        let clock = SiderealClock::new(AUTUMN_2023, 2023, site.longitude, 0.0);
        let rs = sun_rise_set(AUTUMN_2023, &clock, &site, &EphemerisParams::default()).unwrap();

        assert_abs_diff_eq!(rs.rise_time(&clock), 6.09346, epsilon = 1e-3);
        assert_abs_diff_eq!(rs.set_time(&clock), 17.80275, epsilon = 1e-3);
        assert_abs_diff_eq!(rs.rise_azimuth, 93.2902, epsilon = 0.01);
        assert_abs_diff_eq!(rs.set_azimuth, 266.4083, epsilon = 0.01);
    }

    #[test]
    fn test_sunrise_summer_time() {
        let site = Observer::default();
        let june = 45096.5;
        let clock = SiderealClock::new(june, 2023, site.longitude, 1.0);
        let rs = sun_rise_set(june, &clock, &site, &EphemerisParams::default()).unwrap();

        assert_abs_diff_eq!(rs.rise_time(&clock), 4.86066, epsilon = 1e-3);
        assert_abs_diff_eq!(rs.set_time(&clock), 21.44144, epsilon = 1e-3);
    }

    #[test]
    fn test_moonrise_moonset() {
        let site = Observer::default();
        let clock = SiderealClock::new(AUTUMN_2023, 2023, site.longitude, 0.0);
        let rs = moon_rise_set(AUTUMN_2023, &clock, &site, &EphemerisParams::default()).unwrap();

        assert_abs_diff_eq!(rs.rise_time(&clock), 18.26743, epsilon = 2e-3);
        assert_abs_diff_eq!(rs.set_time(&clock), 7.29182, epsilon = 2e-3);
        assert_abs_diff_eq!(rs.rise_azimuth, 74.0759, epsilon = 0.02);
        assert_abs_diff_eq!(rs.set_azimuth, 280.9861, epsilon = 0.02);
    }

    #[test]
    fn test_refinement_passes() {
        let site = Observer::default();
        let clock = SiderealClock::new(AUTUMN_2023, 2023, site.longitude, 0.0);
        let mut calls = 0;
        let fixed = Equatorial::new(12.0, -3.0);
        let rs = refine_rise_set(&clock, &site, 12.0, 3, |_| {
            calls += 1;
            Ok((fixed, 0.0))
        })
        .unwrap();

        assert_eq!(calls, 1 + 2 * 3);
        assert_eq!(rs, solve_rise_set(&fixed, &site, 0.0).unwrap());
    }
}
