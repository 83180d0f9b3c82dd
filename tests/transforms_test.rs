use approx::assert_abs_diff_eq;
use sidereal::conversion::{decimal_degrees, parse_dec, parse_ra, Dms};
use sidereal::coordinates::Equatorial;
use sidereal::{Atmosphere, EphemError};

mod common;
use common::{assert_equatorial_close, autumn_session};

#[test]
fn test_equatorial_horizontal_round_trip() {
    let mut eph = autumn_session(20);
    for (ra, dec) in [(0.5, 10.0), (6.0, -20.0), (13.25, 45.0), (19.9, 70.0)] {
        eph.set_ra_dec(ra, dec);
        let hz = eph.equatorial_to_horizontal().unwrap();
        assert!((-90.0..=90.0).contains(&hz.altitude));
        assert!((0.0..360.0).contains(&hz.azimuth));

        let back = eph.horizontal_to_equatorial().unwrap();
        assert_equatorial_close(&back, &Equatorial::new(ra, dec), 1e-6);
    }
}

#[test]
fn test_zenith_and_meridian() {
    let mut eph = autumn_session(12);
    let lst = eph.local_sidereal_time().unwrap();
    let latitude = eph.observer().latitude;

    eph.set_ra_dec(lst, latitude);
    let hz = eph.equatorial_to_horizontal().unwrap();
    assert_abs_diff_eq!(hz.altitude, 90.0, epsilon = 1e-5);

    eph.set_ra_dec(lst, 0.0);
    let hz = eph.equatorial_to_horizontal().unwrap();
    assert_abs_diff_eq!(hz.altitude, 90.0 - latitude, epsilon = 1e-9);
    assert_abs_diff_eq!(hz.azimuth, 180.0, epsilon = 1e-5);
}

#[test]
fn test_ecliptic_round_trip() {
    let mut eph = autumn_session(0);
    eph.set_ra_dec(7.5, 21.0);
    let ecl = eph.equatorial_to_ecliptic().unwrap();
    eph.set_ra_dec(0.0, 0.0);
    eph.set_ecliptic(ecl.longitude, ecl.latitude);
    let back = eph.ecliptic_to_equatorial().unwrap();
    assert_equatorial_close(&back, &Equatorial::new(7.5, 21.0), 1e-8);

    // the vernal equinox sits at the origin of both frames
    eph.set_ecliptic(0.0, 0.0);
    let eq = eph.ecliptic_to_equatorial().unwrap();
    assert_abs_diff_eq!(eq.dec, 0.0, epsilon = 1e-12);
}

#[test]
fn test_precession_round_trip() {
    let mut eph = autumn_session(0);
    eph.set_ra_dec(2.530303, 89.264109);
    let of_date = eph.precess_from_j2000().unwrap();
    // Polaris drifts toward the pole
    assert!(of_date.dec > 89.264109);

    let back = eph.precess_to_j2000().unwrap();
    assert_equatorial_close(&back, &Equatorial::new(2.530303, 89.264109), 1e-7);
    assert_eq!(eph.cache_counters().precession, 1);
}

#[test]
fn test_refraction_in_session() {
    let mut eph = autumn_session(0);
    assert_eq!(
        eph.refract(&Atmosphere::default()),
        Err(EphemError::MissingCoordinates("horizontal"))
    );

    eph.set_alt_az(10.0, 250.0);
    let seen = eph.refract(&Atmosphere::default()).unwrap();
    assert!(seen.altitude > 10.0 && seen.altitude < 10.2);
    assert_eq!(eph.alt_az(), Some(seen));

    let geometric = eph.unrefract(&Atmosphere::default()).unwrap();
    assert_abs_diff_eq!(geometric.altitude, 10.0, epsilon = 2e-3);
    assert_eq!(geometric.azimuth, 250.0);
}

#[test]
fn test_manual_sexagesimal_entry() {
    let mut eph = autumn_session(22);
    eph.set_location(decimal_degrees(40, 42, 46.0), decimal_degrees(-74, 0, 21.6));

    // Vega, J2000.0
    eph.set_ra_dec(parse_ra("18 36 56.34").unwrap(), parse_dec("+38 47 01.3").unwrap());
    let of_date = eph.precess_from_j2000().unwrap();
    assert_abs_diff_eq!(of_date.dec, 38.805135, epsilon = 1e-5);
    assert_abs_diff_eq!(of_date.ra, 18.628942, epsilon = 1e-5);
    assert_eq!(Dms::from(eph.ra_dec().dec).degrees, 38);

    let hz = eph.equatorial_to_horizontal().unwrap();
    assert!(hz.altitude > 0.0);
    assert!(parse_ra("25 00 00").is_err());
}
