#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use sidereal::coordinates::Equatorial;
use sidereal::{DstMode, Ephemeris};

pub fn enable_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Day count of 2023-09-30 at 0h UT.
pub const AUTUMN_2023: f64 = 45197.5;

/// A session at the default site on 2023-09-30, GMT, no daylight saving, at `hour` UT.
pub fn autumn_session(hour: u8) -> Ephemeris {
    let mut eph = Ephemeris::new();
    eph.set_dst_mode(DstMode::Off);
    eph.set_date(2023, 9, 30).unwrap();
    eph.set_time(hour, 0, 0.0).unwrap();
    eph
}

pub fn assert_equatorial_close(actual: &Equatorial, expected: &Equatorial, epsilon: f64) {
    let mut dra = (actual.ra - expected.ra).abs();
    if dra > 12.0 {
        dra = 24.0 - dra;
    }
    assert!(dra < epsilon, "RA {} vs {}", actual.ra, expected.ra);
    assert_abs_diff_eq!(actual.dec, expected.dec, epsilon = epsilon);
}
