use approx::assert_abs_diff_eq;
use sidereal::{DstMode, EphemError, Ephemeris};

mod common;
use common::{autumn_session, AUTUMN_2023};

#[test]
fn test_calendar_validation() {
    let mut eph = Ephemeris::new();
    assert_eq!(eph.set_date(0, 1, 1), Err(EphemError::InvalidYear(0)));
    assert_eq!(eph.set_date(2023, 13, 1), Err(EphemError::InvalidMonth(13)));
    assert_eq!(
        eph.set_date(2023, 2, 29),
        Err(EphemError::InvalidDay { year: 2023, month: 2, day: 29 })
    );
    assert_eq!(eph.set_date(1582, 10, 10), Err(EphemError::CalendarGap(10)));
    assert!(eph.set_date(2024, 2, 29).is_ok());
    assert!(eph.set_date(1582, 10, 15).is_ok());

    // a rejected date leaves the previous one in place
    assert!(eph.set_date(2023, 4, 31).is_err());
    assert_eq!(eph.date().map(|d| (d.year, d.month, d.day)), Some((1582, 10, 15)));

    assert!(eph.set_time(24, 0, 0.0).is_err());
    assert!(eph.set_time(23, 60, 0.0).is_err());
    assert!(eph.set_time(23, 59, 60.0).is_err());
}

#[test]
fn test_time_defaults_to_midnight() {
    let mut eph = Ephemeris::new();
    eph.set_date(2023, 9, 30).unwrap();
    assert_eq!(eph.utc_hours(), 0.0);
    assert_eq!(eph.mjd(), Ok(AUTUMN_2023));
}

#[test]
fn test_idempotent_setters() {
    common::enable_logging();
    let mut eph = autumn_session(12);
    let first = eph.sun().unwrap();

    eph.set_date(2023, 9, 30).unwrap();
    eph.set_location(51.178889, -1.826111);
    eph.set_time(12, 0, 0.0).unwrap();
    let second = eph.sun().unwrap();

    assert_eq!(first, second);
    let counters = eph.cache_counters();
    assert_eq!(counters.invalidations, 1);
    assert_eq!(counters.day_count, 1);
    assert_eq!(counters.orientation, 1);
}

#[test]
fn test_sidereal_times() {
    let mut eph = autumn_session(12);
    assert_abs_diff_eq!(eph.greenwich_sidereal_time().unwrap(), 12.598683114, epsilon = 1e-8);
    assert_abs_diff_eq!(eph.local_sidereal_time().unwrap(), 12.476942380, epsilon = 1e-8);
    assert_abs_diff_eq!(eph.lst_to_local_time(10.0).unwrap(), 9.529820743, epsilon = 1e-8);
    assert_abs_diff_eq!(eph.lst_to_utc(10.0).unwrap(), 9.529820743, epsilon = 1e-8);

    // sidereal time gains about 3m56s a day on solar time
    let gst_today = eph.greenwich_sidereal_time().unwrap();
    eph.set_date(2023, 10, 1).unwrap();
    let gst_tomorrow = eph.greenwich_sidereal_time().unwrap();
    assert_abs_diff_eq!(gst_tomorrow - gst_today, 0.065709, epsilon = 1e-5);
}

#[test]
fn test_julian_centuries() {
    let mut eph = Ephemeris::new();
    eph.set_date(2000, 1, 1).unwrap();
    eph.set_time(12, 0, 0.0).unwrap();
    assert_abs_diff_eq!(eph.julian_centuries_j2000().unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_daylight_saving_modes() {
    let mut eph = Ephemeris::new();
    eph.set_date(2023, 1, 15).unwrap();
    eph.set_time_zone(-8.0).unwrap();
    eph.set_time(20, 0, 0.0).unwrap();

    assert_eq!(eph.dst_offset(), 0.0);
    eph.set_dst_mode(DstMode::Auto);
    assert_eq!(eph.dst_offset(), 0.0);
    eph.set_dst_mode(DstMode::On);
    assert_eq!(eph.dst_offset(), 1.0);
    assert_abs_diff_eq!(eph.local_time(), 13.0, epsilon = 1e-12);

    eph.set_dst_mode(DstMode::Auto);
    eph.set_date(2023, 7, 4).unwrap();
    assert_eq!(eph.dst_offset(), 1.0);
}

#[test]
fn test_local_time_keeps_date() {
    let mut eph = Ephemeris::new();
    eph.set_date(2023, 9, 30).unwrap();
    eph.set_time_zone(9.0).unwrap();
    eph.set_dst_mode(DstMode::Off);
    eph.set_local_time(3, 30, 0.0).unwrap();

    assert_abs_diff_eq!(eph.utc_hours(), 18.5, epsilon = 1e-12);
    assert_eq!(eph.date().map(|d| d.day), Some(30));
    assert_abs_diff_eq!(eph.local_time(), 3.5, epsilon = 1e-12);
}

#[test]
fn test_epoch() {
    let mut eph = autumn_session(12);
    eph.set_time(12, 34, 56.5).unwrap();
    let epoch = eph.epoch().unwrap();
    let (y, m, d, h, min, s, ns) = epoch.to_gregorian_utc();
    assert_eq!((y, m, d, h, min, s), (2023, 9, 30, 12, 34, 56));
    assert_eq!(ns, 500_000_000);
}
