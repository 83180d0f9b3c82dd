//! # Civil time, calendar and sidereal time
//!
//! Calendar validation, the 1900-based day count, the day of the week and the US daylight
//! saving rule, plus Greenwich/local sidereal time and the inverse conversion from a local
//! sidereal time back to civil time (used by the rise/set accessors).
//!
//! Day counts follow the convention documented in [`crate::constants`]: days elapsed since
//! 1899-12-31 12:00 UT, evaluated at 0h of the civil date.
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Hours, HOURS_TO_DEG, MJD, MJD_OUT_OF_CALENDAR, SIDEREAL_PER_SOLAR, SOLAR_PER_SIDEREAL,
};
use crate::coordinates::normalize_hours;
use crate::ephem_errors::EphemError;

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1..=12) of `year`, `0` for an invalid month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day count since 1899-12-31 12:00 UT at 0h of the given civil date.
///
/// Dates from 1582-10-15 onward are read in the Gregorian calendar, earlier ones in the
/// Julian calendar. Years are counted without a year zero (`-1` is 1 BC).
///
/// Arguments
/// ---------
/// * `year`: civil year, `0` is not a valid input
/// * `month`: month, 1..=12
/// * `day`: day of month
///
/// Return
/// ------
/// * The day count, or [`MJD_OUT_OF_CALENDAR`] for the ten days removed by the 1582
///   calendar reform (1582-10-05 ..= 1582-10-14).
pub fn mjd1900_from_ymd(year: i32, month: u8, day: u8) -> MJD {
    if year == 1582 && month == 10 && (5..15).contains(&day) {
        return MJD_OUT_OF_CALENDAR;
    }

    let mut y1 = (if year < 1 { year + 1 } else { year }) as f64;
    let mut m1 = month as f64;
    if month < 3 {
        m1 += 12.0;
        y1 -= 1.0;
    }

    let gregorian = (year, month, day) >= (1582, 10, 15);
    let b = if gregorian {
        let a = (y1 / 100.0).trunc();
        2.0 - a + (a / 4.0).trunc()
    } else {
        0.0
    };

    let c = if y1 < 0.0 {
        (365.25 * y1 - 0.75).trunc() - 694_025.0
    } else {
        (365.25 * y1).trunc() - 694_025.0
    };
    let d = (30.6001 * (m1 + 1.0)).trunc();

    b + c + d + day as f64 - 0.5
}

/// Day of the week, 0 = Sunday ..= 6 = Saturday (Sakamoto's method, Gregorian calendar).
pub fn day_of_week(year: i32, month: u8, day: u8) -> u8 {
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let idx = (month.clamp(1, 12) - 1) as usize;
    (y + y / 4 - y / 100 + y / 400 + T[idx] + day as i32).rem_euclid(7) as u8
}

/// US daylight saving rule in force since 2007.
///
/// Daylight time runs from the second Sunday of March to the first Sunday of November.
/// The rule is applied to the UTC calendar date only, so the switch-over hour is not
/// modelled.
pub fn us_dst_in_effect(year: i32, month: u8, day: u8) -> bool {
    let previous_sunday = day as i32 - day_of_week(year, month, day) as i32;
    match month {
        4..=10 => true,
        3 => previous_sunday >= 8,
        11 => previous_sunday <= 0,
        _ => false,
    }
}

/// A validated UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Build a date, rejecting year zero, impossible month/day combinations and the days
    /// dropped by the 1582 calendar reform.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, EphemError> {
        if year == 0 {
            return Err(EphemError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(EphemError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(EphemError::InvalidDay { year, month, day });
        }
        if year == 1582 && month == 10 && (5..15).contains(&day) {
            return Err(EphemError::CalendarGap(day));
        }
        Ok(CalendarDate { year, month, day })
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Day count since 1899-12-31 12:00 UT at 0h of this date.
    pub fn mjd1900(&self) -> MJD {
        mjd1900_from_ymd(self.year, self.month, self.day)
    }

    /// 0 = Sunday ..= 6 = Saturday
    pub fn weekday(&self) -> u8 {
        day_of_week(self.year, self.month, self.day)
    }

    pub fn is_us_dst(&self) -> bool {
        us_dst_in_effect(self.year, self.month, self.day)
    }
}

/// A validated time of day, UTC or local depending on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl TimeOfDay {
    /// Build a time of day with `hour` in 0..=23, `minute` in 0..=59 and `second` in [0, 60).
    pub fn new(hour: u8, minute: u8, second: f64) -> Result<Self, EphemError> {
        if hour > 23 {
            return Err(EphemError::InvalidTime(format!("hour {hour} out of 0..=23")));
        }
        if minute > 59 {
            return Err(EphemError::InvalidTime(format!(
                "minute {minute} out of 0..=59"
            )));
        }
        if !(0.0..60.0).contains(&second) {
            return Err(EphemError::InvalidTime(format!(
                "second {second} out of [0, 60)"
            )));
        }
        Ok(TimeOfDay {
            hour,
            minute,
            second,
        })
    }

    /// Midnight.
    pub fn midnight() -> Self {
        TimeOfDay {
            hour: 0,
            minute: 0,
            second: 0.0,
        }
    }

    pub fn decimal_hours(&self) -> Hours {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0
    }

    /// Shift this time of day by `offset` hours, wrapping around midnight.
    ///
    /// The offset is applied at minute resolution, which covers every civil time zone.
    /// Seconds are carried over unchanged.
    pub fn shifted(&self, offset: Hours) -> Self {
        let offset_minutes = (offset * 60.0).round() as i32;
        let minutes =
            (self.hour as i32 * 60 + self.minute as i32 + offset_minutes).rem_euclid(24 * 60);
        TimeOfDay {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
            second: self.second,
        }
    }
}

/// How the daylight saving offset is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DstMode {
    /// Never add the daylight saving hour.
    Off,
    /// Always add the daylight saving hour.
    On,
    /// Decide from the UTC date with the US rule, see [`us_dst_in_effect`].
    Auto,
}

impl DstMode {
    /// Daylight saving offset in hours for this mode on `date`.
    pub fn offset(&self, date: Option<&CalendarDate>) -> Hours {
        match self {
            DstMode::Off => 0.0,
            DstMode::On => 1.0,
            DstMode::Auto => match date {
                Some(d) if d.is_us_dst() => 1.0,
                _ => 0.0,
            },
        }
    }
}

/// Greenwich mean sidereal time at 0h UT of the civil date whose day count is `mjd`.
///
/// Arguments
/// ---------
/// * `mjd`: day count of the date (1900 epoch) at 0h UT
/// * `year`: the civil year of that date, used to remove the whole-year drift term
///
/// Return
/// ------
/// * Sidereal time in hours, in [0, 24)
pub fn greenwich_sidereal_time_at_0h(mjd: MJD, year: i32) -> Hours {
    let d = (mjd - 0.5).trunc() + 0.5;
    let t = d / 36525.0 - 1.0;
    let r0 = t * (5.13366e-2 + t * (2.586222e-5 - t * 1.722e-9));
    let r1 = 6.697374558 + 2400.0 * (t - (year as f64 - 2000.0) / 100.0);
    normalize_hours(r0 + r1)
}

/// Greenwich mean sidereal time at `ut` hours on the date whose day count is `mjd`.
pub fn greenwich_sidereal_time(mjd: MJD, year: i32, ut: Hours) -> Hours {
    normalize_hours(ut * SIDEREAL_PER_SOLAR + greenwich_sidereal_time_at_0h(mjd, year))
}

/// Local sidereal time for a given Greenwich sidereal time and east longitude.
pub fn local_sidereal_time(gst: Hours, longitude: Degree) -> Hours {
    normalize_hours(gst + longitude / HOURS_TO_DEG)
}

/// Converts local sidereal times back to civil times on a fixed date and site.
///
/// See also
/// --------
/// * [`crate::rise_set`] – produces the local sidereal times of rising and setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealClock {
    /// Greenwich sidereal time at 0h UT
    pub gst0: Hours,
    /// Observer east longitude
    pub longitude: Degree,
    /// Time zone plus daylight saving offset
    pub offset: Hours,
}

impl SiderealClock {
    pub fn new(mjd: MJD, year: i32, longitude: Degree, offset: Hours) -> Self {
        SiderealClock {
            gst0: greenwich_sidereal_time_at_0h(mjd, year),
            longitude,
            offset,
        }
    }

    /// Local civil time, in [0, 24), at which the local sidereal time equals `lst`.
    pub fn lst_to_local_time(&self, lst: Hours) -> Hours {
        let t = normalize_hours(self.gst0 - self.offset * SIDEREAL_PER_SOLAR);
        let mut sg = normalize_hours(lst - self.longitude / HOURS_TO_DEG);
        if sg < t {
            sg += 24.0;
        }
        normalize_hours((sg - t) * SOLAR_PER_SIDEREAL)
    }

    /// UT at which the local sidereal time equals `lst`.
    ///
    /// Not wrapped: the result lies in `[-offset, 24 - offset)` so that it stays on the same
    /// local civil day.
    pub fn lst_to_ut(&self, lst: Hours) -> Hours {
        self.lst_to_local_time(lst) - self.offset
    }
}

/// Build a [`hifitime::Epoch`] in the UTC time scale from a civil date and time of day.
pub fn to_epoch(date: &CalendarDate, time: &TimeOfDay) -> Result<Epoch, EphemError> {
    let whole = time.second.trunc();
    let nanos = (((time.second - whole) * 1e9).round() as u32).min(999_999_999);
    Ok(Epoch::maybe_from_gregorian_utc(
        date.year,
        date.month,
        date.day,
        time.hour,
        time.minute,
        whole as u8,
        nanos,
    )?)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use crate::constants::MJD_TO_MJD1900;
    use approx::assert_relative_eq;
    use hifitime::Weekday;

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_calendar_validation() {
        assert_eq!(CalendarDate::new(0, 1, 1), Err(EphemError::InvalidYear(0)));
        assert_eq!(CalendarDate::new(2023, 0, 1), Err(EphemError::InvalidMonth(0)));
        assert_eq!(
            CalendarDate::new(2023, 13, 1),
            Err(EphemError::InvalidMonth(13))
        );
        assert_eq!(
            CalendarDate::new(2023, 2, 29),
            Err(EphemError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CalendarDate::new(2024, 2, 30).is_err());
        assert!(CalendarDate::new(2023, 4, 31).is_err());
        assert_eq!(
            CalendarDate::new(1582, 10, 10),
            Err(EphemError::CalendarGap(10))
        );
        assert!(CalendarDate::new(1582, 10, 4).is_ok());
        assert!(CalendarDate::new(1582, 10, 15).is_ok());
        assert!(CalendarDate::new(2000, 2, 29).is_ok());
        assert!(CalendarDate::new(1900, 2, 28).is_ok());
    }

    #[test]
    fn test_mjd1900_epochs() {
        assert_eq!(mjd1900_from_ymd(1900, 1, 1), 0.5);
        assert_eq!(mjd1900_from_ymd(2000, 1, 1), 36524.5);
        assert_eq!(mjd1900_from_ymd(1582, 10, 4), -115_860.5);
        assert_eq!(mjd1900_from_ymd(1582, 10, 15), -115_859.5);
        assert_eq!(mjd1900_from_ymd(1582, 10, 9), MJD_OUT_OF_CALENDAR);

        // no year zero: 1 BC Dec 31 is followed by AD 1 Jan 1
        assert_eq!(
            mjd1900_from_ymd(1, 1, 1) - mjd1900_from_ymd(-1, 12, 31),
            1.0
        );
    }

    #[test]
    fn test_mjd1900_against_hifitime() {
        let dates = [
            (1969, 7, 20),
            (1987, 4, 10),
            (1999, 12, 31),
            (2000, 2, 29),
            (2023, 9, 30),
            (2100, 3, 1),
        ];
        for (y, m, d) in dates {
            let expected =
                Epoch::from_gregorian_utc_at_midnight(y, m, d).to_mjd_utc_days() - MJD_TO_MJD1900;
            assert_relative_eq!(mjd1900_from_ymd(y, m, d), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_day_of_week() {
        let dates = [(2000, 1, 1), (2023, 9, 30), (2023, 3, 12), (1987, 4, 10)];
        for (y, m, d) in dates {
            let expected = match Epoch::from_gregorian_utc_at_midnight(y, m, d).weekday() {
                Weekday::Sunday => 0,
                Weekday::Monday => 1,
                Weekday::Tuesday => 2,
                Weekday::Wednesday => 3,
                Weekday::Thursday => 4,
                Weekday::Friday => 5,
                Weekday::Saturday => 6,
            };
            assert_eq!(day_of_week(y, m, d), expected, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_us_dst() {
        assert!(!us_dst_in_effect(2023, 3, 11));
        assert!(us_dst_in_effect(2023, 3, 12));
        assert!(us_dst_in_effect(2023, 7, 1));
        assert!(us_dst_in_effect(2023, 11, 4));
        assert!(!us_dst_in_effect(2023, 11, 5));
        assert!(!us_dst_in_effect(2023, 12, 1));
    }

    #[test]
    fn test_time_of_day() {
        assert!(TimeOfDay::new(24, 0, 0.0).is_err());
        assert!(TimeOfDay::new(12, 60, 0.0).is_err());
        assert!(TimeOfDay::new(12, 0, 60.0).is_err());
        assert!(TimeOfDay::new(12, 0, -1.0).is_err());

        let t = TimeOfDay::new(18, 30, 36.0).unwrap();
        assert_relative_eq!(t.decimal_hours(), 18.51, epsilon = 1e-12);

        let shifted = t.shifted(-5.5);
        assert_eq!((shifted.hour, shifted.minute), (13, 0));
        let wrapped = TimeOfDay::new(1, 15, 0.0).unwrap().shifted(-2.0);
        assert_eq!((wrapped.hour, wrapped.minute), (23, 15));
    }

    #[test]
    fn test_gmst() {
        // 1987-04-10 0h UT: 13h10m46.3668s
        let mjd = mjd1900_from_ymd(1987, 4, 10);
        assert_relative_eq!(
            greenwich_sidereal_time(mjd, 1987, 0.0),
            13.0 + 10.0 / 60.0 + 46.3668 / 3600.0,
            epsilon = 1e-6
        );

        let mjd = mjd1900_from_ymd(2023, 9, 30);
        let gst = greenwich_sidereal_time(mjd, 2023, 12.0);
        assert_relative_eq!(gst, 12.598683113, epsilon = 1e-6);
        assert_relative_eq!(
            local_sidereal_time(gst, -1.826111),
            12.476942380,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_sidereal_clock_round_trip() {
        let date = CalendarDate::new(2023, 9, 30).unwrap();
        let clock = SiderealClock::new(date.mjd1900(), date.year, -1.826111, 0.0);

        let lst = local_sidereal_time(
            greenwich_sidereal_time(date.mjd1900(), date.year, 9.529820743),
            -1.826111,
        );
        assert_relative_eq!(lst, 10.0, epsilon = 1e-6);
        assert_relative_eq!(clock.lst_to_local_time(10.0), 9.529820743, epsilon = 1e-6);

        let shifted = SiderealClock::new(date.mjd1900(), date.year, -1.826111, 1.0);
        assert_relative_eq!(
            shifted.lst_to_ut(10.0),
            clock.lst_to_ut(10.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_to_epoch() {
        let date = CalendarDate::new(2023, 9, 30).unwrap();
        let time = TimeOfDay::new(12, 0, 30.5).unwrap();
        let epoch = to_epoch(&date, &time).unwrap();
        assert_relative_eq!(
            epoch.to_mjd_utc_days() - MJD_TO_MJD1900,
            date.mjd1900() + time.decimal_hours() / 24.0,
            epsilon = 1e-9
        );
    }
}
