use std::fmt;

use crate::constants::{Degree, Hours};
use crate::ephem_errors::EphemError;

/// Combine degrees, minutes and seconds into decimal degrees.
///
/// The result is negative if any of the three components is negative, so that
/// `-0° 30' 0"` can be written as `decimal_degrees(0, -30, 0.0)`.
///
/// Arguments
/// ---------
/// * `degrees`, `minutes`, `seconds`: the sexagesimal components
///
/// Return
/// ------
/// * The signed angle in decimal degrees. The same function converts hours, minutes and
///   seconds into decimal hours.
pub fn decimal_degrees(degrees: i32, minutes: i32, seconds: f64) -> Degree {
    let negative = degrees < 0 || minutes < 0 || seconds < 0.0;
    let value = degrees.unsigned_abs() as f64
        + minutes.unsigned_abs() as f64 / 60.0
        + seconds.abs() / 3600.0;
    if negative {
        -value
    } else {
        value
    }
}

/// Split a whitespace separated sexagesimal field triple and parse each part.
fn split_sexagesimal(input: &str) -> Result<(&str, f64, f64), EphemError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [head, minutes, seconds] = parts.as_slice() else {
        return Err(EphemError::ParseAngle(format!(
            "expected three fields, got '{input}'"
        )));
    };
    let m: f64 = minutes
        .parse()
        .map_err(|_| EphemError::ParseAngle(format!("invalid minutes in '{input}'")))?;
    let s: f64 = seconds
        .parse()
        .map_err(|_| EphemError::ParseAngle(format!("invalid seconds in '{input}'")))?;
    if !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return Err(EphemError::ParseAngle(format!(
            "minutes and seconds must be in [0, 60) in '{input}'"
        )));
    }
    Ok((*head, m, s))
}

/// Parse a right ascension written as `HH MM SS.SS` into decimal hours.
pub fn parse_ra(ra: &str) -> Result<Hours, EphemError> {
    let (h, m, s) = split_sexagesimal(ra)?;
    let h: f64 = h
        .parse()
        .map_err(|_| EphemError::ParseAngle(format!("invalid hours in '{ra}'")))?;
    if !(0.0..24.0).contains(&h) {
        return Err(EphemError::ParseAngle(format!(
            "hours must be in [0, 24) in '{ra}'"
        )));
    }
    Ok(h + m / 60.0 + s / 3600.0)
}

/// Parse a declination written as `±DD MM SS.S` into decimal degrees.
///
/// The sign is read from the degree field, so `-00 30 00` is half a degree south.
pub fn parse_dec(dec: &str) -> Result<Degree, EphemError> {
    let (d, m, s) = split_sexagesimal(dec)?;
    let sign = if d.starts_with('-') { -1.0 } else { 1.0 };
    let d: f64 = d
        .trim_start_matches(&['-', '+'][..])
        .parse()
        .map_err(|_| EphemError::ParseAngle(format!("invalid degrees in '{dec}'")))?;
    let value = d + m / 60.0 + s / 3600.0;
    if value > 90.0 {
        return Err(EphemError::ParseAngle(format!(
            "declination beyond ±90° in '{dec}'"
        )));
    }
    Ok(sign * value)
}

/// A decimal angle (or hour value) split into sexagesimal parts for display.
///
/// `Display` renders `-12° 30' 15.00"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl From<f64> for Dms {
    fn from(value: f64) -> Self {
        let negative = value < 0.0;
        let abs = value.abs();
        let mut degrees = abs.trunc() as u32;
        let rest = (abs - degrees as f64) * 60.0;
        let mut minutes = rest.trunc() as u32;
        let mut seconds = (rest - minutes as f64) * 60.0;

        // carry the rounding of the printed seconds upward
        if seconds >= 59.995 {
            seconds = 0.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees += 1;
        }

        Dms {
            negative,
            degrees,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{}° {:02}' {:05.2}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decimal_degrees() {
        assert_relative_eq!(decimal_degrees(51, 10, 44.0), 51.178888888888885, epsilon = 1e-12);
        assert_relative_eq!(decimal_degrees(-1, 49, 34.0), -1.8261111111111112, epsilon = 1e-12);
        assert_relative_eq!(decimal_degrees(0, -30, 0.0), -0.5, epsilon = 1e-12);
        assert_relative_eq!(decimal_degrees(0, 0, -36.0), -0.01, epsilon = 1e-12);
        assert_eq!(decimal_degrees(0, 0, 0.0), 0.0);
    }

    #[test]
    fn test_parse_ra() {
        assert_relative_eq!(parse_ra("22 52 23.37").unwrap(), 22.873158333333333, epsilon = 1e-12);
        assert_relative_eq!(parse_ra("04 41 04.77").unwrap(), 4.684658333333333, epsilon = 1e-12);
        assert!(parse_ra("1 2 3.4.5").is_err());
        assert!(parse_ra("1 2").is_err());
        assert!(parse_ra("25 00 00").is_err());
    }

    #[test]
    fn test_parse_dec() {
        assert_relative_eq!(parse_dec("-00 30 14.2").unwrap(), -0.5039444444444444, epsilon = 1e-12);
        assert_relative_eq!(parse_dec("+13 55 42.7").unwrap(), 13.928527777777777, epsilon = 1e-12);
        assert_relative_eq!(parse_dec("89 15 50.2").unwrap(), 89.26394444444445, epsilon = 1e-12);
        assert!(parse_dec("89 15").is_err());
        assert!(parse_dec("91 00 00").is_err());
    }

    #[test]
    fn test_dms_display() {
        assert_eq!(Dms::from(-12.504166666666666).to_string(), "-12° 30' 15.00\"");
        assert_eq!(Dms::from(51.178889).to_string(), "51° 10' 44.00\"");
        assert_eq!(Dms::from(29.999999).to_string(), "30° 00' 00.00\"");
    }
}
