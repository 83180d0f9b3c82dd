use thiserror::Error;

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("Invalid year {0}: the calendar has no year zero")]
    InvalidYear(i32),

    #[error("Invalid month {0}: expected 1..=12")]
    InvalidMonth(u8),

    #[error("Invalid day {day} for {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },

    #[error("Date 1582-10-{0:02} falls inside the Julian/Gregorian calendar gap")]
    CalendarGap(u8),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid time zone offset {0} h: expected -12..=12")]
    InvalidTimeZone(f64),

    #[error("No UTC date has been set")]
    MissingDate,

    #[error("No daylight saving mode has been selected")]
    MissingDstMode,

    #[error("Invalid planet index {0}: expected 1 (Mercury) ..= 7 (Neptune)")]
    InvalidPlanet(u8),

    #[error("Kepler solver did not converge for e = {eccentricity} after {iterations} iterations")]
    KeplerNoConvergence { eccentricity: f64, iterations: usize },

    #[error("Body is circumpolar: it never sets at this latitude")]
    Circumpolar,

    #[error("Body never rises at this latitude")]
    NeverRises,

    #[error("No rising and setting times have been computed")]
    MissingRiseSet,

    #[error("No {0} coordinates are available")]
    MissingCoordinates(&'static str),

    #[error("Invalid ephemeris parameter: {0}")]
    InvalidParameter(String),

    #[error("Unable to parse angle: {0}")]
    ParseAngle(String),

    #[error("Double precision floating point is not distinct from single precision on this target")]
    UnsupportedPrecision,

    #[error("Unable to build an epoch: {0}")]
    InvalidEpoch(#[from] hifitime::HifitimeError),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            (InvalidYear(a), InvalidYear(b)) => a == b,
            (InvalidMonth(a), InvalidMonth(b)) => a == b,
            (
                InvalidDay {
                    year: y1,
                    month: m1,
                    day: d1,
                },
                InvalidDay {
                    year: y2,
                    month: m2,
                    day: d2,
                },
            ) => y1 == y2 && m1 == m2 && d1 == d2,
            (CalendarGap(a), CalendarGap(b)) => a == b,
            (InvalidTime(a), InvalidTime(b)) => a == b,
            (InvalidTimeZone(a), InvalidTimeZone(b)) => a == b,
            (InvalidPlanet(a), InvalidPlanet(b)) => a == b,
            (
                KeplerNoConvergence {
                    eccentricity: e1,
                    iterations: i1,
                },
                KeplerNoConvergence {
                    eccentricity: e2,
                    iterations: i2,
                },
            ) => e1 == e2 && i1 == i2,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (ParseAngle(a), ParseAngle(b)) => a == b,

            // hifitime errors are compared by variant only
            (InvalidEpoch(_), InvalidEpoch(_)) => true,

            (MissingDate, MissingDate) => true,
            (MissingDstMode, MissingDstMode) => true,
            (Circumpolar, Circumpolar) => true,
            (NeverRises, NeverRises) => true,
            (MissingRiseSet, MissingRiseSet) => true,
            (MissingCoordinates(a), MissingCoordinates(b)) => a == b,
            (UnsupportedPrecision, UnsupportedPrecision) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod ephem_errors_test {
    use super::*;

    fn parse_planet(index: u8) -> Result<u8, EphemError> {
        if (1..=7).contains(&index) {
            Ok(index)
        } else {
            Err(EphemError::InvalidPlanet(index))
        }
    }

    fn first_outer(indices: &[u8]) -> Result<u8, EphemError> {
        for &index in indices {
            if parse_planet(index)? >= 5 {
                return Ok(index);
            }
        }
        Err(EphemError::InvalidParameter("no outer planet".into()))
    }

    #[test]
    fn test_errors_move_through_results() {
        assert_eq!(first_outer(&[2, 6]), Ok(6));
        let err = first_outer(&[3, 9, 5]).unwrap_err();
        assert_eq!(err, EphemError::InvalidPlanet(9));
        assert_ne!(err, EphemError::InvalidPlanet(8));
        assert_eq!(err.to_string(), EphemError::InvalidPlanet(9).to_string());
        assert_eq!(
            first_outer(&[1]),
            Err(EphemError::InvalidParameter("no outer planet".into()))
        );
    }
}
