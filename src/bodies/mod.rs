//! # Body models
//!
//! Low-precision analytic theories for the Sun ([`sun`]), the Moon ([`moon`]) and the seven
//! planets from Mercury to Neptune ([`planets`], fed by the element table in [`elements`]).
//!
//! Every model takes the 1900-based day count of the date at 0h UT plus the UT hour of day,
//! and the [`EarthOrientation`](crate::earth_orientation::EarthOrientation) of that date,
//! and returns an explicit result value. Nothing is cached here; the
//! [`Ephemeris`](crate::ephemeris::Ephemeris) session owns the caches.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, DAYS_PER_CENTURY, HOURS_PER_CENTURY, MJD};
use crate::ephem_errors::EphemError;

pub mod elements;
pub mod moon;
pub mod planets;
pub mod sun;

/// Julian centuries since 1900.0 at `ut` hours of the day `mjd`.
pub(crate) fn centuries_since_1900(mjd: MJD, ut: Hours) -> f64 {
    mjd / DAYS_PER_CENTURY + ut / HOURS_PER_CENTURY
}

/// `360 * frac(x)`: the fractional revolutions of a mean motion, in degrees.
pub(crate) fn turn_deg(x: f64) -> Degree {
    360.0 * (x - x.floor())
}

/// The planets handled by [`planets::planet_position`], numbered outward from the Sun with
/// the Earth skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury = 1,
    Venus = 2,
    Mars = 3,
    Jupiter = 4,
    Saturn = 5,
    Uranus = 6,
    Neptune = 7,
}

impl Planet {
    pub const ALL: [Planet; 7] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// Zero-based row of the planet in the element table.
    pub fn index(&self) -> usize {
        *self as usize - 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    /// Mercury and Venus orbit inside the Earth's orbit.
    pub fn is_inferior(&self) -> bool {
        matches!(self, Planet::Mercury | Planet::Venus)
    }
}

impl TryFrom<u8> for Planet {
    type Error = EphemError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Planet::Mercury),
            2 => Ok(Planet::Venus),
            3 => Ok(Planet::Mars),
            4 => Ok(Planet::Jupiter),
            5 => Ok(Planet::Saturn),
            6 => Ok(Planet::Uranus),
            7 => Ok(Planet::Neptune),
            other => Err(EphemError::InvalidPlanet(other)),
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;

    #[test]
    fn test_planet_numbering() {
        for (i, planet) in Planet::ALL.iter().enumerate() {
            assert_eq!(planet.index(), i);
            assert_eq!(Planet::try_from(i as u8 + 1), Ok(*planet));
        }
        assert_eq!(Planet::try_from(0), Err(EphemError::InvalidPlanet(0)));
        assert_eq!(Planet::try_from(8), Err(EphemError::InvalidPlanet(8)));
        assert_eq!(Planet::Saturn.to_string(), "Saturn");
        assert!(Planet::Venus.is_inferior());
        assert!(!Planet::Mars.is_inferior());
    }

    #[test]
    fn test_turn_deg() {
        assert_eq!(turn_deg(2.25), 90.0);
        assert_eq!(turn_deg(-0.25), 270.0);
        assert_eq!(centuries_since_1900(36525.0, 0.0), 1.0);
    }
}
