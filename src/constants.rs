//! # Constants and type definitions for Sidereal
//!
//! This module centralizes the **conversion factors**, **epochs** and **common type aliases**
//! used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians, hours ↔ radians)
//! - Sidereal/solar rate factors used by the sidereal-time routines
//! - The 1900-based day count used by every body model, and its J2000.0 value
//! - Earth shape and distance constants used by parallax, illumination and light-time
//!
//! The day count used everywhere in this crate starts at 1899-12-31 12:00 UT
//! (JD 2415020.0), so that the value at 0h of 1900-01-01 is `0.5`.

// -------------------------------------------------------------------------------------------------
// Angles
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours of right ascension → degrees
pub const HOURS_TO_DEG: f64 = 15.0;

/// Arcseconds per degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Hours in a Julian century, used to add the time of day to a century count
pub const HOURS_PER_CENTURY: f64 = 8.766e5;

/// Day count (1900 epoch) of J2000.0, i.e. 2000-01-01 12:00 UT
pub const MJD1900_J2000: f64 = 36525.0;

/// Offset between the standard MJD (epoch 1858-11-17) and the 1900-based day count
pub const MJD_TO_MJD1900: f64 = 15019.5;

/// Sentinel returned by the raw day-count routine for dates inside the 1582 calendar reform gap
pub const MJD_OUT_OF_CALENDAR: f64 = -9_999_999.0;

/// Mean solar → sidereal rate
pub const SIDEREAL_PER_SOLAR: f64 = 1.002737908;

/// Sidereal → mean solar rate
pub const SOLAR_PER_SIDEREAL: f64 = 0.9972695677;

// -------------------------------------------------------------------------------------------------
// Earth, Sun and light
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Earth equatorial radius in meters used by the parallax reduction
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_140.0;

/// Polar to equatorial axis ratio of the reference ellipsoid
pub const EARTH_AXIS_RATIO: f64 = 0.996647;

/// Light travel time in days per astronomical unit
pub const LIGHT_TIME_PER_AU: f64 = 5.775518e-3;

/// Feet per meter
pub const FEET_PER_METER: f64 = 3.2808;

/// Inches of mercury → hectopascal
pub const INHG_TO_HPA: f64 = 33.8639;

/// Standard horizon dip for the Sun (refraction + semi-diameter), in radians
pub const SUN_HORIZON_DIP: f64 = 1.454441e-2;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Time of day or right ascension in decimal hours
pub type Hours = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;

/// Day count from 1899-12-31 12:00 UT (days)
pub type MJD = f64;
