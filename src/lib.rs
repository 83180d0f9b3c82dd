//! # sidereal
//!
//! A compact, low-precision ephemeris engine. Given an observer, a UTC date and time, and a
//! civil time context, it computes:
//!
//! - sidereal times and conversions between civil and sidereal time ([`time`]),
//! - coordinate transforms between the equatorial, horizontal and ecliptic frames
//!   ([`coordinates`]),
//! - nutation, obliquity and precession between J2000.0 and the date ([`earth_orientation`]),
//! - the apparent places of the Sun, the Moon and the planets Mercury to Neptune ([`bodies`]),
//! - refraction and lunar parallax corrections ([`refraction`]),
//! - rising and setting times and azimuths ([`rise_set`]).
//!
//! The accuracy target is about one arcminute, which is what a pocket almanac needs.
//!
//! [`Ephemeris`] ties everything together as a stateful session with lazily cached date
//! quantities; the free functions of each module can also be used directly.
//!
//! ```rust,no_run
//! use sidereal::{DstMode, Ephemeris};
//!
//! let mut eph = Ephemeris::new();
//! eph.set_time_zone(-5.0).unwrap();
//! eph.set_dst_mode(DstMode::Auto);
//! eph.set_location(40.7128, -74.0060);
//! eph.set_date(2023, 9, 30).unwrap();
//! eph.set_local_time(21, 0, 0.0).unwrap();
//!
//! let mars = eph.mars().unwrap();
//! let hz = eph.equatorial_to_horizontal().unwrap();
//! println!("{}: alt {:.2}°, az {:.2}°", mars.planet, hz.altitude, hz.azimuth);
//! ```
pub mod bodies;
pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod earth_orientation;
pub mod ephem_errors;
pub mod ephemeris;
pub mod kepler;
pub mod observer;
pub mod params;
pub mod ref_system;
pub mod refraction;
pub mod rise_set;
pub mod time;

pub use bodies::Planet;
pub use coordinates::{Ecliptic, Equatorial, Horizontal, Position};
pub use ephem_errors::EphemError;
pub use ephemeris::Ephemeris;
pub use observer::Observer;
pub use params::EphemerisParams;
pub use refraction::Atmosphere;
pub use time::DstMode;
