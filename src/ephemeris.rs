//! # Ephemeris session
//!
//! [`Ephemeris`] is the calculator object handed to host applications. It owns:
//!
//! - the observer and the civil time context (zone, daylight saving, UTC date and time),
//! - lazily computed date quantities (day count, nutation and obliquity, precession
//!   matrices), each stamped with the date generation it was computed for,
//! - a *target* [`Position`] that body computations and manual setters overwrite and that
//!   transforms, corrections and rise/set solves read,
//! - the last Kepler solution, planet result and rise/set solution, for the getters.
//!
//! Every computation also returns its result, so callers can work with values and ignore
//! the target register entirely.
//!
//! ## Caching
//!
//! Changing the date bumps the generation counter; a cached quantity is recomputed when its
//! stamp differs from the current generation. Setting a value equal to the current one is a
//! no-op and keeps every cache. Time-of-day changes never invalidate the date caches.
//! [`CacheCounters`] reports how often each quantity was rebuilt.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sidereal::ephemeris::Ephemeris;
//! use sidereal::time::DstMode;
//!
//! let mut eph = Ephemeris::new();
//! eph.set_location(51.178889, -1.826111);
//! eph.set_dst_mode(DstMode::Off);
//! eph.set_date(2023, 9, 30).unwrap();
//! eph.set_time(12, 0, 0.0).unwrap();
//!
//! let sun = eph.sun().unwrap();
//! println!("Sun: RA {:.4} h, Dec {:.4}°", sun.position.equatorial.ra, sun.position.equatorial.dec);
//!
//! eph.sun_rise_set().unwrap();
//! println!("sunrise {:.3} h, sunset {:.3} h", eph.rise_time().unwrap(), eph.setting_time().unwrap());
//! ```
use hifitime::Epoch;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bodies::elements::ElementTable;
use crate::bodies::moon::{moon_position, MoonState};
use crate::bodies::planets::{planet_position, PlanetPosition};
use crate::bodies::sun::{sun_position, SunState};
use crate::bodies::{centuries_since_1900, Planet};
use crate::constants::{
    Degree, Hours, Meter, AU, DAYS_PER_CENTURY, EARTH_EQUATORIAL_RADIUS, FEET_PER_METER, MJD,
    MJD1900_J2000, RADEG,
};
use crate::coordinates::{self, normalize_hours, Ecliptic, Equatorial, Horizontal, Position};
use crate::earth_orientation::{EarthOrientation, Nutation, PrecessionMatrices};
use crate::ephem_errors::EphemError;
use crate::kepler::AnomalySolution;
use crate::observer::Observer;
use crate::params::EphemerisParams;
use crate::refraction::{self, Atmosphere};
use crate::rise_set::{self, RiseSet};
use crate::time::{self, CalendarDate, DstMode, SiderealClock, TimeOfDay};

/// A date-dependent value and the generation it was computed for.
#[derive(Debug, Clone, Copy)]
struct Stamped<T> {
    generation: u64,
    value: T,
}

/// Return the cached value when it belongs to `generation`, otherwise recompute it and count
/// the rebuild.
fn fetch<T: Copy>(
    slot: &mut Option<Stamped<T>>,
    generation: u64,
    rebuilds: &mut u64,
    compute: impl FnOnce() -> T,
) -> T {
    match slot {
        Some(stamped) if stamped.generation == generation => stamped.value,
        _ => {
            let value = compute();
            *slot = Some(Stamped { generation, value });
            *rebuilds += 1;
            value
        }
    }
}

/// How many times each cached quantity has been invalidated or rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCounters {
    /// Date changes that invalidated the date caches
    pub invalidations: u64,
    pub day_count: u64,
    pub orientation: u64,
    pub precession: u64,
}

/// A stateful ephemeris calculator for one observer and one instant.
///
/// See the [module documentation](self) for the caching rules.
#[derive(Debug, Clone)]
pub struct Ephemeris {
    params: EphemerisParams,
    observer: Observer,
    time_zone: Hours,
    dst_mode: Option<DstMode>,
    date: Option<CalendarDate>,
    time: TimeOfDay,

    generation: u64,
    counters: CacheCounters,
    day_count: Option<Stamped<MJD>>,
    orientation: Option<Stamped<EarthOrientation>>,
    precession: Option<Stamped<PrecessionMatrices>>,

    target: Position,
    horizontal_parallax: Degree,
    anomaly: Option<AnomalySolution>,
    planet: Option<PlanetPosition>,
    rise_set: Option<RiseSet>,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::with_params(EphemerisParams::default())
    }
}

impl Ephemeris {
    /// A session at the default site (51.178889°N, 1.826111°W), GMT, no daylight saving mode
    /// selected and no date.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: EphemerisParams) -> Self {
        Ephemeris {
            params,
            observer: Observer::default(),
            time_zone: 0.0,
            dst_mode: None,
            date: None,
            time: TimeOfDay::midnight(),
            generation: 0,
            counters: CacheCounters::default(),
            day_count: None,
            orientation: None,
            precession: None,
            target: Position::from_equatorial(Equatorial::new(0.0, 0.0)),
            horizontal_parallax: 0.0,
            anomaly: None,
            planet: None,
            rise_set: None,
        }
    }

    /// Check that the host distinguishes double from single precision.
    pub fn begin(&self) -> Result<(), EphemError> {
        if f64::MANTISSA_DIGITS <= f32::MANTISSA_DIGITS {
            return Err(EphemError::UnsupportedPrecision);
        }
        Ok(())
    }

    pub fn params(&self) -> &EphemerisParams {
        &self.params
    }

    pub fn cache_counters(&self) -> CacheCounters {
        self.counters
    }

    // ---------------------------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------------------------

    /// Set the time zone offset in hours east of Greenwich, in [-12, 12].
    pub fn set_time_zone(&mut self, zone: Hours) -> Result<(), EphemError> {
        if !(-12.0..=12.0).contains(&zone) {
            return Err(EphemError::InvalidTimeZone(zone));
        }
        self.time_zone = zone;
        Ok(())
    }

    pub fn set_dst_mode(&mut self, mode: DstMode) {
        self.dst_mode = Some(mode);
    }

    /// Set latitude and east longitude in decimal degrees.
    pub fn set_location(&mut self, latitude: Degree, longitude: Degree) {
        if self.observer.latitude == latitude && self.observer.longitude == longitude {
            return;
        }
        self.observer.latitude = latitude;
        self.observer.longitude = longitude;
        self.rise_set = None;
    }

    pub fn set_elevation_m(&mut self, height: Meter) {
        self.observer.elevation = height;
    }

    pub fn set_elevation_ft(&mut self, height: f64) {
        self.observer.elevation = height / FEET_PER_METER;
    }

    /// Set the UTC date.
    ///
    /// Return
    /// ------
    /// * `Ok(())` when the date is valid; a changed date invalidates every date cache. An
    ///   invalid date leaves the session untouched.
    pub fn set_date(&mut self, year: i32, month: u8, day: u8) -> Result<(), EphemError> {
        let date = CalendarDate::new(year, month, day)?;
        if self.date == Some(date) {
            return Ok(());
        }
        self.date = Some(date);
        self.generation += 1;
        self.counters.invalidations += 1;
        debug!("date set to {year}-{month:02}-{day:02}, generation {}", self.generation);
        Ok(())
    }

    /// Set the UTC time of day.
    pub fn set_time(&mut self, hour: u8, minute: u8, second: f64) -> Result<(), EphemError> {
        self.time = TimeOfDay::new(hour, minute, second)?;
        Ok(())
    }

    /// Set the UTC time from a local civil time.
    ///
    /// The date and a daylight saving mode must already be set. The UTC hour wraps into
    /// [0, 24) without changing the date.
    pub fn set_local_time(&mut self, hour: u8, minute: u8, second: f64) -> Result<(), EphemError> {
        if self.date.is_none() {
            return Err(EphemError::MissingDate);
        }
        if self.dst_mode.is_none() {
            return Err(EphemError::MissingDstMode);
        }
        let local = TimeOfDay::new(hour, minute, second)?;
        self.time = local.shifted(-self.civil_offset());
        Ok(())
    }

    /// Set the target to a manual right ascension (hours) and declination (degrees).
    pub fn set_ra_dec(&mut self, ra: Hours, dec: Degree) {
        self.target = Position::from_equatorial(Equatorial::new(ra, dec));
    }

    /// Set the horizontal view of the target, keeping its equatorial view.
    pub fn set_alt_az(&mut self, altitude: Degree, azimuth: Degree) {
        self.target.horizontal = Some(Horizontal::new(altitude, azimuth));
    }

    /// Set the ecliptic view of the target, keeping its equatorial view.
    pub fn set_ecliptic(&mut self, longitude: Degree, latitude: Degree) {
        self.target.ecliptic = Some(Ecliptic::new(longitude, latitude));
    }

    /// Override the Moon's equatorial horizontal parallax used by
    /// [`lunar_parallax`](Self::lunar_parallax).
    pub fn set_equatorial_horizontal_parallax(&mut self, hp: Degree) {
        self.horizontal_parallax = hp;
    }

    // ---------------------------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------------------------

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn date(&self) -> Option<CalendarDate> {
        self.date
    }

    pub fn time_zone(&self) -> Hours {
        self.time_zone
    }

    /// Daylight saving offset in effect, 0 or 1 hour.
    pub fn dst_offset(&self) -> Hours {
        self.dst_mode
            .map_or(0.0, |mode| mode.offset(self.date.as_ref()))
    }

    fn civil_offset(&self) -> Hours {
        self.time_zone + self.dst_offset()
    }

    /// UTC time of day in decimal hours.
    pub fn utc_hours(&self) -> Hours {
        self.time.decimal_hours()
    }

    /// Local civil time in decimal hours, [0, 24).
    pub fn local_time(&self) -> Hours {
        normalize_hours(self.utc_hours() + self.civil_offset())
    }

    fn require_date(&self) -> Result<CalendarDate, EphemError> {
        self.date.ok_or(EphemError::MissingDate)
    }

    /// Day count since 1899-12-31 12:00 UT at 0h of the current date.
    pub fn mjd(&mut self) -> Result<MJD, EphemError> {
        let date = self.require_date()?;
        Ok(fetch(
            &mut self.day_count,
            self.generation,
            &mut self.counters.day_count,
            || date.mjd1900(),
        ))
    }

    /// Julian centuries since J2000.0 at the current instant.
    pub fn julian_centuries_j2000(&mut self) -> Result<f64, EphemError> {
        let mjd = self.mjd()?;
        Ok((mjd + self.utc_hours() / 24.0 - MJD1900_J2000) / DAYS_PER_CENTURY)
    }

    pub fn greenwich_sidereal_time(&mut self) -> Result<Hours, EphemError> {
        let date = self.require_date()?;
        let mjd = self.mjd()?;
        Ok(time::greenwich_sidereal_time(mjd, date.year, self.utc_hours()))
    }

    pub fn local_sidereal_time(&mut self) -> Result<Hours, EphemError> {
        let gst = self.greenwich_sidereal_time()?;
        Ok(time::local_sidereal_time(gst, self.observer.longitude))
    }

    /// Sidereal clock of the current date, site and civil offset.
    pub fn sidereal_clock(&mut self) -> Result<SiderealClock, EphemError> {
        let date = self.require_date()?;
        let mjd = self.mjd()?;
        Ok(SiderealClock::new(
            mjd,
            date.year,
            self.observer.longitude,
            self.civil_offset(),
        ))
    }

    /// Local civil time at which the local sidereal time is `lst`.
    pub fn lst_to_local_time(&mut self, lst: Hours) -> Result<Hours, EphemError> {
        Ok(self.sidereal_clock()?.lst_to_local_time(lst))
    }

    /// UT at which the local sidereal time is `lst`.
    pub fn lst_to_utc(&mut self, lst: Hours) -> Result<Hours, EphemError> {
        Ok(self.sidereal_clock()?.lst_to_ut(lst))
    }

    /// The current UTC date and time as a [`hifitime::Epoch`].
    pub fn epoch(&self) -> Result<Epoch, EphemError> {
        time::to_epoch(&self.require_date()?, &self.time)
    }

    // ---------------------------------------------------------------------------------------
    // Earth orientation
    // ---------------------------------------------------------------------------------------

    pub fn earth_orientation(&mut self) -> Result<EarthOrientation, EphemError> {
        let mjd = self.mjd()?;
        Ok(fetch(
            &mut self.orientation,
            self.generation,
            &mut self.counters.orientation,
            || EarthOrientation::at(mjd),
        ))
    }

    pub fn nutation(&mut self) -> Result<Nutation, EphemError> {
        Ok(self.earth_orientation()?.nutation)
    }

    /// True obliquity of the ecliptic, degrees.
    pub fn obliquity(&mut self) -> Result<Degree, EphemError> {
        Ok(self.earth_orientation()?.obliquity)
    }

    pub fn mean_obliquity(&mut self) -> Result<Degree, EphemError> {
        Ok(self.earth_orientation()?.mean_obliquity)
    }

    pub fn precession(&mut self) -> Result<PrecessionMatrices, EphemError> {
        let mjd = self.mjd()?;
        Ok(fetch(
            &mut self.precession,
            self.generation,
            &mut self.counters.precession,
            || PrecessionMatrices::at(mjd),
        ))
    }

    // ---------------------------------------------------------------------------------------
    // Target register
    // ---------------------------------------------------------------------------------------

    pub fn position(&self) -> &Position {
        &self.target
    }

    pub fn ra_dec(&self) -> Equatorial {
        self.target.equatorial
    }

    pub fn alt_az(&self) -> Option<Horizontal> {
        self.target.horizontal
    }

    pub fn ecliptic(&self) -> Option<Ecliptic> {
        self.target.ecliptic
    }

    pub fn equatorial_horizontal_parallax(&self) -> Degree {
        self.horizontal_parallax
    }

    pub fn true_anomaly(&self) -> Option<Degree> {
        self.anomaly.map(|a| a.true_anomaly_deg())
    }

    pub fn eccentric_anomaly(&self) -> Option<Degree> {
        self.anomaly.map(|a| a.eccentric_anomaly_deg())
    }

    /// Last planet computed, with its heliocentric coordinates.
    pub fn last_planet(&self) -> Option<&PlanetPosition> {
        self.planet.as_ref()
    }

    pub fn heliocentric_longitude(&self) -> Option<Degree> {
        self.planet.map(|p| p.heliocentric_longitude)
    }

    pub fn heliocentric_latitude(&self) -> Option<Degree> {
        self.planet.map(|p| p.heliocentric_latitude)
    }

    pub fn radius_vector(&self) -> Option<f64> {
        self.planet.map(|p| p.radius_vector)
    }

    pub fn earth_distance(&self) -> Option<f64> {
        self.planet.map(|p| p.earth_distance)
    }

    // ---------------------------------------------------------------------------------------
    // Transforms and corrections on the target
    // ---------------------------------------------------------------------------------------

    /// Altitude and azimuth of the target at the current instant.
    pub fn equatorial_to_horizontal(&mut self) -> Result<Horizontal, EphemError> {
        let lst = self.local_sidereal_time()?;
        let hz = coordinates::equatorial_to_horizontal(&self.target.equatorial, lst, &self.observer);
        self.target.horizontal = Some(hz);
        Ok(hz)
    }

    /// Right ascension and declination from the target's altitude and azimuth.
    pub fn horizontal_to_equatorial(&mut self) -> Result<Equatorial, EphemError> {
        let hz = self
            .target
            .horizontal
            .ok_or(EphemError::MissingCoordinates("horizontal"))?;
        let lst = self.local_sidereal_time()?;
        let eq = coordinates::horizontal_to_equatorial(&hz, lst, &self.observer);
        self.target.equatorial = eq;
        Ok(eq)
    }

    /// Equatorial place of the target's ecliptic coordinates, true obliquity of date.
    pub fn ecliptic_to_equatorial(&mut self) -> Result<Equatorial, EphemError> {
        let ecl = self
            .target
            .ecliptic
            .ok_or(EphemError::MissingCoordinates("ecliptic"))?;
        let obliquity = self.obliquity()?;
        let eq = coordinates::ecliptic_to_equatorial(&ecl, obliquity);
        self.target.equatorial = eq;
        Ok(eq)
    }

    pub fn equatorial_to_ecliptic(&mut self) -> Result<Ecliptic, EphemError> {
        let obliquity = self.obliquity()?;
        let ecl = coordinates::equatorial_to_ecliptic(&self.target.equatorial, obliquity);
        self.target.ecliptic = Some(ecl);
        Ok(ecl)
    }

    /// Precess the target from J2000.0 to the equinox of the current date.
    pub fn precess_from_j2000(&mut self) -> Result<Equatorial, EphemError> {
        let eq = self.precession()?.precess_from_j2000(&self.target.equatorial);
        self.target = Position::from_equatorial(eq);
        Ok(eq)
    }

    /// Precess the target from the equinox of the current date to J2000.0.
    pub fn precess_to_j2000(&mut self) -> Result<Equatorial, EphemError> {
        let eq = self.precession()?.precess_to_j2000(&self.target.equatorial);
        self.target = Position::from_equatorial(eq);
        Ok(eq)
    }

    /// Move the target (the Moon) to the observer's site, using the stored horizontal
    /// parallax.
    pub fn lunar_parallax(&mut self) -> Result<Equatorial, EphemError> {
        let lst = self.local_sidereal_time()?;
        let eq = refraction::lunar_parallax(
            &self.target.equatorial,
            lst,
            &self.observer,
            self.horizontal_parallax,
        );
        self.target.equatorial = eq;
        Ok(eq)
    }

    /// Refract the target's altitude.
    pub fn refract(&mut self, atmosphere: &Atmosphere) -> Result<Horizontal, EphemError> {
        let hz = self
            .target
            .horizontal
            .ok_or(EphemError::MissingCoordinates("horizontal"))?;
        let seen = refraction::refract(&hz, atmosphere, &self.params);
        self.target.horizontal = Some(seen);
        Ok(seen)
    }

    /// Remove refraction from the target's altitude.
    pub fn unrefract(&mut self, atmosphere: &Atmosphere) -> Result<Horizontal, EphemError> {
        let hz = self
            .target
            .horizontal
            .ok_or(EphemError::MissingCoordinates("horizontal"))?;
        let geometric = refraction::unrefract(&hz, atmosphere);
        self.target.horizontal = Some(geometric);
        Ok(geometric)
    }

    // ---------------------------------------------------------------------------------------
    // Bodies
    // ---------------------------------------------------------------------------------------

    pub fn sun(&mut self) -> Result<SunState, EphemError> {
        let mjd = self.mjd()?;
        let orientation = self.earth_orientation()?;
        let sun = sun_position(mjd, self.utc_hours(), &orientation, &self.params)?;
        self.target = sun.position;
        self.anomaly = Some(sun.anomaly);
        Ok(sun)
    }

    pub fn moon(&mut self) -> Result<MoonState, EphemError> {
        let mjd = self.mjd()?;
        let orientation = self.earth_orientation()?;
        let moon = moon_position(mjd, self.utc_hours(), &orientation);
        self.target = moon.position;
        self.horizontal_parallax = moon.horizontal_parallax;
        Ok(moon)
    }

    pub fn planet(&mut self, planet: Planet) -> Result<PlanetPosition, EphemError> {
        let mjd = self.mjd()?;
        let orientation = self.earth_orientation()?;
        let pos = planet_position(planet, mjd, self.utc_hours(), &orientation, &self.params)?;
        self.target = pos.position;
        self.anomaly = Some(pos.anomaly);
        self.planet = Some(pos);
        Ok(pos)
    }

    pub fn mercury(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Mercury)
    }

    pub fn venus(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Venus)
    }

    pub fn mars(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Mars)
    }

    pub fn jupiter(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Jupiter)
    }

    pub fn saturn(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Saturn)
    }

    pub fn uranus(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Uranus)
    }

    pub fn neptune(&mut self) -> Result<PlanetPosition, EphemError> {
        self.planet(Planet::Neptune)
    }

    /// Element `column` (1..=9) of planet `index` (1..=7) at the current instant.
    ///
    /// See also
    /// --------
    /// * [`PlanetElements::column`](crate::bodies::elements::PlanetElements::column) – column numbering
    pub fn orbital_element(&mut self, index: u8, column: usize) -> Result<f64, EphemError> {
        let planet = Planet::try_from(index)?;
        let mjd = self.mjd()?;
        ElementTable::at(centuries_since_1900(mjd, self.utc_hours()))
            .get(planet)
            .column(column)
            .ok_or_else(|| {
                EphemError::InvalidParameter(format!("element column {column} out of 1..=9"))
            })
    }

    /// Illuminated fraction of the Moon's disk, in percent.
    ///
    /// The Moon and the Sun are evaluated afresh; the target register is left untouched.
    ///
    /// Details
    /// -------
    /// With the geocentric elongation `ψ`, the Earth-Moon distance `Δ` (from the horizontal
    /// parallax) and the Earth-Sun distance `R`:
    ///
    /// ```text
    /// i = atan2( R·sin ψ, Δ − R·cos ψ )
    /// k = (1 + cos i) / 2
    /// ```
    pub fn lunar_illumination(&mut self) -> Result<f64, EphemError> {
        let mjd = self.mjd()?;
        let ut = self.utc_hours();
        let orientation = self.earth_orientation()?;
        let sun = sun_position(mjd, ut, &orientation, &self.params)?;
        let moon = moon_position(mjd, ut, &orientation);

        let (s, m) = (sun.position.equatorial, moon.position.equatorial);
        let cos_psi = s.dec_radians().sin() * m.dec_radians().sin()
            + s.dec_radians().cos() * m.dec_radians().cos() * (s.ra_radians() - m.ra_radians()).cos();
        let psi = cos_psi.clamp(-1.0, 1.0).acos();

        let delta = EARTH_EQUATORIAL_RADIUS / 1000.0 / (moon.horizontal_parallax * RADEG).sin();
        let r = sun.radius_vector * AU;
        let phase_angle = (r * psi.sin()).atan2(delta - r * psi.cos());

        Ok(100.0 * (1.0 + phase_angle.cos()) / 2.0)
    }

    // ---------------------------------------------------------------------------------------
    // Rise and set
    // ---------------------------------------------------------------------------------------

    /// Horizon crossings of the target for a vertical displacement `dip` in degrees.
    pub fn rise_set(&mut self, dip: Degree) -> Result<RiseSet, EphemError> {
        let rs = rise_set::solve_rise_set(&self.target.equatorial, &self.observer, dip)?;
        self.rise_set = Some(rs);
        Ok(rs)
    }

    pub fn sun_rise_set(&mut self) -> Result<RiseSet, EphemError> {
        let mjd = self.mjd()?;
        let clock = self.sidereal_clock()?;
        let rs = rise_set::sun_rise_set(mjd, &clock, &self.observer, &self.params)?;
        self.rise_set = Some(rs);
        Ok(rs)
    }

    pub fn moon_rise_set(&mut self) -> Result<RiseSet, EphemError> {
        let mjd = self.mjd()?;
        let clock = self.sidereal_clock()?;
        let rs = rise_set::moon_rise_set(mjd, &clock, &self.observer, &self.params)?;
        self.rise_set = Some(rs);
        Ok(rs)
    }

    fn require_rise_set(&self) -> Result<RiseSet, EphemError> {
        self.rise_set.ok_or(EphemError::MissingRiseSet)
    }

    /// Local civil time of the last computed rising.
    pub fn rise_time(&mut self) -> Result<Hours, EphemError> {
        let rs = self.require_rise_set()?;
        Ok(rs.rise_time(&self.sidereal_clock()?))
    }

    /// Local civil time of the last computed setting.
    pub fn setting_time(&mut self) -> Result<Hours, EphemError> {
        let rs = self.require_rise_set()?;
        Ok(rs.set_time(&self.sidereal_clock()?))
    }

    pub fn rise_azimuth(&self) -> Result<Degree, EphemError> {
        Ok(self.require_rise_set()?.rise_azimuth)
    }

    pub fn set_azimuth(&self) -> Result<Degree, EphemError> {
        Ok(self.require_rise_set()?.set_azimuth)
    }

    pub fn sunrise_time(&mut self) -> Result<Hours, EphemError> {
        self.rise_time()
    }

    pub fn sunset_time(&mut self) -> Result<Hours, EphemError> {
        self.setting_time()
    }

    pub fn moonrise_time(&mut self) -> Result<Hours, EphemError> {
        self.rise_time()
    }

    pub fn moonset_time(&mut self) -> Result<Hours, EphemError> {
        self.setting_time()
    }
}
