//! # Ephemeris parameters
//!
//! [`EphemerisParams`] gathers the numerical settings of the iterative parts of the crate:
//!
//! - the Newton solver for Kepler's equation (`kepler_tolerance`, `kepler_max_iter`),
//! - the fixed-point refraction loop (`refraction_tolerance`, `refraction_max_iter`),
//! - the rise/set refinement of the Sun and the Moon (`sun_horizon_dip_deg`,
//!   `sun_refinement_iterations`, `moon_refinement_iterations`).
//!
//! The defaults reproduce the classic low-precision almanac settings. One refinement
//! iteration is one rising pass plus one setting pass.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sidereal::params::EphemerisParams;
//!
//! let params = EphemerisParams::builder()
//!     .kepler_tolerance(1e-12)
//!     .moon_refinement_iterations(5)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## See also
//!
//! * [`crate::ephemeris::Ephemeris::with_params`] – session using custom settings
use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, RADEG, SUN_HORIZON_DIP};
use crate::ephem_errors::EphemError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisParams {
    // --- Kepler solver ---
    /// Convergence threshold on `|E − e·sin E − M|`, radians
    pub kepler_tolerance: f64,
    pub kepler_max_iter: usize,

    // --- Refraction ---
    /// Convergence threshold between two successive corrections, radians
    pub refraction_tolerance: f64,
    pub refraction_max_iter: usize,

    // --- Rise / set ---
    /// Depression of the Sun's centre at rising and setting (refraction plus semi-diameter)
    pub sun_horizon_dip_deg: Degree,
    pub sun_refinement_iterations: usize,
    pub moon_refinement_iterations: usize,
}

impl EphemerisParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EphemerisParamsBuilder {
        EphemerisParamsBuilder::new()
    }
}

impl Default for EphemerisParams {
    fn default() -> Self {
        EphemerisParams {
            kepler_tolerance: 1.0e-9,
            kepler_max_iter: 100,

            refraction_tolerance: 1.0e-6,
            refraction_max_iter: 50,

            sun_horizon_dip_deg: SUN_HORIZON_DIP / RADEG,
            sun_refinement_iterations: 1,
            moon_refinement_iterations: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EphemerisParamsBuilder {
    params: EphemerisParams,
}

impl Default for EphemerisParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: EphemerisParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }
    pub fn refraction_tolerance(mut self, v: f64) -> Self {
        self.params.refraction_tolerance = v;
        self
    }
    pub fn refraction_max_iter(mut self, v: usize) -> Self {
        self.params.refraction_max_iter = v;
        self
    }
    pub fn sun_horizon_dip_deg(mut self, v: Degree) -> Self {
        self.params.sun_horizon_dip_deg = v;
        self
    }
    pub fn sun_refinement_iterations(mut self, v: usize) -> Self {
        self.params.sun_refinement_iterations = v;
        self
    }
    pub fn moon_refinement_iterations(mut self, v: usize) -> Self {
        self.params.moon_refinement_iterations = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder and produce an [`EphemerisParams`] instance.
    ///
    /// Return
    /// ------
    /// * The parameters, or [`EphemError::InvalidParameter`] when a tolerance is not
    ///   strictly positive, an iteration cap is zero or the Sun's horizon dip is negative
    ///   or not finite.
    pub fn build(self) -> Result<EphemerisParams, EphemError> {
        let p = &self.params;

        if !Self::gt0(p.kepler_tolerance) {
            return Err(EphemError::InvalidParameter(
                "kepler_tolerance must be > 0".into(),
            ));
        }
        if !Self::gt0(p.refraction_tolerance) {
            return Err(EphemError::InvalidParameter(
                "refraction_tolerance must be > 0".into(),
            ));
        }
        if !Self::ge0(p.sun_horizon_dip_deg) || !p.sun_horizon_dip_deg.is_finite() {
            return Err(EphemError::InvalidParameter(
                "sun_horizon_dip_deg must be a finite value >= 0".into(),
            ));
        }

        if p.kepler_max_iter == 0 {
            return Err(EphemError::InvalidParameter(
                "kepler_max_iter must be >= 1".into(),
            ));
        }
        if p.refraction_max_iter == 0 {
            return Err(EphemError::InvalidParameter(
                "refraction_max_iter must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for EphemerisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Ephemeris Parameters")?;
            writeln!(f, "--------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Kepler solver]")?;
            line!(
                "kepler_tolerance           = {:.1e}",
                self.kepler_tolerance,
                "Residual threshold, rad"
            )?;
            line!(
                "kepler_max_iter            = {}",
                self.kepler_max_iter,
                "Max Newton steps"
            )?;

            writeln!(f, "\n[Refraction]")?;
            line!(
                "refraction_tolerance       = {:.1e}",
                self.refraction_tolerance,
                "Fixed-point threshold, rad"
            )?;
            line!(
                "refraction_max_iter        = {}",
                self.refraction_max_iter,
                "Max fixed-point passes"
            )?;

            writeln!(f, "\n[Rise / set]")?;
            line!(
                "sun_horizon_dip_deg        = {:.4}°",
                self.sun_horizon_dip_deg,
                "Sun centre depression at the horizon"
            )?;
            line!(
                "sun_refinement_iterations  = {}",
                self.sun_refinement_iterations,
                "Rise + set passes for the Sun"
            )?;
            line!(
                "moon_refinement_iterations = {}",
                self.moon_refinement_iterations,
                "Rise + set passes for the Moon"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "EphemerisParams(kepler_tol={:.1e}, kepler_max_iter={}, refraction_tol={:.1e}, refraction_max_iter={}, sun_dip={:.4}°, sun_passes={}, moon_passes={})",
                self.kepler_tolerance,
                self.kepler_max_iter,
                self.refraction_tolerance,
                self.refraction_max_iter,
                self.sun_horizon_dip_deg,
                self.sun_refinement_iterations,
                self.moon_refinement_iterations,
            )
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EphemerisParams::new();
        assert_eq!(params, EphemerisParams::builder().build().unwrap());
        assert_eq!(params.kepler_tolerance, 1e-9);
        assert_eq!(params.kepler_max_iter, 100);
        assert_eq!(params.moon_refinement_iterations, 3);
        assert!((params.sun_horizon_dip_deg - 0.8333).abs() < 1e-4);
    }

    #[test]
    fn test_builder_overrides() {
        let params = EphemerisParams::builder()
            .kepler_tolerance(1e-12)
            .kepler_max_iter(20)
            .refraction_max_iter(5)
            .sun_refinement_iterations(2)
            .build()
            .unwrap();
        assert_eq!(params.kepler_tolerance, 1e-12);
        assert_eq!(params.kepler_max_iter, 20);
        assert_eq!(params.refraction_max_iter, 5);
        assert_eq!(params.sun_refinement_iterations, 2);
        assert_eq!(params.refraction_tolerance, 1e-6);
    }

    #[test]
    fn test_builder_rejects() {
        let bad = [
            EphemerisParams::builder().kepler_tolerance(0.0),
            EphemerisParams::builder().refraction_tolerance(f64::NAN),
            EphemerisParams::builder().kepler_max_iter(0),
            EphemerisParams::builder().refraction_max_iter(0),
            EphemerisParams::builder().sun_horizon_dip_deg(-1.0),
            EphemerisParams::builder().sun_horizon_dip_deg(f64::INFINITY),
        ];
        for builder in bad {
            assert!(matches!(
                builder.build(),
                Err(EphemError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_display() {
        let params = EphemerisParams::default();
        let short = format!("{params}");
        assert!(short.starts_with("EphemerisParams(kepler_tol=1.0e-9"));

        let long = format!("{params:#}");
        assert!(long.contains("[Rise / set]"));
        assert!(long.contains("moon_refinement_iterations = 3"));
    }
}
