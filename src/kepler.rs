use std::cell::Cell;

use log::warn;
use roots::{find_root_newton_raphson, SearchError, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Radian, DPI, RADEG};
use crate::ephem_errors::EphemError;

/// Return the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Solution of Kepler's equation for one mean anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySolution {
    /// Mean anomaly reduced to [0, 2π)
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    /// True anomaly in (-π, π]
    pub true_anomaly: Radian,
    /// Newton steps taken after the initial guess
    pub iterations: usize,
}

impl AnomalySolution {
    pub fn eccentric_anomaly_deg(&self) -> Degree {
        self.eccentric_anomaly / RADEG
    }

    pub fn true_anomaly_deg(&self) -> Degree {
        self.true_anomaly / RADEG
    }
}

/// Solve Kepler's equation `E − e·sin E = M` for an elliptical orbit.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly in degrees, any range
/// * `eccentricity`: orbital eccentricity, in [0, 1)
/// * `tolerance`: convergence threshold on the residual, in radians
/// * `max_iter`: maximum number of Newton steps
///
/// Return
/// ------
/// * The eccentric and true anomalies, or [`EphemError::KeplerNoConvergence`] when the
///   iteration cap is reached.
///
/// Details
/// -------
/// Newton-Raphson starts from `E₀ = M` with derivative `1 − e·cos E`. The true anomaly is
///
/// ```text
/// ν = 2·atan( √((1+e)/(1−e)) · tan(E/2) )
/// ```
///
/// For a circular orbit the first residual is already zero, so `E = M` exactly.
pub fn solve_anomaly(
    mean_anomaly: Degree,
    eccentricity: f64,
    tolerance: f64,
    max_iter: usize,
) -> Result<AnomalySolution, EphemError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(EphemError::InvalidParameter(format!(
            "eccentricity must be in [0, 1), got {eccentricity}"
        )));
    }

    let m = principal_angle(mean_anomaly * RADEG);
    let evaluations = Cell::new(0usize);

    let f = |e_anom: f64| -> f64 {
        evaluations.set(evaluations.get() + 1);
        e_anom - eccentricity * e_anom.sin() - m
    };
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    let mut convergency = SimpleConvergency {
        eps: tolerance,
        max_iter,
    };

    let eccentric_anomaly = match find_root_newton_raphson(m, &f, &df, &mut convergency) {
        Ok(root) => root,
        Err(SearchError::NoConvergency) | Err(SearchError::ZeroDerivative) => {
            warn!("Kepler solver stopped after {max_iter} iterations for e = {eccentricity}");
            return Err(EphemError::KeplerNoConvergence {
                eccentricity,
                iterations: max_iter,
            });
        }
        Err(err) => {
            return Err(EphemError::InvalidParameter(format!(
                "Kepler solver failed: {err}"
            )))
        }
    };

    let half = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt() * (eccentric_anomaly / 2.0).tan();

    Ok(AnomalySolution {
        mean_anomaly: m,
        eccentric_anomaly,
        true_anomaly: 2.0 * half.atan(),
        iterations: evaluations.get().saturating_sub(1),
    })
}
