//! Geocentric apparent positions of the planets from Mercury to Neptune.
//!
//! Each planet starts from its mean elements ([`ElementTable`]), corrected by the main
//! perturbations of the other planets:
//!
//! - Mercury, Venus and Mars use short series in the mean anomalies of the Sun and of the
//!   inner planets and Jupiter, stored as [`PeriodicTerm`] tables.
//! - Jupiter and Saturn share the arguments of their great inequality, Uranus and Neptune
//!   the arguments of their mutual perturbation. These series mix polynomial and product
//!   terms and are written out in full.
//!
//! The position is computed twice: the second pass moves every mean anomaly back by the
//! light travel time found in the first pass. Heliocentric quantities are reported from the
//! first (geometric) pass.
use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bodies::elements::ElementTable;
use crate::bodies::sun::{sun_position, SunState};
use crate::bodies::{centuries_since_1900, Planet};
use crate::constants::{
    AstronomicalUnit, Degree, Hours, Radian, LIGHT_TIME_PER_AU, MJD, RADEG,
};
use crate::coordinates::{ecliptic_to_equatorial, normalize_radians, Ecliptic, Position};
use crate::earth_orientation::EarthOrientation;
use crate::ephem_errors::EphemError;
use crate::kepler::{solve_anomaly, AnomalySolution};
use crate::params::EphemerisParams;

/// Aberration constant in radians (20.5")
const ABERRATION: Radian = 9.9387e-5;

/// One term `amplitude · cos(k·M + phase)` of an inner-planet perturbation series.
///
/// `multipliers` apply, in order, to the mean anomalies of the Sun, Mercury, Venus, Mars
/// and Jupiter.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PeriodicTerm {
    amplitude: f64,
    multipliers: [i8; 5],
    phase: Radian,
}

impl PeriodicTerm {
    const fn new(amplitude: f64, multipliers: [i8; 5], phase: Radian) -> Self {
        PeriodicTerm {
            amplitude,
            multipliers,
            phase,
        }
    }
}

fn periodic_sum(terms: &[PeriodicTerm], anomalies: &[Radian; 5]) -> f64 {
    terms
        .iter()
        .map(|term| {
            let arg: f64 = term
                .multipliers
                .iter()
                .zip(anomalies)
                .map(|(&k, m)| k as f64 * m)
                .sum();
            term.amplitude * (arg + term.phase).cos()
        })
        .sum()
}

/// Mercury, heliocentric longitude in degrees.
const MERCURY_LONGITUDE: [PeriodicTerm; 4] = [
    PeriodicTerm::new(0.00204, [0, -2, 5, 0, 0], 0.21328),
    PeriodicTerm::new(0.00103, [0, -1, 2, 0, 0], -2.08046),
    PeriodicTerm::new(0.00091, [0, -1, 0, 0, 2], -0.64582),
    PeriodicTerm::new(0.00078, [0, -3, 5, 0, 0], 0.17692),
];

/// Mercury, radius vector in AU.
const MERCURY_RADIUS: [PeriodicTerm; 4] = [
    PeriodicTerm::new(7.525e-06, [0, -1, 0, 0, 2], 0.925251),
    PeriodicTerm::new(6.802e-06, [0, -3, 5, 0, 0], -4.53642),
    PeriodicTerm::new(5.457e-06, [0, -2, 2, 0, 0], -1.24246),
    PeriodicTerm::new(3.569e-06, [0, -1, 5, 0, 0], -1.35699),
];

/// Venus, heliocentric longitude in degrees.
const VENUS_LONGITUDE: [PeriodicTerm; 5] = [
    PeriodicTerm::new(0.00313, [2, 0, -2, 0, 0], -2.587),
    PeriodicTerm::new(0.00198, [3, 0, -3, 0, 0], 0.044768),
    PeriodicTerm::new(0.00136, [1, 0, -1, 0, 0], -2.0788),
    PeriodicTerm::new(0.00096, [3, 0, -2, 0, 0], -2.3721),
    PeriodicTerm::new(0.00082, [0, 0, -1, 0, 1], -3.6318),
];

/// Venus, radius vector in AU.
const VENUS_RADIUS: [PeriodicTerm; 7] = [
    PeriodicTerm::new(2.2501e-05, [2, 0, -2, 0, 0], -1.01592),
    PeriodicTerm::new(1.9045e-05, [3, 0, -3, 0, 0], 1.61577),
    PeriodicTerm::new(6.887e-06, [0, 0, -1, 0, 1], -2.06106),
    PeriodicTerm::new(5.172e-06, [1, 0, -1, 0, 0], -0.508065),
    PeriodicTerm::new(3.62e-06, [5, 0, -4, 0, 0], -1.81877),
    PeriodicTerm::new(3.283e-06, [4, 0, -4, 0, 0], 1.10851),
    PeriodicTerm::new(3.074e-06, [0, 0, -2, 0, 2], -0.962846),
];

/// Mars, heliocentric longitude in degrees.
const MARS_LONGITUDE: [PeriodicTerm; 9] = [
    PeriodicTerm::new(0.00705, [0, 0, 0, -8, 1], -0.85448),
    PeriodicTerm::new(0.00607, [0, 0, 0, -1, 2], -3.2873),
    PeriodicTerm::new(0.00445, [0, 0, 0, -2, 2], -3.3492),
    PeriodicTerm::new(0.00388, [1, 0, 0, -2, 0], 0.35771),
    PeriodicTerm::new(0.00238, [1, 0, 0, -1, 0], 0.61256),
    PeriodicTerm::new(0.00204, [2, 0, 0, -3, 0], 2.7688),
    PeriodicTerm::new(0.00177, [0, 0, -1, 3, 0], -1.0053),
    PeriodicTerm::new(0.00136, [2, 0, 0, -4, 0], 2.6894),
    PeriodicTerm::new(0.00104, [0, 0, 0, 0, 1], 0.30749),
];

/// Mars, radius vector in AU.
const MARS_RADIUS: [PeriodicTerm; 13] = [
    PeriodicTerm::new(5.3227e-05, [0, 0, 0, -1, 1], 0.717864),
    PeriodicTerm::new(5.0989e-05, [0, 0, 0, -2, 2], -1.77997),
    PeriodicTerm::new(3.8278e-05, [0, 0, 0, -1, 2], -1.71617),
    PeriodicTerm::new(1.5996e-05, [1, 0, 0, -1, 0], -0.969618),
    PeriodicTerm::new(1.4764e-05, [2, 0, 0, -3, 0], 1.19768),
    PeriodicTerm::new(8.966e-06, [0, 0, 0, -2, 1], 0.761225),
    PeriodicTerm::new(7.914e-06, [0, 0, 0, -2, 3], -2.43887),
    PeriodicTerm::new(7.004e-06, [0, 0, 0, -3, 2], -1.79573),
    PeriodicTerm::new(6.62e-06, [1, 0, 0, -2, 0], 1.97575),
    PeriodicTerm::new(4.93e-06, [0, 0, 0, -3, 3], -1.33069),
    PeriodicTerm::new(4.693e-06, [3, 0, 0, -5, 0], 3.32665),
    PeriodicTerm::new(4.571e-06, [2, 0, 0, -4, 0], 4.27086),
    PeriodicTerm::new(4.409e-06, [0, 0, 0, -1, 3], -2.02158),
];

/// Corrections applied to the mean elements of one planet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Perturbations {
    /// Heliocentric longitude, degrees
    pub longitude: Degree,
    /// Radius vector, AU
    pub radius_vector: AstronomicalUnit,
    /// Longitude in the orbit, radians
    pub orbital_longitude: Radian,
    pub eccentricity: f64,
    /// Mean anomaly, radians
    pub mean_anomaly: Radian,
    /// Semi-major axis, AU
    pub semi_major_axis: AstronomicalUnit,
    /// Heliocentric latitude, radians
    pub latitude: Radian,
}

impl Perturbations {
    /// Evaluate the perturbations of `planet`.
    ///
    /// Arguments
    /// ---------
    /// * `t`: Julian centuries since 1900.0
    /// * `anomalies`: mean anomalies in radians of the Sun, Mercury, Venus, Mars and Jupiter
    /// * `eccentricity`: unperturbed eccentricity of `planet`
    pub fn of(planet: Planet, t: f64, anomalies: &[Radian; 5], eccentricity: f64) -> Self {
        match planet {
            Planet::Mercury => Perturbations {
                longitude: periodic_sum(&MERCURY_LONGITUDE, anomalies),
                radius_vector: periodic_sum(&MERCURY_RADIUS, anomalies),
                ..Default::default()
            },
            Planet::Venus => {
                let qc = (7.7e-4 * (4.1406 + t * 2.6227).sin()).to_radians();
                Perturbations {
                    longitude: periodic_sum(&VENUS_LONGITUDE, anomalies),
                    radius_vector: periodic_sum(&VENUS_RADIUS, anomalies),
                    orbital_longitude: qc,
                    mean_anomaly: qc,
                    ..Default::default()
                }
            }
            Planet::Mars => {
                let [ms, _, _, mars, jupiter] = *anomalies;
                let a = 3.0 * jupiter - 8.0 * mars + 4.0 * ms;
                let qc = (-(1.133e-2 * a.sin() + 9.33e-3 * a.cos())).to_radians();
                Perturbations {
                    longitude: periodic_sum(&MARS_LONGITUDE, anomalies),
                    radius_vector: periodic_sum(&MARS_RADIUS, anomalies),
                    orbital_longitude: qc,
                    mean_anomaly: qc,
                    ..Default::default()
                }
            }
            Planet::Jupiter => jupiter(&OuterArguments::at(t), eccentricity),
            Planet::Saturn => saturn(&OuterArguments::at(t), eccentricity),
            Planet::Uranus => uranus(&OuterArguments::at(t), eccentricity),
            Planet::Neptune => neptune(&OuterArguments::at(t), eccentricity),
        }
    }
}

/// Slowly varying arguments shared by the outer-planet theories, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OuterArguments {
    /// Julian centuries since 1900.0
    t: f64,
    /// Time in units of five centuries since 1850
    j1: f64,
    j2: Radian,
    j3: Radian,
    j4: Radian,
    j5: Radian,
    j6: Radian,
}

impl OuterArguments {
    fn at(t: f64) -> Self {
        let j2 = normalize_radians(4.14473 + 5.29691e1 * t);
        let j3 = normalize_radians(4.641118 + 2.132991e1 * t);
        let j4 = normalize_radians(4.250177 + 7.478172 * t);
        OuterArguments {
            t,
            j1: t / 5.0 + 0.1,
            j2,
            j3,
            j4,
            j5: 5.0 * j3 - 2.0 * j2,
            j6: 2.0 * j2 - 6.0 * j3 + 3.0 * j4,
        }
    }
}

/// Harmonics of the Jupiter-Saturn great inequality.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GreatInequality {
    j7: Radian,
    u1: f64,
    u2: f64,
    u3: f64,
    u4: f64,
    u5: f64,
    u6: f64,
    u7: f64,
    u8: f64,
    u9: f64,
    ua: f64,
    ub: f64,
    uc: f64,
    ud: f64,
    ue: f64,
    uf: f64,
    ug: f64,
    vh: f64,
}

impl GreatInequality {
    fn new(args: &OuterArguments) -> Self {
        let j7 = args.j3 - args.j2;
        GreatInequality {
            j7,
            u1: args.j3.sin(),
            u2: args.j3.cos(),
            u3: (2.0 * args.j3).sin(),
            u4: (2.0 * args.j3).cos(),
            u5: args.j5.sin(),
            u6: args.j5.cos(),
            u7: (2.0 * args.j5).sin(),
            u8: args.j6.sin(),
            u9: j7.sin(),
            ua: j7.cos(),
            ub: (2.0 * j7).sin(),
            uc: (2.0 * j7).cos(),
            ud: (3.0 * j7).sin(),
            ue: (3.0 * j7).cos(),
            uf: (4.0 * j7).sin(),
            ug: (4.0 * j7).cos(),
            vh: (5.0 * j7).cos(),
        }
    }
}

/// Harmonics of the Uranus-Neptune mutual perturbation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UranusNeptune {
    j8: Radian,
    vj: f64,
    uu: f64,
    uv: f64,
    uw: f64,
}

impl UranusNeptune {
    fn new(args: &OuterArguments) -> Self {
        let j8 = normalize_radians(1.46205 + 3.81337 * args.t);
        let j9 = 2.0 * j8 - args.j4;
        UranusNeptune {
            j8,
            vj: j9.sin(),
            uu: j9.cos(),
            uv: (2.0 * j9).sin(),
            uw: (2.0 * j9).cos(),
        }
    }
}


fn jupiter(args: &OuterArguments, e: f64) -> Perturbations {
    let OuterArguments { j1, .. } = *args;
    let GreatInequality {
        u1, u2, u3, u4, u5, u6, u7, u8, u9, ua, ub, uc, ud, ue, uf, ug, vh, ..
    } = GreatInequality::new(args);

    let qc = (3.31364e-1 - (1.0281e-2 + 4.692e-3 * j1) * j1) * u5
        + (3.228e-3 - (6.4436e-2 - 2.075e-3 * j1) * j1) * u6
        - (3.083e-3 + (2.75e-4 - 4.89e-4 * j1) * j1) * u7
        + 2.472e-3 * u8 + 1.3619e-2 * u9 + 1.8472e-2 * ub
        + 6.717e-3 * ud + 2.775e-3 * uf + 6.417e-3 * ub * u1
        + (7.275e-3 - 1.253e-3 * j1) * u9 * u1 + 2.439e-3 * ud * u1
        - (3.5681e-2 + 1.208e-3 * j1) * u9 * u2 - 3.767e-3 * uc * u1
        - (3.3839e-2 + 1.125e-3 * j1) * ua * u1 - 4.261e-3 * ub * u2
        + (1.161e-3 * j1 - 6.333e-3) * ua * u2 + 2.178e-3 * u2
        - 6.675e-3 * uc * u2 - 2.664e-3 * ue * u2 - 2.572e-3 * u9 * u3
        - 3.567e-3 * ub * u3 + 2.094e-3 * ua * u4 + 3.342e-3 * uc * u4;
    let qc = qc.to_radians();
    let qd = (3606.0 + (130.0 - 43.0 * j1) * j1) * u5 + (1289.0 - 580.0 * j1) * u6
        - 6764.0 * u9 * u1 - 1110.0 * ub * u1 - 224.0 * ud * u1 - 204.0 * u1
        + (1284.0 + 116.0 * j1) * ua * u1 + 188.0 * uc * u1
        + (1460.0 + 130.0 * j1) * u9 * u2 + 224.0 * ub * u2 - 817.0 * u2
        + 6074.0 * u2 * ua + 992.0 * uc * u2 + 508.0 * ue * u2 + 230.0 * ug * u2
        + 108.0 * vh * u2 - (956.0 + 73.0 * j1) * u9 * u3 + 448.0 * ub * u3
        + 137.0 * ud * u3 + (108.0 * j1 - 997.0) * ua * u3 + 480.0 * uc * u3
        + 148.0 * ue * u3 + (99.0 * j1 - 956.0) * u9 * u4 + 490.0 * ub * u4
        + 158.0 * ud * u4 + 179.0 * u4 + (1024.0 + 75.0 * j1) * ua * u4
        - 437.0 * uc * u4 - 132.0 * ue * u4;
    let qd = qd * 1.0e-7;
    let vk = (7.192e-3 - 3.147e-3 * j1) * u5 - 4.344e-3 * u1
        + (j1 * (1.97e-4 * j1 - 6.75e-4) - 2.0428e-2) * u6
        + 3.4036e-2 * ua * u1 + (7.269e-3 + 6.72e-4 * j1) * u9 * u1
        + 5.614e-3 * uc * u1 + 2.964e-3 * ue * u1 + 3.7761e-2 * u9 * u2
        + 6.158e-3 * ub * u2 - 6.603e-3 * ua * u2 - 5.356e-3 * u9 * u3
        + 2.722e-3 * ub * u3 + 4.483e-3 * ua * u3
        - 2.642e-3 * uc * u3 + 4.403e-3 * u9 * u4
        - 2.536e-3 * ub * u4 + 5.547e-3 * ua * u4 - 2.689e-3 * uc * u4;
    let qe = qc - (vk.to_radians() / e);
    let qf = 205.0 * ua - 263.0 * u6 + 693.0 * uc + 312.0 * ue + 147.0 * ug + 299.0 * u9 * u1
        + 181.0 * uc * u1 + 204.0 * ub * u2 + 111.0 * ud * u2 - 337.0 * ua * u2
        - 111.0 * uc * u2;
    let qf = qf * 1.0e-6;

    Perturbations {
        orbital_longitude: qc,
        eccentricity: qd,
        mean_anomaly: qe,
        semi_major_axis: qf,
        ..Default::default()
    }
}

fn saturn(args: &OuterArguments, e: f64) -> Perturbations {
    let OuterArguments { j1, j3, j4, j5, .. } = *args;
    let GreatInequality {
        j7, u1, u2, u3, u4, u5, u6, u7, u8, u9, ua, ub, uc, ud, ue, uf, ug, vh,
    } = GreatInequality::new(args);

    let ui = f64::sin(3.0 * j3);
    let uj = f64::cos(3.0 * j3);
    let uk = f64::sin(4.0 * j3);
    let ul = f64::cos(4.0 * j3);
    let vi = f64::cos(2.0 * j5);
    let un = f64::sin(5.0 * j7);
    let j8 = j4 - j3;
    let uo = f64::sin(2.0 * j8);
    let up = f64::cos(2.0 * j8);
    let uq = f64::sin(3.0 * j8);
    let ur = f64::cos(3.0 * j8);
    let qc = 7.581e-3 * u7 - 7.986e-3 * u8 - 1.48811e-1 * u9
        - (8.14181e-1 - (1.815e-2 - 1.6714e-2 * j1) * j1) * u5
        - (1.0497e-2 - (1.60906e-1 - 4.1e-3 * j1) * j1) * u6
        - 1.5208e-2 * ud - 6.339e-3 * uf - 6.244e-3 * u1
        - 1.65e-2 * ub * u1 - 4.0786e-2 * ub
        + (8.931e-3 + 2.728e-3 * j1) * u9 * u1 - 5.775e-3 * ud * u1
        + (8.1344e-2 + 3.206e-3 * j1) * ua * u1 + 1.5019e-2 * uc * u1
        + (8.5581e-2 + 2.494e-3 * j1) * u9 * u2 + 1.4394e-2 * uc * u2
        + (2.5328e-2 - 3.117e-3 * j1) * ua * u2 + 6.319e-3 * ue * u2
        + 6.369e-3 * u9 * u3 + 9.156e-3 * ub * u3 + 7.525e-3 * uq * u3
        - 5.236e-3 * ua * u4 - 7.736e-3 * uc * u4 - 7.528e-3 * ur * u4;
    let qc = qc.to_radians();
    let qd = (-7927.0 + (2548.0 + 91.0 * j1) * j1) * u5
        + (13381.0 + (1226.0 - 253.0 * j1) * j1) * u6 + (248.0 - 121.0 * j1) * u7
        - (305.0 + 91.0 * j1) * vi + 412.0 * ub + 12415.0 * u1
        + (390.0 - 617.0 * j1) * u9 * u1 + (165.0 - 204.0 * j1) * ub * u1
        + 26599.0 * ua * u1 - 4687.0 * uc * u1 - 1870.0 * ue * u1 - 821.0 * ug * u1
        - 377.0 * vh * u1 + 497.0 * up * u1 + (163.0 - 611.0 * j1) * u2
        - 12696.0 * u9 * u2 - 4200.0 * ub * u2 - 1503.0 * ud * u2 - 619.0 * uf * u2
        - 268.0 * un * u2 - (282.0 + 1306.0 * j1) * ua * u2
        + (-86.0 + 230.0 * j1) * uc * u2 + 461.0 * uo * u2 - 350.0 * u3
        + (2211.0 - 286.0 * j1) * u9 * u3 - 2208.0 * ub * u3 - 568.0 * ud * u3
        - 346.0 * uf * u3 - (2780.0 + 222.0 * j1) * ua * u3
        + (2022.0 + 263.0 * j1) * uc * u3 + 248.0 * ue * u3 + 242.0 * uq * u3
        + 467.0 * ur * u3 - 490.0 * u4 - (2842.0 + 279.0 * j1) * u9 * u4
        + (128.0 + 226.0 * j1) * ub * u4 + 224.0 * ud * u4
        + (-1594.0 + 282.0 * j1) * ua * u4 + (2162.0 - 207.0 * j1) * uc * u4
        + 561.0 * ue * u4 + 343.0 * ug * u4 + 469.0 * uq * u4 - 242.0 * ur * u4
        - 205.0 * u9 * ui + 262.0 * ud * ui + 208.0 * ua * uj - 271.0 * ue * uj
        - 382.0 * ue * uk - 376.0 * ud * ul;
    let qd = qd * 1.0e-7;
    let vk = (7.7108e-2 + (7.186e-3 - 1.533e-3 * j1) * j1) * u5
        - 7.075e-3 * u9
        + (4.5803e-2 - (1.4766e-2 + 5.36e-4 * j1) * j1) * u6
        - 7.2586e-2 * u2 - 7.5825e-2 * u9 * u1 - 2.4839e-2 * ub * u1
        - 8.631e-3 * ud * u1 - 1.50383e-1 * ua * u2
        + 2.6897e-2 * uc * u2 + 1.0053e-2 * ue * u2
        - (1.3597e-2 + 1.719e-3 * j1) * u9 * u3 + 1.1981e-2 * ub * u4
        - (7.742e-3 - 1.517e-3 * j1) * ua * u3
        + (1.3586e-2 - 1.375e-3 * j1) * uc * u3
        - (1.3667e-2 - 1.239e-3 * j1) * u9 * u4
        + (1.4861e-2 + 1.136e-3 * j1) * ua * u4
        - (1.3064e-2 + 1.628e-3 * j1) * uc * u4;
    let qe = qc - (vk.to_radians() / e);
    let qf = 572.0 * u5 - 1590.0 * ub * u2 + 2933.0 * u6 - 647.0 * ud * u2
        + 33629.0 * ua - 344.0 * uf * u2 - 3081.0 * uc + 2885.0 * ua * u2
        - 1423.0 * ue + (2172.0 + 102.0 * j1) * uc * u2 - 671.0 * ug
        + 296.0 * ue * u2 - 320.0 * vh - 267.0 * ub * u3 + 1098.0 * u1
        - 778.0 * ua * u3 - 2812.0 * u9 * u1 + 495.0 * uc * u3 + 688.0 * ub * u1
        + 250.0 * ue * u3 - 393.0 * ud * u1 - 856.0 * u9 * u4 - 228.0 * uf * u1
        + 441.0 * ub * u4 + 2138.0 * ua * u1 + 296.0 * uc * u4 - 999.0 * uc * u1
        + 211.0 * ue * u4 - 642.0 * ue * u1 - 427.0 * u9 * ui - 325.0 * ug * u1
        + 398.0 * ud * ui - 890.0 * u2 + 344.0 * ua * uj + 2206.0 * u9 * u2
        - 427.0 * ue * uj;
    let qf = qf * 1.0e-6;
    let qg = 7.47e-4 * ua * u1 + 1.069e-3 * ua * u2 + 2.108e-3 * ub * u3
        + 1.261e-3 * uc * u3 + 1.236e-3 * ub * u4 - 2.075e-3 * uc * u4;
    let qg = qg.to_radians();

    Perturbations {
        orbital_longitude: qc,
        eccentricity: qd,
        mean_anomaly: qe,
        semi_major_axis: qf,
        latitude: qg,
        ..Default::default()
    }
}

fn uranus(args: &OuterArguments, e: f64) -> Perturbations {
    let OuterArguments { j1, j2, j3, j4, j6, .. } = *args;
    let UranusNeptune { j8, vj, uu, uv, uw } = UranusNeptune::new(args);

    let ja = j4 - j2;
    let jb = j4 - j3;
    let jc = j8 - j4;
    let qc = (8.64319e-1 - 1.583e-3 * j1) * vj
        + (8.2222e-2 - 6.833e-3 * j1) * uu + 3.6017e-2 * uv
        - 3.019e-3 * uw + 8.122e-3 * f64::sin(j6);
    let qc = qc.to_radians();
    let vk = 1.20303e-1 * vj + 6.197e-3 * uv
        + (1.9472e-2 - 9.47e-4 * j1) * uu;
    let qe = qc - (vk.to_radians() / e);
    let qd = (163.0 * j1 - 3349.0) * vj + 20981.0 * uu + 1311.0 * uw;
    let qd = qd * 1.0e-7;
    let qf = -3.825e-3 * uu;
    let qa = (-3.8581e-2 + (2.031e-3 - 1.91e-3 * j1) * j1) * f64::cos(j4 + jb)
        + (1.0122e-2 - 9.88e-4 * j1) * f64::sin(j4 + jb);
    let a = (3.4964e-2 - (1.038e-3 - 8.68e-4 * j1) * j1) * f64::cos(2.0 * j4 + jb);
    let qa = a + qa + 5.594e-3 * f64::sin(j4 + 3.0 * jc) - 1.4808e-2 * f64::sin(ja)
        - 5.794e-3 * f64::sin(jb) + 2.347e-3 * f64::cos(jb)
        + 9.872e-3 * f64::sin(jc) + 8.803e-3 * f64::sin(2.0 * jc)
        - 4.308e-3 * f64::sin(3.0 * jc);
    let ux = f64::sin(jb);
    let uy = f64::cos(jb);
    let uz = f64::sin(j4);
    let va = f64::cos(j4);
    let vb = f64::sin(2.0 * j4);
    let vc = f64::cos(2.0 * j4);
    let qg = (4.58e-4 * ux - 6.42e-4 * uy - 5.17e-4 * f64::cos(4.0 * jc)) * uz
        - (3.47e-4 * ux + 8.53e-4 * uy + 5.17e-4 * f64::sin(4.0 * jb)) * va
        + 4.03e-4 * (f64::cos(2.0 * jc) * vb + f64::sin(2.0 * jc) * vc);
    let qg = qg.to_radians();
    let qb = -25948.0 + 4985.0 * f64::cos(ja) - 1230.0 * va + 3354.0 * uy
        + 904.0 * f64::cos(2.0 * jc) + 894.0 * (f64::cos(jc) - f64::cos(3.0 * jc))
        + (5795.0 * va - 1165.0 * uz + 1388.0 * vc) * ux
        + (1351.0 * va + 5702.0 * uz + 1388.0 * vb) * uy;
    let qb = qb * 1.0e-6;

    Perturbations {
        longitude: qa,
        radius_vector: qb,
        orbital_longitude: qc,
        eccentricity: qd,
        mean_anomaly: qe,
        semi_major_axis: qf,
        latitude: qg,
    }
}

fn neptune(args: &OuterArguments, e: f64) -> Perturbations {
    let OuterArguments { j1, j2, j3, j4, .. } = *args;
    let UranusNeptune { j8, vj, uu, uv, uw } = UranusNeptune::new(args);

    let ja = j8 - j2;
    let jb = j8 - j3;
    let jc = j8 - j4;
    let qc = (1.089e-3 * j1 - 5.89833e-1) * vj
        + (4.658e-3 * j1 - 5.6094e-2) * uu - 2.4286e-2 * uv;
    let qc = qc.to_radians();
    let vk = 2.4039e-2 * vj - 2.5303e-2 * uu + 6.206e-3 * uv
        - 5.992e-3 * uw;
    let qe = qc - (vk.to_radians() / e);
    let qd = 4389.0 * vj + 1129.0 * uv + 4262.0 * uu + 1089.0 * uw;
    let qd = qd * 1.0e-7;
    let qf = 8189.0 * uu - 817.0 * vj + 781.0 * uw;
    let qf = qf * 1.0e-6;
    let vd = f64::sin(2.0 * jc);
    let ve = f64::cos(2.0 * jc);
    let vf = f64::sin(j8);
    let vg = f64::cos(j8);
    let qa = -9.556e-3 * f64::sin(ja) - 5.178e-3 * f64::sin(jb)
        + 2.572e-3 * vd - 2.972e-3 * ve * vf - 2.833e-3 * vd * vg;
    let qg = 3.36e-4 * ve * vf + 3.64e-4 * vd * vg;
    let qg = qg.to_radians();
    let qb = -40596.0 + 4992.0 * f64::cos(ja) + 2744.0 * f64::cos(jb)
        + 2044.0 * f64::cos(jc) + 1051.0 * ve;
    let qb = qb * 1.0e-6;

    Perturbations {
        longitude: qa,
        radius_vector: qb,
        orbital_longitude: qc,
        eccentricity: qd,
        mean_anomaly: qe,
        semi_major_axis: qf,
        latitude: qg,
    }
}

/// Result of a planet computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Apparent equatorial place for the true equinox of date. The ecliptic view holds the
    /// geometric geocentric longitude and latitude, before nutation and aberration.
    pub position: Position,
    pub heliocentric_longitude: Degree,
    pub heliocentric_latitude: Degree,
    /// Sun-planet distance
    pub radius_vector: AstronomicalUnit,
    /// Earth-planet distance
    pub earth_distance: AstronomicalUnit,
    /// Kepler solution of the light-time corrected pass
    pub anomaly: AnomalySolution,
    /// Light travel time in days
    pub light_time: f64,
}

/// Heliocentric state of one planet for one value of the light time.
#[derive(Debug, Clone, Copy)]
struct OrbitPass {
    longitude: Radian,
    latitude: Radian,
    radius_vector: AstronomicalUnit,
    earth_distance: AstronomicalUnit,
    anomaly: AnomalySolution,
}

fn orbit_pass(
    planet: Planet,
    table: &ElementTable,
    sun: &SunState,
    light_time: f64,
    params: &EphemerisParams,
) -> Result<OrbitPass, EphemError> {
    let anomaly_of = |p: Planet| table.get(p).mean_anomaly(light_time) * RADEG;
    let anomalies = [
        sun.mean_anomaly,
        anomaly_of(Planet::Mercury),
        anomaly_of(Planet::Venus),
        anomaly_of(Planet::Mars),
        anomaly_of(Planet::Jupiter),
    ];

    let el = table.get(planet);
    let pert = Perturbations::of(planet, table.centuries, &anomalies, el.eccentricity);

    let eccentricity = el.eccentricity + pert.eccentricity;
    let mean_anomaly = anomaly_of(planet) + pert.mean_anomaly;
    let anomaly = solve_anomaly(
        mean_anomaly / RADEG,
        eccentricity,
        params.kepler_tolerance,
        params.kepler_max_iter,
    )?;

    let nu = anomaly.true_anomaly;
    let radius_vector = (el.semi_major_axis + pert.semi_major_axis)
        * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * nu.cos())
        + pert.radius_vector;

    // argument of latitude, counted from the ascending node
    let node = el.node_longitude * RADEG;
    let inclination = el.inclination * RADEG;
    let orbital_longitude =
        nu + el.perihelion_longitude * RADEG + pert.orbital_longitude - pert.mean_anomaly;
    let (sin_u, cos_u) = (orbital_longitude - node).sin_cos();

    let latitude = (sin_u * inclination.sin()).asin() + pert.latitude;
    let longitude = normalize_radians(
        (sin_u * inclination.cos()).atan2(cos_u) + node + pert.longitude * RADEG,
    );

    let earth_longitude = sun.true_longitude + PI;
    let re = sun.radius_vector;
    let earth_distance = (re * re + radius_vector * radius_vector
        - 2.0 * re * radius_vector * latitude.cos() * (longitude - earth_longitude).cos())
    .sqrt();

    Ok(OrbitPass {
        longitude,
        latitude,
        radius_vector,
        earth_distance,
        anomaly,
    })
}

/// Geocentric ecliptic longitude and latitude in radians, from the heliocentric pass and the
/// Earth's heliocentric longitude `earth_longitude` and distance `re`.
fn geocentric(planet: Planet, pass: &OrbitPass, earth_longitude: Radian, re: f64) -> (Radian, Radian) {
    let projected = pass.radius_vector * pass.latitude.cos();
    let (l1, l2) = (pass.longitude - earth_longitude).sin_cos();

    let longitude = if planet.is_inferior() {
        (-projected * l1 / (re - projected * l2)).atan() + earth_longitude + PI
    } else {
        (re * l1 / (projected - re * l2)).atan() + pass.longitude
    };

    let x = projected * pass.longitude.cos() - re * earth_longitude.cos();
    let y = projected * pass.longitude.sin() - re * earth_longitude.sin();
    let z = pass.radius_vector * pass.latitude.sin();

    (normalize_radians(longitude), z.atan2(x.hypot(y)))
}

/// Compute the apparent geocentric position of a planet.
///
/// Arguments
/// ---------
/// * `planet`: one of the seven planets
/// * `mjd`: day count (1900 epoch) of the date at 0h UT
/// * `ut`: universal time of day in hours
/// * `orientation`: nutation and obliquity of the date
/// * `params`: Kepler solver settings
///
/// Return
/// ------
/// * The apparent equatorial place, the geometric geocentric ecliptic place and the
///   heliocentric coordinates, or the Kepler solver error.
///
/// Details
/// -------
/// The Sun is evaluated at the same instant to get the Earth's heliocentric longitude
/// (`λ☉ + π`) and distance. A first pass with no light time gives the heliocentric position
/// and the Earth distance `Δ`; the second pass shifts every mean anomaly back by
/// `Δ · 0.005775518` days. Nutation in longitude and annual aberration are then applied
/// before the rotation to the equator of date.
///
/// See also
/// --------
/// * [`Perturbations::of`] – the per-planet corrections of the mean elements
/// * [`sun_position`] – the Earth's position comes from the solar theory
pub fn planet_position(
    planet: Planet,
    mjd: MJD,
    ut: Hours,
    orientation: &EarthOrientation,
    params: &EphemerisParams,
) -> Result<PlanetPosition, EphemError> {
    let sun = sun_position(mjd, ut, orientation, params)?;
    let table = ElementTable::at(centuries_since_1900(mjd, ut));

    let geometric = orbit_pass(planet, &table, &sun, 0.0, params)?;
    let light_time = geometric.earth_distance * LIGHT_TIME_PER_AU;
    let retarded = orbit_pass(planet, &table, &sun, light_time, params)?;

    let earth_longitude = sun.true_longitude + PI;
    let (lon, lat) = geocentric(planet, &retarded, earth_longitude, sun.radius_vector);

    let apparent = lon + orientation.nutation.longitude * RADEG;
    let a = sun.true_longitude - apparent;
    let apparent_lon = apparent - ABERRATION * a.cos() / lat.cos();
    let apparent_lat = lat - ABERRATION * a.sin() * lat.sin();

    let equatorial = ecliptic_to_equatorial(
        &Ecliptic::new(normalize_radians(apparent_lon) / RADEG, apparent_lat / RADEG),
        orientation.obliquity,
    );
    let ecliptic = Ecliptic::new(lon / RADEG, lat / RADEG);

    debug!(
        "{planet} at mjd1900 {mjd} + {ut}h: lon = {:.5}°, lat = {:.5}°, delta = {:.6} AU",
        ecliptic.longitude, ecliptic.latitude, geometric.earth_distance
    );

    Ok(PlanetPosition {
        planet,
        position: Position::from_ecliptic(ecliptic, equatorial),
        heliocentric_longitude: geometric.longitude / RADEG,
        heliocentric_latitude: geometric.latitude / RADEG,
        radius_vector: geometric.radius_vector,
        earth_distance: geometric.earth_distance,
        anomaly: retarded.anomaly,
        light_time,
    })
}
