//! Orbit ellipse, time-correct trajectory, and swept-area sampling.
//!
//! All positions are in the orbital plane with the focus (the sun) at the
//! origin and periapsis on the positive x axis.

use std::f64::consts::TAU;

use kepler_core::planar::{self, Point2};
use serde::Serialize;

use crate::anomaly::true_anomaly_from_eccentric;
use crate::error::{OrbitError, check_count, check_eccentricity, check_finite, check_positive};
use crate::solver::solve_kepler;

/// Default semi-major axis of the lesson orbits.
pub const DEFAULT_SEMI_MAJOR_AXIS: f64 = 1.0;
/// Default point count of the static orbit path.
pub const DEFAULT_ELLIPSE_POINTS: usize = 200;
/// Default frame count of the animated trajectory.
pub const DEFAULT_FRAMES: usize = 100;
/// Default arc resolution of a swept-area wedge.
pub const DEFAULT_ARC_POINTS: usize = 50;

/// Ordered `(x, y)` samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point2) {
        self.x.push(point[0]);
        self.y.push(point[1]);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }

    pub fn first(&self) -> Option<Point2> {
        self.points().next()
    }

    pub fn last(&self) -> Option<Point2> {
        Some([*self.x.last()?, *self.y.last()?])
    }

    /// Distance of every sample from the origin.
    pub fn radii(&self) -> Vec<f64> {
        self.points().map(|p| planar::norm(&p)).collect()
    }
}

impl FromIterator<Point2> for Curve {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        let mut curve = Curve::default();
        for point in iter {
            curve.push(point);
        }
        curve
    }
}

/// `(x, y)` samples paired with a normalised time `t` in `[0, 1)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub t: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }

    pub fn radii(&self) -> Vec<f64> {
        self.points().map(|p| planar::norm(&p)).collect()
    }

    /// Distance travelled between consecutive frames.
    pub fn step_lengths(&self) -> Vec<f64> {
        let points: Vec<Point2> = self.points().collect();
        points
            .windows(2)
            .map(|pair| planar::distance(&pair[0], &pair[1]))
            .collect()
    }

    /// Drop the timestamps.
    pub fn into_curve(self) -> Curve {
        Curve {
            x: self.x,
            y: self.y,
        }
    }
}

/// Semi-latus rectum `p = a(1 - e²)`.
#[inline]
pub fn semi_latus_rectum(eccentricity: f64, semi_major_axis: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
}

/// Focal distance at a true anomaly: `r = a(1 - e²) / (1 + e·cosθ)`.
#[inline]
pub fn radius_at(eccentricity: f64, semi_major_axis: f64, true_anomaly: f64) -> f64 {
    semi_latus_rectum(eccentricity, semi_major_axis) / (1.0 + eccentricity * true_anomaly.cos())
}

/// Closest approach, `a(1 - e)`.
#[inline]
pub fn periapsis(eccentricity: f64, semi_major_axis: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity)
}

/// Farthest distance, `a(1 + e)`.
#[inline]
pub fn apoapsis(eccentricity: f64, semi_major_axis: f64) -> f64 {
    semi_major_axis * (1.0 + eccentricity)
}

/// Orbital period from Kepler's third law, `T = 2π·sqrt(a³/μ)`.
///
/// Units follow the inputs: km and km³/s² give seconds.
pub fn orbital_period(semi_major_axis: f64, mu: f64) -> Result<f64, OrbitError> {
    check_positive("semi_major_axis", semi_major_axis)?;
    check_positive("mu", mu)?;
    Ok(TAU * (semi_major_axis.powi(3) / mu).sqrt())
}

fn check_ellipse(eccentricity: f64, semi_major_axis: f64) -> Result<(), OrbitError> {
    check_eccentricity(eccentricity)?;
    check_positive("semi_major_axis", semi_major_axis)
}

fn point_at(eccentricity: f64, semi_major_axis: f64, true_anomaly: f64) -> Point2 {
    planar::from_polar(
        radius_at(eccentricity, semi_major_axis, true_anomaly),
        true_anomaly,
    )
}

/// Sample the orbit ellipse at `n_points` true anomalies spaced uniformly over
/// `[0, 2π]`.
///
/// This is a shape sampler only: equal angle steps are not equal time steps.
/// Use [`kepler_orbit`] for animation frames.
pub fn ellipse_from_eccentricity(
    eccentricity: f64,
    semi_major_axis: f64,
    n_points: usize,
) -> Result<Curve, OrbitError> {
    check_ellipse(eccentricity, semi_major_axis)?;
    check_count("n_points", n_points)?;

    Ok(planar::linspace(0.0, TAU, n_points)
        .into_iter()
        .map(|theta| point_at(eccentricity, semi_major_axis, theta))
        .collect())
}

/// Sample the orbit at `n_frames` equal time steps over one period.
///
/// Mean anomaly advances linearly (`M_i = 2π·i/n`, end excluded). Each frame
/// solves Kepler's equation, so the body covers the most ground per frame
/// near periapsis and crawls near apoapsis, while every frame sweeps the
/// same area.
pub fn kepler_orbit(
    eccentricity: f64,
    semi_major_axis: f64,
    n_frames: usize,
) -> Result<Trajectory, OrbitError> {
    check_ellipse(eccentricity, semi_major_axis)?;
    check_count("n_frames", n_frames)?;

    let mut trajectory = Trajectory {
        x: Vec::with_capacity(n_frames),
        y: Vec::with_capacity(n_frames),
        t: Vec::with_capacity(n_frames),
    };
    for i in 0..n_frames {
        let t = i as f64 / n_frames as f64;
        let mean_anomaly = TAU * t;
        let ecc_anom = solve_kepler(mean_anomaly, eccentricity)?;
        let theta = true_anomaly_from_eccentric(ecc_anom, eccentricity);
        let [x, y] = point_at(eccentricity, semi_major_axis, theta);
        trajectory.x.push(x);
        trajectory.y.push(y);
        trajectory.t.push(t);
    }
    Ok(trajectory)
}

/// Closed wedge swept between two true anomalies: origin, `n_points` arc
/// samples over `[theta_start, theta_end]`, origin.
///
/// Nothing here makes two wedges equal in area; pick the bounds from equal
/// time windows (see [`equal_time_sweep`]) for that.
pub fn swept_area_points(
    eccentricity: f64,
    semi_major_axis: f64,
    theta_start: f64,
    theta_end: f64,
    n_points: usize,
) -> Result<Curve, OrbitError> {
    check_ellipse(eccentricity, semi_major_axis)?;
    check_finite("theta_start", theta_start)?;
    check_finite("theta_end", theta_end)?;
    check_count("n_points", n_points)?;

    let mut wedge = Curve::with_capacity(n_points + 2);
    wedge.push([0.0, 0.0]);
    for theta in planar::linspace(theta_start, theta_end, n_points) {
        wedge.push(point_at(eccentricity, semi_major_axis, theta));
    }
    wedge.push([0.0, 0.0]);
    Ok(wedge)
}

/// Wedge swept during a time window given as fractions of the period.
///
/// The window `[start, start + duration]` is mapped through mean, eccentric,
/// and true anomaly, so two calls with the same `duration_fraction` enclose
/// the same area.
pub fn equal_time_sweep(
    eccentricity: f64,
    semi_major_axis: f64,
    start_fraction: f64,
    duration_fraction: f64,
    n_points: usize,
) -> Result<Curve, OrbitError> {
    check_finite("start_fraction", start_fraction)?;
    if !(duration_fraction.is_finite() && (0.0..=1.0).contains(&duration_fraction)) {
        return Err(OrbitError::Domain {
            parameter: "duration_fraction",
            value: duration_fraction,
            expected: "0 <= duration <= 1",
        });
    }
    check_ellipse(eccentricity, semi_major_axis)?;

    let start = start_fraction.rem_euclid(1.0);
    let theta_at = |fraction: f64| -> Result<f64, OrbitError> {
        let ecc_anom = solve_kepler(TAU * fraction, eccentricity)?;
        Ok(true_anomaly_from_eccentric(ecc_anom, eccentricity))
    };
    let theta_start = theta_at(start)?;
    let mut theta_end = theta_at(start + duration_fraction)?;
    // Windows that pass periapsis again wrap the true anomaly; unwrap it.
    while theta_end < theta_start {
        theta_end += TAU;
    }

    swept_area_points(
        eccentricity,
        semi_major_axis,
        theta_start,
        theta_end,
        n_points,
    )
}

/// Enclosed area of a polygon (shoelace formula); the ring closes implicitly.
pub fn polygon_area(polygon: &Curve) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice_area: f64 = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            polygon.x[i] * polygon.y[j] - polygon.x[j] * polygon.y[i]
        })
        .sum();
    0.5 * twice_area.abs()
}
