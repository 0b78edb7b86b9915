//! Two-body Kepler orbit helpers for the lessons workspace.
//!
//! Everything here is a pure function over plain values: solving Kepler's
//! equation, converting between anomalies, and sampling the orbit ellipse,
//! the time-correct trajectory, swept-area wedges, and the simplified
//! "Newton's cannon" trajectory. Outputs are `(x, y[, t])` arrays for the
//! rendering layer to draw.

pub mod anomaly;
pub mod cannon;
pub mod error;
pub mod sampling;
pub mod solver;

pub use anomaly::{eccentric_anomaly_from_true, true_anomaly_from_eccentric};
pub use cannon::{CannonLaunch, CannonShot, Regime, projectile_trajectory};
pub use error::OrbitError;
pub use sampling::{
    Curve, Trajectory, apoapsis, ellipse_from_eccentricity, equal_time_sweep, kepler_orbit,
    orbital_period, periapsis, polygon_area, radius_at, semi_latus_rectum, swept_area_points,
};
pub use solver::{
    DEFAULT_TOLERANCE, mean_anomaly_from_eccentric, solve_kepler, solve_kepler_equation,
};
