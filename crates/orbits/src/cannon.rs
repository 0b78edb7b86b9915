//! Simplified "Newton's cannon" trajectories.
//!
//! A cannonball is fired horizontally from the summit of a mountain. Below
//! circular speed the flight is drawn as a flat-ground parabola and cut where
//! it meets the curved surface. At or above circular speed it is drawn as a
//! Keplerian conic with the launch point at periapsis.
//!
//! This is a teaching approximation, not a physical model. The parabola
//! ignores the change of gravity direction along the flight, and the conic's
//! eccentricity is clamped to `[0, ECCENTRICITY_CAP]` so escape trajectories
//! render as elongated ellipses instead of open curves. Inputs are clamped
//! into a renderable range instead of rejected, so firing never fails.

use std::f64::consts::TAU;

use kepler_core::constants::{EARTH_RADIUS_M, SURFACE_GRAVITY};
use kepler_core::planar;
use serde::Serialize;
use tracing::{debug, warn};

/// Upper bound on the drawn eccentricity.
pub const ECCENTRICITY_CAP: f64 = 0.95;
/// Default number of trajectory samples.
pub const DEFAULT_SAMPLES: usize = 500;
/// Height of Newton's mountain as a fraction of the planet radius.
pub const DEFAULT_MOUNTAIN_FRACTION: f64 = 0.01;

const MIN_SAMPLES: usize = 2;
const MIN_GRAVITY_M_S2: f64 = 1e-6;
const MIN_RADIUS_M: f64 = 1.0;
/// Slack on the unit-circle test for the sample that lands on the surface.
const SURFACE_TOLERANCE: f64 = 1e-9;

/// Which branch of the approximation produced a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    SubOrbital,
    Bound,
    Escape,
}

impl Regime {
    pub fn label(&self) -> &'static str {
        match self {
            Regime::SubOrbital => "sub-orbital",
            Regime::Bound => "bound orbit",
            Regime::Escape => "escape (capped)",
        }
    }
}

/// Trajectory of one cannon shot in planet radii (surface = unit circle).
///
/// `y` points up through the launch site, the ball leaves towards `+x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CannonShot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub is_orbit: bool,
    pub regime: Regime,
    /// Eccentricity of the drawn conic after clamping; zero for sub-orbital shots.
    pub eccentricity: f64,
    pub eccentricity_capped: bool,
    pub launch_speed_m_s: f64,
}

impl CannonShot {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = planar::Point2> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }

    pub fn radii(&self) -> Vec<f64> {
        self.points().map(|p| planar::norm(&p)).collect()
    }
}

/// Launch parameters for a cannon shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannonLaunch {
    pub speed_m_s: f64,
    pub gravity_m_s2: f64,
    pub planet_radius_m: f64,
    /// Height of the launch site; `None` uses [`DEFAULT_MOUNTAIN_FRACTION`] of the radius.
    pub launch_altitude_m: Option<f64>,
    pub samples: usize,
}

impl CannonLaunch {
    /// Earth-sized planet, `g = 9.8`, default mountain and sample count.
    pub fn new(speed_m_s: f64) -> Self {
        Self {
            speed_m_s,
            gravity_m_s2: SURFACE_GRAVITY,
            planet_radius_m: EARTH_RADIUS_M,
            launch_altitude_m: None,
            samples: DEFAULT_SAMPLES,
        }
    }

    pub fn gravity(mut self, gravity_m_s2: f64) -> Self {
        self.gravity_m_s2 = gravity_m_s2;
        self
    }

    pub fn planet_radius(mut self, planet_radius_m: f64) -> Self {
        self.planet_radius_m = planet_radius_m;
        self
    }

    pub fn launch_altitude(mut self, launch_altitude_m: f64) -> Self {
        self.launch_altitude_m = Some(launch_altitude_m);
        self
    }

    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Speed separating the two regimes, `sqrt(g·R)`.
    pub fn circular_speed(&self) -> f64 {
        let clamped = self.clamped();
        (clamped.gravity_m_s2 * clamped.planet_radius_m).sqrt()
    }

    fn clamped(&self) -> CannonLaunch {
        let speed_m_s = if self.speed_m_s.is_finite() {
            self.speed_m_s.max(0.0)
        } else {
            0.0
        };
        let gravity_m_s2 = if self.gravity_m_s2.is_finite() {
            self.gravity_m_s2.max(MIN_GRAVITY_M_S2)
        } else {
            SURFACE_GRAVITY
        };
        let planet_radius_m = if self.planet_radius_m.is_finite() {
            self.planet_radius_m.max(MIN_RADIUS_M)
        } else {
            EARTH_RADIUS_M
        };
        let launch_altitude_m = match self.launch_altitude_m {
            Some(h) if h.is_finite() => h.max(0.0),
            _ => planet_radius_m * DEFAULT_MOUNTAIN_FRACTION,
        };
        let clamped = CannonLaunch {
            speed_m_s,
            gravity_m_s2,
            planet_radius_m,
            launch_altitude_m: Some(launch_altitude_m),
            samples: self.samples.max(MIN_SAMPLES),
        };
        let requested_altitude = self.launch_altitude_m.unwrap_or(launch_altitude_m);
        if clamped.speed_m_s != self.speed_m_s
            || clamped.gravity_m_s2 != self.gravity_m_s2
            || clamped.planet_radius_m != self.planet_radius_m
            || launch_altitude_m != requested_altitude
            || clamped.samples != self.samples
        {
            warn!(
                requested = ?self,
                used = ?clamped,
                "cannon launch parameters clamped into renderable range"
            );
        }
        clamped
    }

    /// Compute the trajectory. Never fails.
    pub fn fire(&self) -> CannonShot {
        let launch = self.clamped();
        let g = launch.gravity_m_s2;
        let radius = launch.planet_radius_m;
        let launch_radius = radius + launch.launch_altitude_m.unwrap_or(0.0);
        let v0 = launch.speed_m_s;

        if v0 < (g * radius).sqrt() {
            sub_orbital(v0, g, radius, launch_radius, launch.samples)
        } else {
            orbital(v0, g, radius, launch_radius, launch.samples)
        }
    }
}

/// Fire from the default mountain; see [`CannonLaunch`] for the other knobs.
pub fn projectile_trajectory(
    v0: f64,
    gravity_m_s2: f64,
    planet_radius_m: f64,
    n_points: usize,
) -> CannonShot {
    CannonLaunch::new(v0)
        .gravity(gravity_m_s2)
        .planet_radius(planet_radius_m)
        .samples(n_points)
        .fire()
}

/// Earliest time at which `x = v0·t, y = r0 - g·t²/2` reaches radius `R`.
///
/// `|p(t)|² = R²` is a quadratic in `u = t²`:
/// `(g²/4)u² + (v0² - g·r0)u + (r0² - R²) = 0`.
fn surface_crossing_time(v0: f64, g: f64, radius: f64, launch_radius: f64) -> Option<f64> {
    let a = 0.25 * g * g;
    let b = v0 * v0 - g * launch_radius;
    let c = launch_radius * launch_radius - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || b >= 0.0 {
        return None;
    }
    // Smaller root in the cancellation-free form.
    let u = 2.0 * c / (-b + discriminant.sqrt());
    Some(u.sqrt())
}

fn sub_orbital(v0: f64, g: f64, radius: f64, launch_radius: f64, samples: usize) -> CannonShot {
    let flight_time = surface_crossing_time(v0, g, radius, launch_radius)
        // The flat parabola can pass outside a small planet; draw a fixed drop instead.
        .unwrap_or_else(|| (4.0 * launch_radius / g).sqrt());
    debug!(v0, flight_time, "sub-orbital cannon shot");

    let mut x = Vec::with_capacity(samples);
    let mut y = Vec::with_capacity(samples);
    // A launch from the surface lands immediately: one sample.
    let times = if flight_time > 0.0 {
        planar::linspace(0.0, flight_time, samples)
    } else {
        vec![0.0]
    };
    for t in times {
        let px = v0 * t / radius;
        let py = (launch_radius - 0.5 * g * t * t) / radius;
        if px * px + py * py < 1.0 - SURFACE_TOLERANCE {
            break;
        }
        x.push(px);
        y.push(py);
    }

    CannonShot {
        x,
        y,
        is_orbit: false,
        regime: Regime::SubOrbital,
        eccentricity: 0.0,
        eccentricity_capped: false,
        launch_speed_m_s: v0,
    }
}

fn orbital(v0: f64, g: f64, radius: f64, launch_radius: f64, samples: usize) -> CannonShot {
    let mu = g * radius * radius;
    let energy = 0.5 * v0 * v0 - mu / launch_radius;
    let angular_momentum = launch_radius * v0;
    let raw_eccentricity =
        (1.0 + 2.0 * energy * angular_momentum * angular_momentum / (mu * mu)).max(0.0).sqrt();

    let regime = if energy >= 0.0 {
        Regime::Escape
    } else {
        debug!(
            semi_major_axis_m = -mu / (2.0 * energy),
            raw_eccentricity, "bound cannon orbit"
        );
        Regime::Bound
    };
    let eccentricity = raw_eccentricity.clamp(0.0, ECCENTRICITY_CAP);
    let eccentricity_capped = raw_eccentricity > ECCENTRICITY_CAP;
    if eccentricity_capped {
        warn!(
            raw_eccentricity,
            cap = ECCENTRICITY_CAP,
            ?regime,
            "cannon eccentricity capped for rendering"
        );
    }

    // Keep the launch point on the drawn conic even after clamping.
    let semi_latus = launch_radius * (1.0 + eccentricity) / radius;
    let mut x = Vec::with_capacity(samples);
    let mut y = Vec::with_capacity(samples);
    for theta in planar::linspace(0.0, TAU, samples) {
        let (sin, cos) = theta.sin_cos();
        let r = semi_latus / (1.0 + eccentricity * cos);
        x.push(r * sin);
        y.push(r * cos);
    }

    CannonShot {
        x,
        y,
        is_orbit: true,
        regime,
        eccentricity,
        eccentricity_capped,
        launch_speed_m_s: v0,
    }
}
