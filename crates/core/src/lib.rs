//! Core constants, units, and shared primitives for the Kepler lessons workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Rounded surface gravity used by the cannon lesson (m/s²).
    pub const SURFACE_GRAVITY: f64 = 9.8;
    /// Mean Earth radius (m).
    pub const EARTH_RADIUS_M: f64 = 6.371e6;
    /// Gravitational parameter of the Sun (km³/s²).
    pub const MU_SUN_KM3_S2: f64 = 1.327_124_400_18e11;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / super::constants::SECONDS_PER_DAY
    }
}

/// Minimal planar helpers to avoid ad-hoc `(f64, f64)` math everywhere.
pub mod planar {
    /// Alias for a point in the orbital plane, focus at the origin.
    pub type Point2 = [f64; 2];

    /// Euclidean norm of a point measured from the origin.
    #[inline]
    pub fn norm(p: &Point2) -> f64 {
        p[0].hypot(p[1])
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Point2, b: &Point2) -> f64 {
        (a[0] - b[0]).hypot(a[1] - b[1])
    }

    /// Point at radius `r` and polar angle `theta`.
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Point2 {
        let (sin, cos) = theta.sin_cos();
        [r * cos, r * sin]
    }

    /// `n` evenly spaced values over `[start, end]`, both ends included.
    ///
    /// A single sample yields `start`; zero samples yield an empty vector.
    pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }
}
