//! Kepler's equation `E - e·sin(E) = M` for elliptic orbits.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::{OrbitError, check_eccentricity, check_finite};

/// Default absolute tolerance on the eccentric anomaly (radians).
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

const MAX_ITERATIONS: u32 = 200;

#[inline]
fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

#[inline]
fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - eccentricity * eccentric_anomaly.cos()
}

/// Mean anomaly reached at a given eccentric anomaly (the forward Kepler equation).
#[inline]
pub fn mean_anomaly_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// [`solve_kepler_equation`] with [`DEFAULT_TOLERANCE`].
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    solve_kepler_equation(mean_anomaly, eccentricity, DEFAULT_TOLERANCE)
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// `mean_anomaly` may be any finite angle; the result lies in the same
/// revolution (no wrapping to `[0, 2π)`). A circular orbit returns the mean
/// anomaly unchanged.
///
/// The root is kept inside the bracket `[M - π, M + π]`, which always holds a
/// sign change for `0 <= e < 1`. Each iteration takes a Newton-Raphson step
/// and falls back to bisection when that step would leave the bracket.
///
/// # Errors
/// - [`OrbitError::Domain`] for `e` outside `[0, 1)`, a non-finite mean
///   anomaly, or a non-positive tolerance.
/// - [`OrbitError::NumericalConvergence`] if the bracket holds no sign change
///   or the iteration budget runs out.
pub fn solve_kepler_equation(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
) -> Result<f64, OrbitError> {
    check_finite("mean_anomaly", mean_anomaly)?;
    check_eccentricity(eccentricity)?;
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(OrbitError::Domain {
            parameter: "tolerance",
            value: tolerance,
            expected: "a finite value > 0",
        });
    }

    if eccentricity == 0.0 {
        return Ok(mean_anomaly);
    }

    let not_converged = |iterations| OrbitError::NumericalConvergence {
        mean_anomaly,
        eccentricity,
        iterations,
    };

    let mut lo = mean_anomaly - PI;
    let mut hi = mean_anomaly + PI;
    let f_lo = keplers_equation(mean_anomaly, lo, eccentricity);
    let f_hi = keplers_equation(mean_anomaly, hi, eccentricity);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    // f is strictly increasing for e < 1, so the bracket must go from - to +.
    if !(f_lo < 0.0 && f_hi > 0.0) {
        return Err(not_converged(0));
    }

    // Danby's starting guess.
    let sign = if mean_anomaly.sin() < 0.0 { -1.0 } else { 1.0 };
    let mut ecc_anom = (mean_anomaly + 0.85 * eccentricity * sign).clamp(lo, hi);
    let mut bisections = 0u32;

    for iteration in 1..=MAX_ITERATIONS {
        let residual = keplers_equation(mean_anomaly, ecc_anom, eccentricity);
        if residual == 0.0 {
            return Ok(ecc_anom);
        }
        if residual < 0.0 {
            lo = ecc_anom;
        } else {
            hi = ecc_anom;
        }

        let derivative = keplers_equation_derivative(ecc_anom, eccentricity);
        let newton = ecc_anom - residual / derivative;
        let next = if derivative > 0.0 && newton > lo && newton < hi {
            newton
        } else {
            bisections += 1;
            0.5 * (lo + hi)
        };

        let step = (next - ecc_anom).abs();
        ecc_anom = next;

        // The last clause stops once the bracket is a single ulp wide.
        if step < tolerance || hi - lo < tolerance || next == lo || next == hi {
            debug!(
                mean_anomaly,
                eccentricity, iteration, bisections, "kepler solver converged"
            );
            return Ok(ecc_anom);
        }
    }

    Err(not_converged(MAX_ITERATIONS))
}
