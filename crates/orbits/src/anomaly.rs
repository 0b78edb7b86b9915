//! Conversions between the eccentric and true anomaly.

/// True anomaly at a given eccentric anomaly, for `0 <= e < 1`.
///
/// Uses the half-angle form with `atan2`, so the quadrant is resolved for any
/// `E` and the result grows continuously with `E` over `(-2π, 2π)`.
/// No checks are made on `eccentricity`; `e >= 1` yields NaN.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let (sin_half, cos_half) = (0.5 * eccentric_anomaly).sin_cos();
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * sin_half,
        (1.0 - eccentricity).sqrt() * cos_half,
    )
}

/// Eccentric anomaly at a given true anomaly; the inverse of
/// [`true_anomaly_from_eccentric`] over the same continuous range.
pub fn eccentric_anomaly_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    let (sin_half, cos_half) = (0.5 * true_anomaly).sin_cos();
    2.0 * f64::atan2(
        (1.0 - eccentricity).sqrt() * sin_half,
        (1.0 + eccentricity).sqrt() * cos_half,
    )
}
