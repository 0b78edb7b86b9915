use thiserror::Error;

/// Errors surfaced by the orbit helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("{parameter} = {value} is out of range (expected {expected})")]
    Domain {
        parameter: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error(
        "kepler solver did not converge for M = {mean_anomaly}, e = {eccentricity} after {iterations} iterations"
    )]
    NumericalConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: u32,
    },
}

/// Reject eccentricities outside the bound-ellipse range `[0, 1)`.
pub(crate) fn check_eccentricity(eccentricity: f64) -> Result<(), OrbitError> {
    if eccentricity.is_finite() && (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(OrbitError::Domain {
            parameter: "eccentricity",
            value: eccentricity,
            expected: "0 <= e < 1",
        })
    }
}

pub(crate) fn check_positive(parameter: &'static str, value: f64) -> Result<(), OrbitError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::Domain {
            parameter,
            value,
            expected: "a finite value > 0",
        })
    }
}

pub(crate) fn check_finite(parameter: &'static str, value: f64) -> Result<(), OrbitError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrbitError::Domain {
            parameter,
            value,
            expected: "a finite value",
        })
    }
}

pub(crate) fn check_count(parameter: &'static str, count: usize) -> Result<(), OrbitError> {
    if count > 0 {
        Ok(())
    } else {
        Err(OrbitError::Domain {
            parameter,
            value: 0.0,
            expected: "at least one sample",
        })
    }
}
