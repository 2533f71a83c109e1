//! Validation helpers for regression data and parameter vectors.
//!
//! Purpose
//! -------
//! Centralize the checks that guard the estimator's inputs so that data
//! containers, the codec, and the driver report the same errors for the same
//! problems.
//!
//! Key behaviors
//! -------------
//! - Data checks ([`validate_response`], [`validate_design`]) return
//!   [`RegressionError`] and report the first offending entry.
//! - Parameter checks ([`validate_raw_len`], [`validate_dof`],
//!   [`validate_scale`], [`validate_betas`], [`validate_theta`]) return
//!   [`ParamError`].
//!
//! Conventions
//! -----------
//! - Raw vectors are laid out `[ν, σ, β₀, …, β_{k−1}]` (length `k + 2`);
//!   transformed vectors have length `k + 1`.
//! - These helpers never mutate or log.
use ndarray::{Array1, Array2, ArrayView1};

use crate::regression::errors::{ParamError, ParamResult, RegressionError, RegressionResult};

/// Check that the response is non-empty and finite.
///
/// # Errors
/// - [`RegressionError::EmptySeries`] for an empty vector.
/// - [`RegressionError::NonFiniteData`] for the first NaN/±inf entry.
pub fn validate_response(y: &Array1<f64>) -> RegressionResult<()> {
    if y.is_empty() {
        return Err(RegressionError::EmptySeries);
    }
    for (row, &value) in y.iter().enumerate() {
        if !value.is_finite() {
            return Err(RegressionError::NonFiniteData { what: "response", row, col: 0, value });
        }
    }
    Ok(())
}

/// Check that the design has `n` rows, at least one column, and finite entries.
///
/// # Errors
/// - [`RegressionError::DimensionMismatch`] when `x.nrows() != n`.
/// - [`RegressionError::NoRegressors`] when `x.ncols() == 0`.
/// - [`RegressionError::NonFiniteData`] for the first NaN/±inf entry.
pub fn validate_design(x: &Array2<f64>, n: usize) -> RegressionResult<()> {
    if x.nrows() != n {
        return Err(RegressionError::DimensionMismatch { y_len: n, x_rows: x.nrows() });
    }
    if x.ncols() == 0 {
        return Err(RegressionError::NoRegressors);
    }
    for ((row, col), &value) in x.indexed_iter() {
        if !value.is_finite() {
            return Err(RegressionError::NonFiniteData { what: "design", row, col, value });
        }
    }
    Ok(())
}

/// Check that a raw vector has length `k + 2`.
///
/// # Errors
/// [`ParamError::SizeMismatch`] otherwise.
pub fn validate_raw_len(len: usize, k: usize) -> ParamResult<()> {
    if len != k + 2 {
        return Err(ParamError::SizeMismatch { expected: k + 2, actual: len });
    }
    Ok(())
}

/// Degrees of freedom must be finite and strictly greater than 2.
pub fn validate_dof(nu: f64) -> ParamResult<()> {
    if !nu.is_finite() || nu <= 2.0 {
        return Err(ParamError::InvalidDof { value: nu });
    }
    Ok(())
}

/// Scale must be finite and strictly positive.
pub fn validate_scale(sigma: f64) -> ParamResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ParamError::InvalidScale { value: sigma });
    }
    Ok(())
}

/// Every coefficient must be finite.
pub fn validate_betas(beta: ArrayView1<'_, f64>) -> ParamResult<()> {
    for (index, &value) in beta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidBeta { index, value });
        }
    }
    Ok(())
}

/// A transformed vector must have the expected length and finite entries.
///
/// # Errors
/// - [`ParamError::SizeMismatch`] when `theta.len() != expected`.
/// - [`ParamError::InvalidThetaInput`] for the first NaN/±inf entry.
pub fn validate_theta(theta: &Array1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::SizeMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Data checks: empty response, row mismatch, empty design, non-finite data.
    // - Parameter checks at their boundaries (ν = 2, σ = 0).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure each data defect maps to its own error.
    //
    // Given
    // -----
    // - An empty response, a 3-row design for 2 observations, a 2×0 design,
    //   and a design containing NaN at (1, 1).
    //
    // Expect
    // ------
    // - `EmptySeries`, `DimensionMismatch`, `NoRegressors`, `NonFiniteData`.
    fn data_defects_map_to_distinct_errors() {
        // Arrange
        let empty: Array1<f64> = Array1::zeros(0);
        let tall = Array2::<f64>::zeros((3, 1));
        let no_cols = Array2::<f64>::zeros((2, 0));
        let with_nan = array![[1.0, 0.5], [1.0, f64::NAN]];

        // Act / Assert
        assert_eq!(validate_response(&empty), Err(RegressionError::EmptySeries));
        assert_eq!(
            validate_design(&tall, 2),
            Err(RegressionError::DimensionMismatch { y_len: 2, x_rows: 3 })
        );
        assert_eq!(validate_design(&no_cols, 2), Err(RegressionError::NoRegressors));
        assert!(matches!(
            validate_design(&with_nan, 2),
            Err(RegressionError::NonFiniteData { row: 1, col: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check that the positivity bounds are strict.
    //
    // Given
    // -----
    // - `ν = 2`, `ν = 2.0001`, `σ = 0`, `σ = 1e-300`.
    //
    // Expect
    // ------
    // - The boundary values are rejected, values just inside are accepted.
    fn positivity_bounds_are_strict() {
        // Act / Assert
        assert_eq!(validate_dof(2.0), Err(ParamError::InvalidDof { value: 2.0 }));
        assert!(validate_dof(2.0001).is_ok());
        assert_eq!(validate_scale(0.0), Err(ParamError::InvalidScale { value: 0.0 }));
        assert!(validate_scale(1e-300).is_ok());
        assert!(validate_dof(f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify transformed-vector checks report length before finiteness.
    //
    // Given
    // -----
    // - `[0, NaN]` validated against lengths 3 and 2.
    //
    // Expect
    // ------
    // - `SizeMismatch` for length 3, `InvalidThetaInput { index: 1 }` for length 2.
    fn theta_checks_length_then_finiteness() {
        // Arrange
        let theta = array![0.0, f64::NAN];

        // Act / Assert
        assert_eq!(
            validate_theta(&theta, 3),
            Err(ParamError::SizeMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            validate_theta(&theta, 2),
            Err(ParamError::InvalidThetaInput { index: 1, .. })
        ));
    }
}
