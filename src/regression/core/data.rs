//! Regression data container.
//!
//! Purpose
//! -------
//! Hold the response `y` and design `X` for one estimation call, validated
//! once at construction so the likelihood can index them without checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n = y.len() ≥ 1`, `X` is `n × k` with `k ≥ 1`.
//! - Every entry of `y` and `X` is finite.
//! - Column 0 of `X` is conventionally the constant; nothing here enforces it.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection.
use ndarray::{Array1, Array2};

use crate::regression::{
    core::validation::{validate_design, validate_response},
    errors::RegressionResult,
};

/// `RegressionData` — validated response vector and design matrix.
///
/// Fields
/// ------
/// - `y`: `Array1<f64>`
///   Response, length `n`.
/// - `x`: `Array2<f64>`
///   Design, `n × k`.
///
/// Notes
/// -----
/// - The container is immutable for the duration of an estimation call; the
///   estimator only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionData {
    pub y: Array1<f64>,
    pub x: Array2<f64>,
}

impl RegressionData {
    /// Construct validated regression data.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::EmptySeries` when `y` is empty.
    /// - `RegressionError::DimensionMismatch` when `x.nrows() != y.len()`.
    /// - `RegressionError::NoRegressors` when `x` has no columns.
    /// - `RegressionError::NonFiniteData` for the first NaN/±inf entry.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use student_t_mle::regression::RegressionData;
    /// let data = RegressionData::new(array![1.0, 2.0], array![[1.0, 0.5], [1.0, 0.7]])?;
    /// assert_eq!((data.n_obs(), data.n_coef()), (2, 2));
    /// # Ok::<(), student_t_mle::regression::RegressionError>(())
    /// ```
    pub fn new(y: Array1<f64>, x: Array2<f64>) -> RegressionResult<Self> {
        validate_response(&y)?;
        validate_design(&x, y.len())?;
        Ok(Self { y, x })
    }

    /// Number of observations `n`.
    pub fn n_obs(&self) -> usize {
        self.y.len()
    }

    /// Number of regression coefficients `k`.
    pub fn n_coef(&self) -> usize {
        self.x.ncols()
    }
}
