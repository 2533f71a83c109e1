//! Errors for the restricted Student-t regression (data validation, codec
//! preconditions, optimizer failures, and covariance failures).
//!
//! This module defines a model error type, [`RegressionError`], and a
//! parameter error type, [`ParamError`], used across the estimation API. Both
//! implement `Display`/`Error`; with the `python-bindings` feature they also
//! convert to `PyErr`.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Boundary values reached during likelihood evaluation (`σ ≤ 0`, `ν ≤ 2`)
//!   are not errors; they yield `−∞` contributions.
//! - Non-convergence is not an error; it is reported on the result.
//! - A covariance failure keeps the point estimate:
//!   [`RegressionError::CovarianceFailed`] carries it so callers can still
//!   use the fitted parameters.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{
    inference::errors::InferenceError, optimization::errors::OptError,
    regression::core::results::PointEstimate,
};

/// Result alias for estimation paths that may produce [`RegressionError`].
pub type RegressionResult<T> = Result<T, RegressionError>;

/// Result alias for codec paths that may produce [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the regression estimator.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    // ---- Input/data validation ----
    /// Response has no observations.
    EmptySeries,

    /// Design matrix has no columns.
    NoRegressors,

    /// A data point is NaN/±inf.
    NonFiniteData { what: &'static str, row: usize, col: usize, value: f64 },

    /// `y.len()` differs from `X.nrows()`.
    DimensionMismatch { y_len: usize, x_rows: usize },

    // ---- Options ----
    /// Round-trip tolerance must be finite and > 0.
    InvalidRoundTripTol { value: f64 },

    // ---- Parameters ----
    /// Codec or parameter-vector precondition failed.
    Param(ParamError),

    // ---- Estimation ----
    /// The optimizer could not run or produced an invalid state.
    Optimization(OptError),

    /// The point estimate succeeded but its covariance could not be computed.
    CovarianceFailed { reason: InferenceError, estimate: Box<PointEstimate> },
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::EmptySeries => write!(f, "Response series is empty"),
            RegressionError::NoRegressors => write!(f, "Design matrix has no columns"),
            RegressionError::NonFiniteData { what, row, col, value } => {
                write!(f, "Non-finite {what} value at ({row}, {col}): {value}")
            }
            RegressionError::DimensionMismatch { y_len, x_rows } => {
                write!(f, "Response has {y_len} observations but the design has {x_rows} rows")
            }
            RegressionError::InvalidRoundTripTol { value } => {
                write!(f, "Round-trip tolerance must be finite and > 0, got {value}")
            }
            RegressionError::Param(err) => write!(f, "Parameter error: {err}"),
            RegressionError::Optimization(err) => write!(f, "Optimization failed: {err}"),
            RegressionError::CovarianceFailed { reason, .. } => {
                write!(f, "Covariance of the estimate could not be computed: {reason}")
            }
        }
    }
}

impl From<ParamError> for RegressionError {
    fn from(err: ParamError) -> Self {
        RegressionError::Param(err)
    }
}

impl From<OptError> for RegressionError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ParamLengthMismatch { expected, actual } => {
                RegressionError::Param(ParamError::SizeMismatch { expected, actual })
            }
            OptError::TooFewCoefficients { k, required } => {
                RegressionError::Param(ParamError::TooFewCoefficients { k, required })
            }
            other => RegressionError::Optimization(other),
        }
    }
}

/// Convert a [`RegressionError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<RegressionError> for PyErr {
    fn from(err: RegressionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Parameter-space errors raised by the codec and raw-vector helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Raw vector length differs from `k + 2` (or theta from `k + 1`).
    SizeMismatch { expected: usize, actual: usize },

    /// The restriction indexes coefficients the model does not have.
    TooFewCoefficients { k: usize, required: usize },

    /// Degrees of freedom must be finite and > 2.
    InvalidDof { value: f64 },

    /// Scale must be finite and > 0.
    InvalidScale { value: f64 },

    /// A coefficient is NaN/±inf.
    InvalidBeta { index: usize, value: f64 },

    /// The restriction must link two distinct coefficients with a finite total.
    InvalidRestriction { kept: usize, eliminated: usize, total: f64 },

    /// Transformed-space input is NaN/±inf.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::SizeMismatch { expected, actual } => {
                write!(f, "Parameter length mismatch: expected {expected}, got {actual}")
            }
            ParamError::TooFewCoefficients { k, required } => {
                write!(f, "Restriction needs at least {required} coefficients, model has {k}")
            }
            ParamError::InvalidDof { value } => {
                write!(f, "Degrees of freedom must be finite and > 2, got {value}")
            }
            ParamError::InvalidScale { value } => {
                write!(f, "Scale must be finite and > 0, got {value}")
            }
            ParamError::InvalidBeta { index, value } => {
                write!(f, "Coefficient at index {index} must be finite, got {value}")
            }
            ParamError::InvalidRestriction { kept, eliminated, total } => {
                write!(
                    f,
                    "Invalid restriction B[{kept}] + B[{eliminated}] = {total}: indices must differ and the total must be finite"
                )
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
