//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used when turning a
//! fitted optimum into a covariance matrix: singular information matrices,
//! negative or non-finite variances, dimension mismatches, and failures of
//! the finite-difference derivatives underneath. An alias
//! `InferenceResult<T>` standardizes the return type across inference code.
use crate::optimization::errors::OptError;

/// Unified error type for inference routines.
///
/// Covers degeneracies of the information matrix, invalid variances after
/// the delta method, and passthrough of optimizer-layer errors raised while
/// differentiating the objective or the inverse transform.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Information matrix ----
    /// Reciprocal condition number below the singularity threshold, or the
    /// inversion itself failed (`rcond` is then 0).
    SingularHessian { rcond: f64 },

    // ---- Variances ----
    /// A diagonal covariance entry is negative.
    NegativeVariance { index: usize, value: f64 },

    /// A diagonal covariance entry is NaN/±inf.
    NonFiniteVariance { index: usize, value: f64 },

    // ---- Shapes ----
    /// Matrix shapes do not conform.
    DimMismatch { expected: (usize, usize), found: (usize, usize) },

    // ---- Derivatives ----
    /// Finite-difference Hessian or Jacobian failed.
    Opt(OptError),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::Opt(err)
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Information matrix ----
            InferenceError::SingularHessian { rcond } => write!(
                f,
                "Inference Error: Information matrix is singular (reciprocal condition number {rcond:e})"
            ),

            // ---- Variances ----
            InferenceError::NegativeVariance { index, value } => {
                write!(f, "Inference Error: Negative variance at index {index}: {value}")
            }
            InferenceError::NonFiniteVariance { index, value } => {
                write!(f, "Inference Error: Non-finite variance at index {index}: {value}")
            }

            // ---- Shapes ----
            InferenceError::DimMismatch { expected, found } => write!(
                f,
                "Inference Error: Dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),

            // ---- Derivatives ----
            InferenceError::Opt(err) => write!(f, "Inference Error: {err}"),
        }
    }
}
