//! Estimation options — optimizer, finite-difference and sanity-check settings.
//!
//! Purpose
//! -------
//! Bundle everything one `estimate` call can be tuned with: the L-BFGS
//! configuration, the finite-difference steps used for the covariance, and
//! the tolerance for the codec round-trip check on the starting values.
//!
//! Conventions
//! -----------
//! - Components are validated by their own constructors
//!   (`Tolerances::new`, `MLEOptions::new`, `FiniteDiffOptions::new`);
//!   [`EstimationOptions::new`] only adds the round-trip tolerance check.
//! - `Default` reproduces the reference settings: gradient tolerance `1e-5`,
//!   cost tolerance `1e-12`, 500 iterations, More–Thuente line search,
//!   memory 7, relative step `ε^{1/3}`, minimum scale `1e-2`, round-trip
//!   tolerance `1e-3`.
use crate::{
    optimization::{
        loglik_optimizer::{FiniteDiffOptions, MLEOptions},
        numerical_stability::ROUND_TRIP_TOL,
    },
    regression::errors::{RegressionError, RegressionResult},
};

/// EstimationOptions — configuration for [`StudentTRegression`](crate::regression::StudentTRegression).
///
/// Fields
/// ------
/// - `mle_opts`: [`MLEOptions`]
///   Tolerances, line search, verbosity and L-BFGS memory.
/// - `fd`: [`FiniteDiffOptions`]
///   Steps for the Hessian of the objective and the Jacobian of the inverse map.
/// - `round_trip_tol`: `f64`
///   Largest tolerated deviation after `transform_back(transform(guess))`;
///   exceeding it logs a warning and does not stop the estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationOptions {
    pub mle_opts: MLEOptions,
    pub fd: FiniteDiffOptions,
    pub round_trip_tol: f64,
}

impl EstimationOptions {
    /// Construct estimation options.
    ///
    /// # Errors
    /// [`RegressionError::InvalidRoundTripTol`] unless `round_trip_tol` is
    /// finite and positive.
    pub fn new(
        mle_opts: MLEOptions, fd: FiniteDiffOptions, round_trip_tol: f64,
    ) -> RegressionResult<Self> {
        if !round_trip_tol.is_finite() || round_trip_tol <= 0.0 {
            return Err(RegressionError::InvalidRoundTripTol { value: round_trip_tol });
        }
        Ok(Self { mle_opts, fd, round_trip_tol })
    }
}

impl Default for EstimationOptions {
    fn default() -> Self {
        Self {
            mle_opts: MLEOptions::default(),
            fd: FiniteDiffOptions::default(),
            round_trip_tol: ROUND_TRIP_TOL,
        }
    }
}
