//! Estimation results.
//!
//! [`PointEstimate`] is everything known once the optimizer has finished;
//! [`EstimationResult`] adds the delta-method covariance and standard errors.
//! The split lets a covariance failure still hand back the point estimate
//! (see `RegressionError::CovarianceFailed`).
use ndarray::{Array1, Array2};

use crate::{
    optimization::loglik_optimizer::{FnEvalMap, Theta},
    regression::core::{diagnostics::DiagnosticsSnapshot, params::RawParams},
};

/// Point estimate and optimizer report.
///
/// - `raw`: `[ν̂, σ̂, β̂₀, …]`, length `k + 2`.
/// - `params`: structured view of `raw`.
/// - `theta_hat`: optimum in transformed space, length `k + 1`.
/// - `log_likelihood`: `n · mean log-likelihood` at the optimum.
/// - `n_obs`: sample size `n`.
/// - `status` / `converged`: solver termination text and whether a
///   convergence test fired.
/// - `iterations`, `fn_evals`: solver counters.
/// - `names`: labels aligned with `raw`.
/// - `diagnostics`: evaluation counters and the objective log.
#[derive(Debug, Clone, PartialEq)]
pub struct PointEstimate {
    pub raw: Array1<f64>,
    pub params: RawParams,
    pub theta_hat: Theta,
    pub log_likelihood: f64,
    pub n_obs: usize,
    pub status: String,
    pub converged: bool,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub names: Vec<String>,
    pub diagnostics: DiagnosticsSnapshot,
}

/// Full estimation result: point estimate plus raw-space covariance.
///
/// `std_errors` and the diagonal of `covariance` are aligned with
/// `estimate.raw` and `estimate.names`.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub estimate: PointEstimate,
    pub std_errors: Array1<f64>,
    pub covariance: Array2<f64>,
}

impl EstimationResult {
    /// Raw point estimate `[ν̂, σ̂, β̂]`.
    pub fn raw(&self) -> &Array1<f64> {
        &self.estimate.raw
    }

    pub fn log_likelihood(&self) -> f64 {
        self.estimate.log_likelihood
    }

    pub fn status(&self) -> &str {
        &self.estimate.status
    }

    pub fn converged(&self) -> bool {
        self.estimate.converged
    }

    /// Ratio of each estimate to its standard error.
    pub fn t_values(&self) -> Array1<f64> {
        &self.estimate.raw / &self.std_errors
    }
}
