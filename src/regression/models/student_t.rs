//! Student-t regression: likelihood, objective and estimation driver.
//!
//! This module wires the restricted Student-t regression to the generic
//! `LogLikelihood` optimizer. Three pieces cooperate:
//!
//! - [`StudentTLikelihood`] evaluates per-observation log densities
//!   `ln t_ν(e_i / σ) − ln σ` for a raw parameter vector and counts boundary
//!   hits in its [`EvalDiagnostics`].
//! - [`Objective`] borrows the data, the codec and the likelihood and
//!   evaluates `−mean ℓ_i(transform_back(θ))`. It implements
//!   [`LogLikelihood`] so `maximize` can drive it.
//! - [`StudentTRegression`] runs the whole pipeline: validate the starting
//!   values, transform, check the round trip, maximize, map back, and
//!   compute the delta-method covariance.
//!
//! Boundary policy: `σ ≤ 0` or `ν ≤ 2` (NaN included) yields `−∞` for every
//! contribution rather than an error. The transformed space keeps every
//! optimizer iterate away from that boundary unless `exp` under- or
//! overflows, in which case the adapter reports a non-finite cost.
use ndarray::{Array1, Array2};
use statrs::distribution::{Continuous, StudentsT};

use crate::{
    inference::covariance::delta_method_covariance,
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, Theta, maximize},
    },
    regression::{
        core::{
            codec::{DOF_FLOOR, ParameterCodec},
            data::RegressionData,
            diagnostics::EvalDiagnostics,
            options::EstimationOptions,
            params::RawParams,
            results::{EstimationResult, PointEstimate},
            validation::{validate_raw_len, validate_theta},
        },
        errors::{ParamError, ParamResult, RegressionError, RegressionResult},
    },
};

/// Per-observation Student-t log-likelihood with evaluation diagnostics.
///
/// One instance is built per estimation call so its counters describe that
/// call only.
#[derive(Debug, Default)]
pub struct StudentTLikelihood {
    diagnostics: EvalDiagnostics,
}

impl StudentTLikelihood {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &EvalDiagnostics {
        &self.diagnostics
    }

    /// contributions — log-likelihood contributions `ℓ_i`, length `n`.
    ///
    /// Parameters
    /// ----------
    /// - `vp`: `&Array1<f64>`
    ///   Raw vector `[ν, σ, β₀, …, β_{k−1}]` of length `k + 2`.
    /// - `data`: `&RegressionData`
    ///   Response and `n × k` design.
    ///
    /// Returns
    /// -------
    /// `ParamResult<Array1<f64>>`
    ///   `ln t_ν((y_i − X_i·β) / σ) − ln σ` for each observation, or all `−∞`
    ///   when `σ ≤ 0` or `ν ≤ 2`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::SizeMismatch` when `vp.len() != k + 2`.
    /// - `ParamError::InvalidDof` if `statrs` rejects the degrees of freedom
    ///   despite `ν > 2`.
    ///
    /// Notes
    /// -----
    /// - Every call counts as one evaluation; boundary calls also bump the σ
    ///   or ν counter (σ is checked first) and emit a `trace` event.
    pub fn contributions(
        &self, vp: &Array1<f64>, data: &RegressionData,
    ) -> ParamResult<Array1<f64>> {
        let params = RawParams::get_pars(vp, data.n_coef())?;
        self.diagnostics.record_evaluation();

        if params.sigma.is_nan() || params.sigma <= 0.0 {
            self.diagnostics.record_sigma_boundary();
            tracing::trace!(sigma = params.sigma, "scale at boundary, contributions set to -inf");
            return Ok(Array1::from_elem(data.n_obs(), f64::NEG_INFINITY));
        }
        if params.nu.is_nan() || params.nu <= DOF_FLOOR {
            self.diagnostics.record_nu_boundary();
            tracing::trace!(
                nu = params.nu,
                "degrees of freedom at boundary, contributions set to -inf"
            );
            return Ok(Array1::from_elem(data.n_obs(), f64::NEG_INFINITY));
        }

        let dist = StudentsT::new(0.0, 1.0, params.nu)
            .map_err(|_| ParamError::InvalidDof { value: params.nu })?;
        let ln_sigma = params.sigma.ln();
        let residuals = &data.y - &data.x.dot(&params.beta);
        Ok(residuals.mapv(|e| dist.ln_pdf(e / params.sigma) - ln_sigma))
    }
}

/// Average negative log-likelihood as a function of the transformed vector.
///
/// Holds read-only borrows for the duration of one estimation call.
#[derive(Debug, Clone, Copy)]
pub struct Objective<'a> {
    data: &'a RegressionData,
    codec: &'a ParameterCodec,
    likelihood: &'a StudentTLikelihood,
}

impl<'a> Objective<'a> {
    pub fn new(
        data: &'a RegressionData, codec: &'a ParameterCodec, likelihood: &'a StudentTLikelihood,
    ) -> Self {
        Self { data, codec, likelihood }
    }

    /// `−mean ℓ_i(transform_back(θ))`; every value is appended to the
    /// objective log.
    ///
    /// # Errors
    /// Codec or likelihood errors, converted to [`OptError`].
    pub fn evaluate(&self, theta: &Theta) -> OptResult<f64> {
        let vp = self.codec.transform_back(theta)?;
        let contributions = self.likelihood.contributions(&vp, self.data)?;
        let value = -contributions.mean().unwrap_or(f64::NEG_INFINITY);
        self.likelihood.diagnostics().record_objective(value);
        Ok(value)
    }

    /// Expected length of θ for this data set.
    pub fn theta_len(&self) -> usize {
        self.codec.theta_len(self.data.n_coef())
    }
}

impl LogLikelihood for Objective<'_> {
    type Data = ();

    /// Mean log-likelihood `ℓ̄(θ) = −objective(θ)`.
    fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
        Ok(-self.evaluate(theta)?)
    }

    /// θ must have length `k + 1` and finite entries.
    fn check(&self, theta: &Theta, _data: &()) -> OptResult<()> {
        validate_theta(theta, self.theta_len())?;
        Ok(())
    }
}

/// Restricted Student-t regression estimator.
///
/// Combines a [`ParameterCodec`] (which fixes the restriction) with
/// [`EstimationOptions`]. The estimator is stateless between calls.
///
/// # Example
/// ```no_run
/// use student_t_mle::regression::{
///     RegressionData, StudentTRegression, default_initial_guess, simulate,
/// };
///
/// let truth = ndarray::array![4.0, 0.1, 1.0, 0.8, 0.2];
/// let (y, x) = simulate::simulate(&truth, 500, 1234)?;
/// let data = RegressionData::new(y, x)?;
/// let result = StudentTRegression::default().estimate(&data, &default_initial_guess(3))?;
/// println!("{}: {:?} ± {:?}", result.status(), result.raw(), result.std_errors);
/// # Ok::<(), student_t_mle::regression::RegressionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentTRegression {
    pub codec: ParameterCodec,
    pub options: EstimationOptions,
}

impl StudentTRegression {
    pub fn new(codec: ParameterCodec, options: EstimationOptions) -> Self {
        Self { codec, options }
    }

    /// Estimate `(ν, σ, β)` by constrained maximum likelihood.
    ///
    /// ## Steps
    /// 1. Check `initial_guess.len() == k + 2` before anything else runs.
    /// 2. Transform the guess and verify the round trip; a deviation above
    ///    `options.round_trip_tol` is logged as a warning and recorded.
    /// 3. Maximize `ℓ̄(θ)` with L-BFGS from the transformed guess.
    /// 4. Map `θ̂` back to raw space; `log_likelihood = n · ℓ̄(θ̂)`.
    /// 5. Compute the raw-space covariance by the delta method.
    ///
    /// ## Errors
    /// - `RegressionError::Param` for a wrong-length guess, too few
    ///   coefficients for the restriction, or a guess outside `ν > 2`, `σ > 0`.
    /// - `RegressionError::Optimization` if the solver cannot run.
    /// - `RegressionError::CovarianceFailed` if the covariance step fails; the
    ///   error carries the point estimate.
    ///
    /// Non-convergence is not an error: see `converged` / `status`.
    pub fn estimate(
        &self, data: &RegressionData, initial_guess: &Array1<f64>,
    ) -> RegressionResult<EstimationResult> {
        let likelihood = StudentTLikelihood::new();
        self.estimate_with(data, initial_guess, &likelihood)
    }

    fn estimate_with(
        &self, data: &RegressionData, initial_guess: &Array1<f64>, likelihood: &StudentTLikelihood,
    ) -> RegressionResult<EstimationResult> {
        let (n, k) = (data.n_obs(), data.n_coef());
        validate_raw_len(initial_guess.len(), k)?;

        let theta0 = self.codec.transform(initial_guess)?;
        let deviation = self.codec.round_trip_error(initial_guess)?;
        likelihood.diagnostics().set_round_trip_error(deviation);
        if deviation > self.options.round_trip_tol {
            tracing::warn!(
                deviation,
                tolerance = self.options.round_trip_tol,
                "starting values do not survive the parameter transform round trip"
            );
        }

        let objective = Objective::new(data, &self.codec, likelihood);
        tracing::debug!(n, k, "estimating restricted Student-t regression");
        let outcome = maximize(&objective, theta0, &(), &self.options.mle_opts)?;

        let raw = self.codec.transform_back(&outcome.theta_hat)?;
        let params = RawParams::get_pars(&raw, k)?;
        let log_likelihood = n as f64 * outcome.value;
        tracing::debug!(
            log_likelihood,
            converged = outcome.converged,
            status = %outcome.status,
            "point estimate ready"
        );

        let covariance = delta_method_covariance(
            &|theta: &Theta| objective.evaluate(theta),
            &|theta: &Theta| -> OptResult<Array1<f64>> {
                self.codec.transform_back(theta).map_err(OptError::from)
            },
            &outcome.theta_hat,
            n,
            &self.options.fd,
        );

        let estimate = PointEstimate {
            raw,
            params,
            theta_hat: outcome.theta_hat,
            log_likelihood,
            n_obs: n,
            status: outcome.status,
            converged: outcome.converged,
            iterations: outcome.iterations,
            fn_evals: outcome.fn_evals,
            names: RawParams::names(k),
            diagnostics: likelihood.diagnostics().snapshot(),
        };

        match covariance {
            Ok(cov) => Ok(EstimationResult {
                estimate,
                std_errors: cov.std_errors,
                covariance: cov.covariance,
            }),
            Err(reason) => {
                tracing::warn!(%reason, "covariance of the estimate could not be computed");
                Err(RegressionError::CovarianceFailed { reason, estimate: Box::new(estimate) })
            }
        }
    }
}

/// Estimate with default options and the default `β[1] + β[2] = 1`
/// restriction.
///
/// `initial_guess = None` uses [`default_initial_guess`].
///
/// # Errors
/// Data validation errors from [`RegressionData::new`] and every error of
/// [`StudentTRegression::estimate`].
pub fn estimate(
    y: Array1<f64>, x: Array2<f64>, initial_guess: Option<Array1<f64>>,
) -> RegressionResult<EstimationResult> {
    let data = RegressionData::new(y, x)?;
    let guess = initial_guess.unwrap_or_else(|| default_initial_guess(data.n_coef()));
    StudentTRegression::default().estimate(&data, &guess)
}

/// Starting values `[5, 1, 1, 2, −1, 1, …]` for `k` coefficients.
///
/// `ν = 5` keeps the variance finite, and `β[1] = 2`, `β[2] = −1` satisfy the
/// default restriction. For `k < 3` the restriction slots that do not exist
/// are skipped.
pub fn default_initial_guess(k: usize) -> Array1<f64> {
    let mut guess = Array1::ones(k + 2);
    guess[0] = 5.0;
    for (j, value) in [(1, 2.0), (2, -1.0)] {
        if j < k {
            guess[2 + j] = value;
        }
    }
    guess
}
