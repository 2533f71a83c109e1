//! inference::covariance — delta-method covariance of a reparameterized MLE.
//!
//! Purpose
//! -------
//! Recover the covariance of raw-space estimates when the optimizer worked
//! in a transformed space. The transformed-space covariance comes from the
//! finite-difference Hessian of the average objective; the raw-space
//! covariance follows by the delta method with a finite-difference Jacobian
//! of the inverse transform.
//!
//! Key behaviors
//! -------------
//! - `H_obj`: [`central_hessian`] of the objective at `θ̂`.
//! - `Cov_tr = (n · H_obj)⁻¹` via [`invert_information`].
//! - `J`: [`central_jacobian`] of the inverse transform at `θ̂`, shape
//!   `m × p` with `m` raw and `p` transformed parameters.
//! - `Cov = J · Cov_tr · Jᵀ`; standard errors are `sqrt(diag(Cov))`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is `−mean log-likelihood` (average scale, minimized), so
//!   `n · H_obj` is the observed information of the full sample.
//! - Both closures are evaluated only at points within one relative step of
//!   `θ̂`; any evaluation error aborts the computation.
//!
//! Conventions
//! -----------
//! - A negative or non-finite diagonal entry of `Cov` is an error rather
//!   than a `NaN` standard error.
//!
//! Testing notes
//! -------------
//! - Unit tests use objectives and maps with closed-form derivatives: a
//!   quadratic objective with an identity map, a linear map, and a scaling
//!   map, plus the singular and error-propagation paths.
use ndarray::{Array1, Array2};

use crate::{
    inference::{
        errors::{InferenceError, InferenceResult},
        hessian::invert_information,
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{FiniteDiffOptions, Theta, central_hessian, central_jacobian},
        numerical_stability::delta_method,
    },
};

/// Covariance of an estimate in both parameter spaces.
///
/// - `theta_covariance`: `p × p`, transformed space.
/// - `covariance`: `m × m`, raw space.
/// - `std_errors`: length `m`, `sqrt(diag(covariance))`.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceEstimate {
    pub theta_covariance: Array2<f64>,
    pub covariance: Array2<f64>,
    pub std_errors: Array1<f64>,
}

/// delta_method_covariance — raw-space covariance and standard errors.
///
/// Parameters
/// ----------
/// - `objective`: `&F`
///   Average negative log-likelihood `θ ↦ −ℓ̄(θ)`.
/// - `transform_back`: `&G`
///   Inverse transform `θ ↦ raw`.
/// - `theta_hat`: `&Theta`
///   Optimum in transformed space, length `p`.
/// - `n_obs`: `usize`
///   Sample size used to rescale the average Hessian.
/// - `fd`: `&FiniteDiffOptions`
///   Steps for both finite-difference derivatives.
///
/// Returns
/// -------
/// `InferenceResult<CovarianceEstimate>`
///
/// Errors
/// ------
/// - `InferenceError::Opt` from either finite-difference routine (closure
///   errors, non-finite derivatives, inconsistent output lengths).
/// - `InferenceError::SingularHessian` from [`invert_information`].
/// - `InferenceError::NegativeVariance` / `InferenceError::NonFiniteVariance`
///   for an invalid diagonal entry of the raw covariance.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{Array1, array};
/// # use student_t_mle::inference::delta_method_covariance;
/// # use student_t_mle::optimization::errors::OptResult;
/// # use student_t_mle::optimization::loglik_optimizer::FiniteDiffOptions;
/// // Objective 0.5·θ² has H = 1; with n = 4 the θ-variance is 1/4.
/// let objective = |t: &Array1<f64>| -> OptResult<f64> { Ok(0.5 * t[0] * t[0]) };
/// // raw = 3θ triples the standard error.
/// let back = |t: &Array1<f64>| -> OptResult<Array1<f64>> { Ok(t * 3.0) };
/// let est = delta_method_covariance(&objective, &back, &array![0.0], 4, &FiniteDiffOptions::default())?;
/// assert!((est.std_errors[0] - 1.5).abs() < 1e-4);
/// # Ok::<(), student_t_mle::inference::InferenceError>(())
/// ```
pub fn delta_method_covariance<F, G>(
    objective: &F, transform_back: &G, theta_hat: &Theta, n_obs: usize, fd: &FiniteDiffOptions,
) -> InferenceResult<CovarianceEstimate>
where
    F: Fn(&Theta) -> OptResult<f64>,
    G: Fn(&Theta) -> OptResult<Array1<f64>>,
{
    let hess_obj = central_hessian(objective, theta_hat, fd)?;
    let theta_covariance = invert_information(&hess_obj, n_obs)?;
    let jac = central_jacobian(transform_back, theta_hat, fd)?;
    if jac.ncols() != theta_covariance.nrows() {
        return Err(InferenceError::DimMismatch {
            expected: (jac.nrows(), theta_covariance.nrows()),
            found: jac.dim(),
        });
    }
    let covariance = delta_method(&jac, &theta_covariance);
    let std_errors = standard_errors(&covariance)?;
    Ok(CovarianceEstimate { theta_covariance, covariance, std_errors })
}

/// Square roots of the diagonal of a covariance matrix.
///
/// # Errors
/// - `InferenceError::NonFiniteVariance` for a NaN/±inf diagonal entry.
/// - `InferenceError::NegativeVariance` for a negative diagonal entry.
pub fn standard_errors(covariance: &Array2<f64>) -> InferenceResult<Array1<f64>> {
    covariance
        .diag()
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !value.is_finite() {
                Err(InferenceError::NonFiniteVariance { index, value })
            } else if value < 0.0 {
                Err(InferenceError::NegativeVariance { index, value })
            } else {
                Ok(value.sqrt())
            }
        })
        .collect()
}
