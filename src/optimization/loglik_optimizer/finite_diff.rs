//! loglik_optimizer::finite_diff — finite-difference derivatives with validation.
//!
//! Purpose
//! -------
//! Provide the numerical derivatives the estimation layer needs without
//! analytic formulas: a forward-difference gradient fallback for the
//! optimizer adapter, and two-sided Hessian / Jacobian approximations for
//! post-estimation covariance work.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient (via `finitediff`) with
//!   error capture and post-hoc validation.
//! - [`central_hessian`]: two-sided second differences of a fallible scalar
//!   objective with per-coordinate relative steps, filled symmetrically.
//! - [`central_jacobian`]: two-sided first differences of a fallible vector
//!   map, returned as an `m × n` matrix (outputs × inputs).
//! - [`FiniteDiffOptions`]: validated step configuration shared by both.
//!
//! Invariants & assumptions
//! ------------------------
//! - The step for coordinate `i` is `h_i = rel_step · max(|θ_i|, min_scale)`,
//!   rounded so that `θ_i + h_i` is exactly representable relative to `θ_i`.
//! - Any error raised by an evaluated function aborts the derivative and is
//!   returned unchanged.
//! - Returned matrices satisfy [`validate_hessian`] / [`validate_jacobian`].
//!
//! Conventions
//! -----------
//! - `finitediff` is used for the optimizer gradient where absolute steps of
//!   order `sqrt(ε)` are adequate. The Hessian and Jacobian use relative
//!   steps of order `ε^{1/3}` because second differences with `sqrt(ε)`
//!   steps lose most significant digits.
//!
//! Testing notes
//! -------------
//! - Unit tests check analytic quadratics, a nonlinear vector map, error
//!   propagation from the evaluated closure, and option validation.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Grad, Theta,
        types::{Hessian, Jacobian},
        validation::{
            validate_grad, validate_hessian, validate_jacobian, verify_min_scale, verify_rel_step,
        },
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2};
use std::cell::RefCell;

/// Default relative step, `ε^{1/3}`.
pub const DEFAULT_REL_STEP: f64 = 6.055_454_452_393_343e-6;

/// Default lower bound on the magnitude used to scale a step.
pub const DEFAULT_MIN_SCALE: f64 = 1e-2;

/// Step configuration for [`central_hessian`] and [`central_jacobian`].
///
/// - `rel_step`: relative step, finite and in `(0, 1)`.
/// - `min_scale`: floor applied to `|θ_i|` before scaling, finite and `> 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDiffOptions {
    pub rel_step: f64,
    pub min_scale: f64,
}

impl FiniteDiffOptions {
    /// Construct validated finite-difference options.
    ///
    /// # Errors
    /// - [`OptError::InvalidRelStep`] if `rel_step` is non-finite or outside `(0, 1)`.
    /// - [`OptError::InvalidMinScale`] if `min_scale` is non-finite or `≤ 0`.
    pub fn new(rel_step: f64, min_scale: f64) -> OptResult<Self> {
        verify_rel_step(rel_step)?;
        verify_min_scale(min_scale)?;
        Ok(Self { rel_step, min_scale })
    }
}

impl Default for FiniteDiffOptions {
    fn default() -> Self {
        Self { rel_step: DEFAULT_REL_STEP, min_scale: DEFAULT_MIN_SCALE }
    }
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Purpose
/// -------
/// Compute a forward-difference approximation to the gradient of a scalar
/// objective at `theta`, while capturing any error raised inside the
/// evaluation closure.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Evaluation point; its length is the expected gradient length.
/// - `func`: `&G`
///   Objective closure. It must route evaluation errors into `closure_err`
///   and return `NaN` in that case.
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Shared error slot, cleared on entry and inspected after differencing.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   The validated gradient, or the first captured / validation error.
///
/// Errors
/// ------
/// - Any error captured in `closure_err` (via `From<Error> for OptError`).
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// central_hessian — two-sided finite-difference Hessian of a scalar function.
///
/// Purpose
/// -------
/// Approximate `∂²f/∂θ_i∂θ_j` at `theta` for a fallible scalar function
/// using the symmetric second-difference formula
///
/// ```text
/// H_ij = [f(θ+h_i+h_j) − f(θ+h_i) − f(θ+h_j) + 2f(θ)
///         − f(θ−h_i) − f(θ−h_j) + f(θ−h_i−h_j)] / (2 h_i h_j)
/// ```
///
/// which reduces to the classical `[f(θ+2h) − 2f(θ+h) + 2f(θ) − 2f(θ−h) + f(θ−2h)] / 2h²`
/// on the diagonal.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Scalar function `θ ↦ f(θ)`; any `Err` aborts the computation.
/// - `theta`: `&Theta`
///   Evaluation point of length `n`.
/// - `opts`: `&FiniteDiffOptions`
///   Relative step and minimum scale.
///
/// Returns
/// -------
/// `OptResult<Hessian>`
///   A finite, symmetric `n × n` matrix.
///
/// Errors
/// ------
/// - Any error returned by `f`.
/// - `OptError::InvalidHessian` if a non-finite entry is produced.
///
/// Notes
/// -----
/// - Uses `1 + 2n + n(n+1)` evaluations of `f`.
pub fn central_hessian<F>(f: &F, theta: &Theta, opts: &FiniteDiffOptions) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let dim = theta.len();
    let steps = fd_steps(theta, opts);
    let f0 = f(theta)?;

    let mut f_plus = Array1::<f64>::zeros(dim);
    let mut f_minus = Array1::<f64>::zeros(dim);
    for i in 0..dim {
        f_plus[i] = f(&shifted(theta, &[(i, steps[i])]))?;
        f_minus[i] = f(&shifted(theta, &[(i, -steps[i])]))?;
    }

    let mut hess: Hessian = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in i..dim {
            let f_pp = f(&shifted(theta, &[(i, steps[i]), (j, steps[j])]))?;
            let f_mm = f(&shifted(theta, &[(i, -steps[i]), (j, -steps[j])]))?;
            let numerator =
                f_pp - f_plus[i] - f_plus[j] + 2.0 * f0 - f_minus[i] - f_minus[j] + f_mm;
            let value = numerator / (2.0 * steps[i] * steps[j]);
            hess[[i, j]] = value;
            hess[[j, i]] = value;
        }
    }
    validate_hessian(&hess, dim)?;
    Ok(hess)
}

/// central_jacobian — two-sided finite-difference Jacobian of a vector map.
///
/// Purpose
/// -------
/// Approximate `J[r, c] = ∂g_r/∂θ_c` at `theta` for a fallible map
/// `g: ℝⁿ → ℝᵐ` using `(g(θ+h_c) − g(θ−h_c)) / 2h_c` column by column.
///
/// Parameters
/// ----------
/// - `g`: `&G`
///   Vector map; every evaluation must return the same output length.
/// - `theta`: `&Theta`
///   Evaluation point of length `n`.
/// - `opts`: `&FiniteDiffOptions`
///   Relative step and minimum scale.
///
/// Returns
/// -------
/// `OptResult<Jacobian>`
///   A finite `m × n` matrix.
///
/// Errors
/// ------
/// - Any error returned by `g`.
/// - `OptError::JacobianDimMismatch` if output lengths disagree between
///   evaluations.
/// - `OptError::InvalidJacobian` if a non-finite entry is produced.
pub fn central_jacobian<G>(g: &G, theta: &Theta, opts: &FiniteDiffOptions) -> OptResult<Jacobian>
where
    G: Fn(&Theta) -> OptResult<Array1<f64>>,
{
    let n_in = theta.len();
    let n_out = g(theta)?.len();
    let steps = fd_steps(theta, opts);

    let mut jac: Jacobian = Array2::zeros((n_out, n_in));
    for c in 0..n_in {
        let up = g(&shifted(theta, &[(c, steps[c])]))?;
        let down = g(&shifted(theta, &[(c, -steps[c])]))?;
        if up.len() != n_out || down.len() != n_out {
            return Err(OptError::JacobianDimMismatch {
                expected: (n_out, n_in),
                found: (up.len().max(down.len()), n_in),
            });
        }
        let column = (&up - &down) / (2.0 * steps[c]);
        jac.column_mut(c).assign(&column);
    }
    validate_jacobian(&jac, (n_out, n_in))?;
    Ok(jac)
}

// ---- Helper methods ----

/// Per-coordinate steps, adjusted so that `(θ_i + h_i) − θ_i == h_i` exactly.
fn fd_steps(theta: &Theta, opts: &FiniteDiffOptions) -> Array1<f64> {
    theta.mapv(|x| {
        let h = opts.rel_step * x.abs().max(opts.min_scale);
        (x + h) - x
    })
}

/// Copy of `theta` with each `(index, delta)` added in turn.
fn shifted(theta: &Theta, moves: &[(usize, f64)]) -> Theta {
    let mut out = theta.clone();
    for &(index, delta) in moves {
        out[index] += delta;
    }
    out
}
