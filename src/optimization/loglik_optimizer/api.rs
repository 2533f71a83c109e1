//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`),
//! and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds an L-BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor (initial params,
///   max iters, optional observers) and returns an `OptimOutcome`.
///
/// # Parameters
/// - `f`: Your model implementing [`LogLikelihood`].
/// - `theta0`: Initial parameter vector.
/// - `data`: Model data passed through to `value`/`grad`.
/// - `opts`: Optimizer options (tolerances, line search choice, verbosity, etc.).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, best value `ℓ(θ̂)`,
/// termination status, iteration counts, function evaluation counts, and
/// optionally the gradient norm.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use student_t_mle::optimization::errors::{OptError, OptResult};
/// use student_t_mle::optimization::loglik_optimizer::{
///     LogLikelihood, MLEOptions, Theta, maximize,
/// };
///
/// struct Concave;
/// impl LogLikelihood for Concave {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Concave, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use crate::optimization::loglik_optimizer::Tolerances;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `maximize` on a smooth concave toy log-likelihood, through the
    //   finite-difference gradient path.
    // - Early rejection by `LogLikelihood::check`.
    // -------------------------------------------------------------------------

    struct ShiftedBowl {
        center: Array1<f64>,
    }

    impl LogLikelihood for ShiftedBowl {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            let diff = theta - &self.center;
            Ok(-diff.dot(&diff))
        }

        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != self.center.len() {
                return Err(OptError::ParamLengthMismatch {
                    expected: self.center.len(),
                    actual: theta.len(),
                });
            }
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `maximize` finds the mode of a concave quadratic.
    //
    // Given
    // -----
    // - `ℓ(θ) = -||θ - c||²` with `c = [1, -2]`, start at the origin.
    //
    // Expect
    // ------
    // - `theta_hat ≈ c`, `value ≈ 0`, and `converged == true`.
    fn maximize_recovers_mode_of_quadratic() {
        // Arrange
        let model = ShiftedBowl { center: array![1.0, -2.0] };
        let tols = Tolerances::new(Some(1e-6), None, Some(200)).expect("valid tolerances");
        let opts =
            MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).expect("valid options");

        // Act
        let out = maximize(&model, array![0.0, 0.0], &(), &opts).expect("maximize succeeds");

        // Assert
        assert!(out.converged, "{}", out.status);
        assert!((out.theta_hat[0] - 1.0).abs() < 1e-4);
        assert!((out.theta_hat[1] + 2.0).abs() < 1e-4);
        assert!(out.value.abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `check` runs before any solver work.
    //
    // Given
    // -----
    // - A model expecting two parameters and a three-element start.
    //
    // Expect
    // ------
    // - `Err(ParamLengthMismatch { expected: 2, actual: 3 })`.
    fn maximize_rejects_initial_guess_failing_check() {
        // Arrange
        let model = ShiftedBowl { center: array![1.0, -2.0] };

        // Act
        let err = maximize(&model, array![0.0, 0.0, 0.0], &(), &MLEOptions::default())
            .expect_err("check should fail");

        // Assert
        assert_eq!(err, OptError::ParamLengthMismatch { expected: 2, actual: 3 });
    }
}
