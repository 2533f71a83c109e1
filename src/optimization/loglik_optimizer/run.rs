//! Executor wiring shared by both line-search variants of `maximize`.
//!
//! The solver always starts from the transformed starting values, runs until
//! one of its own tests fires or `max_iter` is reached, and the final argmin
//! state is folded into an [`OptimOutcome`] in log-likelihood terms.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
use argmin::core::{CostFunction, Executor, Gradient, IterState, Solver, State};
use argmin_math::ArgminL2Norm;

type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Run `solver` on `problem` from `theta0`.
///
/// With `opts.verbose` the starting log-likelihood and gradient norm are
/// emitted as a `debug` event and, under the `obs_slog` feature, a terminal
/// observer prints every iteration. The termination status is always logged.
///
/// # Errors
/// - argmin runtime errors (line-search failures, adapter errors surfaced
///   through the cost or gradient).
/// - Validation errors from [`OptimOutcome::new`] when the best parameter is
///   missing or the best value is not finite.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    if opts.verbose {
        let ll0 = -problem.cost(&theta0)?;
        let grad_norm = problem.gradient(&theta0).ok().map(|g| g.l2_norm());
        tracing::debug!(loglik = ll0, grad_norm = ?grad_norm, "L-BFGS starting point");
    }

    let max_iter = opts.tols.max_iter;
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(cap) => state.max_iters(cap as u64),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        )
    } else {
        executor
    };

    let state = executor.run()?.state().clone();
    into_outcome(state)
}

fn into_outcome(mut state: LbfgsState) -> OptResult<OptimOutcome> {
    let iterations = state.get_iter();
    let termination = state.get_termination_status().clone();
    tracing::debug!(iterations, status = ?termination, "L-BFGS finished");
    let fn_evals = state.get_func_counts().clone();
    let grad = state.take_gradient();
    // argmin tracks the minimized cost; the outcome reports ℓ̄ = −cost.
    let value = -state.get_best_cost();
    OptimOutcome::new(state.take_best_param(), value, termination, iterations, fn_evals, grad)
}
