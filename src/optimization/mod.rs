//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the model-agnostic optimization layer used by the regression
//! estimator: an argmin-backed log-likelihood maximizer, finite-difference
//! derivatives, bounded-parameter transforms, and a single error/result
//! surface. Callers implement a log-likelihood, choose tolerances, and obtain
//! an optimum and diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Maximize log-likelihoods `ℓ(θ)` with L-BFGS (`loglik_optimizer`),
//!   including solver and stopping-criterion configuration.
//! - Approximate gradients, Hessians and Jacobians by finite differences
//!   (`loglik_optimizer::finite_diff`).
//! - Supply the shifted log/exp transforms and the delta method
//!   (`numerical_stability`).
//! - Normalize configuration issues, numerical failures, backend errors and
//!   model-side errors into `errors::OptError` / `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained space `θ`; feasibility of the
//!   model parameters is the responsibility of the model's reparameterization.
//! - Invalid states are reported as `OptError`, not panics.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   outcomes are expressed in terms of `ℓ`.
//! - Parameters, gradients, Hessians and Jacobians use the `ndarray` aliases
//!   in `loglik_optimizer::types`.
//! - Progress is reported through `tracing` events only; no subscriber is
//!   installed here.
//!
//! Downstream usage
//! ----------------
//! - `regression::models::student_t` implements `LogLikelihood` for its
//!   objective and calls `maximize`.
//! - `inference::covariance` uses `central_hessian`, `central_jacobian` and
//!   `delta_method`.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover solver wiring, option validation, finite
//!   differences on analytic functions, error conversions, and a toy
//!   maximization.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use student_t_mle::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
