//! loglik_optimizer — argmin L-BFGS driver for mean log-likelihoods.
//!
//! Purpose
//! -------
//! Maximize `ℓ̄(θ)` over an unconstrained θ. The regression objective
//! implements [`LogLikelihood`]; [`maximize`] validates the start, builds an
//! L-BFGS solver with the configured line search, runs it, and returns an
//! [`OptimOutcome`] in log-likelihood terms.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ̄` into the argmin cost `−ℓ̄`, falls
//!   back to a forward-difference gradient, and rejects non-finite costs.
//! - [`builders`] wire More–Thuente or Hager–Zhang line searches with the
//!   tolerances and L-BFGS memory from [`MLEOptions`].
//! - [`finite_diff`] also provides the two-sided Hessian and Jacobian used by
//!   the covariance step after the fit.
//!
//! Conventions
//! -----------
//! - θ never carries constraints; the codec in `regression::core` keeps every
//!   iterate feasible.
//! - Reaching `max_iter` is not an error: `converged == false` and the
//!   solver's status text explain it.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign handling in the adapter, option validation,
//!   finite differences on analytic functions, and a quadratic maximization.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::finite_diff::{FiniteDiffOptions, central_hessian, central_jacobian};
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Jacobian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use student_t_mle::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::finite_diff::FiniteDiffOptions;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
