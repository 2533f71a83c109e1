//! regression — restricted Student-t linear regression by constrained MLE.
//!
//! Purpose
//! -------
//! Estimate `y = Xβ + σ·ε`, `ε ~ t_ν`, under the linear restriction
//! `β[1] + β[2] = 1`, with `ν > 2` and `σ > 0`, by maximum likelihood in an
//! unconstrained reparameterized space, and recover standard errors of the
//! raw parameters with a finite-difference delta method.
//!
//! Key behaviors
//! -------------
//! - [`RegressionData`] validates `(y, X)` once per estimation.
//! - [`ParameterCodec`] maps raw `(ν, σ, β)` to
//!   `θ = (ln(ν − 2), ln σ, β without β[2])` and back, under a configurable
//!   [`SumRestriction`].
//! - [`StudentTLikelihood`] evaluates per-observation log densities with a
//!   `−∞` boundary policy; [`Objective`] is the transformed-space average
//!   negative log-likelihood.
//! - [`StudentTRegression::estimate`] (and the free [`estimate`]) run the
//!   L-BFGS optimizer and the covariance step, returning an
//!   [`EstimationResult`].
//! - [`simulate`] generates seeded data; [`report`] renders parameter tables.
//!
//! Invariants & assumptions
//! ------------------------
//! - Raw vectors have length `k + 2`, transformed vectors `k + 1`; the
//!   default restriction needs `k ≥ 3`.
//! - Every iterate of the optimizer maps to `ν > 2`, `σ > 0` and an exactly
//!   satisfied restriction.
//! - Estimation is single-threaded and deterministic for identical inputs.
//!
//! Conventions
//! -----------
//! - Indices are 0-based; display names are `Nu`, `Sigma`, `B1`, …, `Bk`.
//! - Errors: [`RegressionError`] for the estimation API, [`ParamError`] for
//!   codec preconditions. Non-convergence is reported on the result, not as
//!   an error.
//! - Progress is logged through `tracing`; the library installs no
//!   subscriber.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use student_t_mle::regression::{ParameterCodec, RegressionData, RegressionError};
//! use ndarray::array;
//!
//! let data = RegressionData::new(array![1.0, 2.0], array![[1.0, 0.5], [1.0, 0.7]])?;
//! assert_eq!(data.n_coef(), 2);
//! let theta = ParameterCodec::default().transform(&array![4.0, 0.1, 1.0, 0.8, 0.2])?;
//! assert_eq!(theta.len(), 4);
//! # Ok::<(), RegressionError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live in each submodule.
//! - `tests/integration_student_t_pipeline.rs` runs the seeded `n = 500`
//!   scenario end to end.

pub mod core;
pub mod errors;
pub mod models;
pub mod report;
pub mod simulate;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::core::{
    DiagnosticsSnapshot, EstimationOptions, EstimationResult, EvalDiagnostics, ParameterCodec,
    PointEstimate, RawParams, RegressionData, SumRestriction,
};
pub use self::errors::{ParamError, ParamResult, RegressionError, RegressionResult};
pub use self::models::{
    Objective, StudentTLikelihood, StudentTRegression, default_initial_guess, estimate,
};
pub use self::report::{ParameterTable, TableStyle, summary};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use student_t_mle::regression::prelude::*;` to
// import the primary regression surface in a single line.

pub mod prelude {
    pub use super::core::{
        EstimationOptions, EstimationResult, ParameterCodec, RegressionData, SumRestriction,
    };
    pub use super::errors::{ParamError, RegressionError, RegressionResult};
    pub use super::models::{StudentTRegression, default_initial_guess, estimate};
}
