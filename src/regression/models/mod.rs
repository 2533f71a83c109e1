//! models — the restricted Student-t regression model and its estimator.
//!
//! Purpose
//! -------
//! Provide the user-facing estimation API on top of `regression::core`:
//! the per-observation likelihood, the transformed-space objective handed
//! to the generic L-BFGS driver, and the estimator that composes codec,
//! optimizer and delta-method covariance.
//!
//! Key behaviors
//! -------------
//! - [`StudentTLikelihood`] evaluates `ln t_ν(e_i/σ) − ln σ` and applies the
//!   `−∞` boundary policy for `σ ≤ 0` or `ν ≤ 2`.
//! - [`Objective`] is `θ ↦ −mean ℓ_i(transform_back(θ))` and implements
//!   [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood).
//! - [`StudentTRegression::estimate`] and the free [`estimate`] run the full
//!   pipeline; [`default_initial_guess`] supplies restriction-conforming
//!   starting values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each estimation call owns a fresh likelihood, so diagnostics describe
//!   that call only; nothing is shared between calls.
//! - Data are validated once in `RegressionData::new`; the likelihood only
//!   checks the parameter length.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the model; the end-to-end scenario on
//!   simulated data lives in `tests/`.

pub mod student_t;

pub use self::student_t::{
    Objective, StudentTLikelihood, StudentTRegression, default_initial_guess, estimate,
};
