//! inference — covariance and standard errors for reparameterized estimates.
//!
//! Purpose
//! -------
//! Provide post-estimation uncertainty quantification on top of a fitted
//! model whose optimizer ran in an unconstrained space `θ`. This module
//! inverts the observed information in `θ` and carries the result back to
//! the model's raw parameters with the delta method.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for singular information, invalid variances and
//!   failed finite-difference derivatives.
//! - Invert `n · H_obj` after a reciprocal-condition screen via
//!   [`invert_information`].
//! - Compose the Hessian, the inverse-transform Jacobian and the delta
//!   method in [`delta_method_covariance`], returning a
//!   [`CovarianceEstimate`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are supplied on the **average negative log-likelihood**
//!   scale; the sample size is passed separately.
//! - Covariance matrices are square and symmetric; helper routines assume
//!   inputs and outputs match the model's parameter dimensions.
//! - All numerical routines return [`InferenceError`] on failure rather
//!   than panicking.
//!
//! Conventions
//! -----------
//! - Parameters `θ` live in **unconstrained optimizer space**; the mapping to
//!   raw parameters is passed in as a closure.
//! - Functions are pure with respect to I/O: no logging and no global state.
//!
//! Downstream usage
//! ----------------
//! - After fitting, the regression driver calls [`delta_method_covariance`]
//!   with its objective and `transform_back` closures at `θ̂`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover inversion and singularity screening, the delta method
//!   on linear and exponential maps, and invalid-variance detection.
//! - The integration test exercises the full chain on simulated regression
//!   data, including a duplicated design column.

pub mod covariance;
pub mod errors;
pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::covariance::{CovarianceEstimate, delta_method_covariance, standard_errors};
pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{invert_information, reciprocal_condition};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use student_t_mle::inference::prelude::*;` to
// import the primary inference surface in a single line.

pub mod prelude {
    pub use super::covariance::{CovarianceEstimate, delta_method_covariance};
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::invert_information;
}
