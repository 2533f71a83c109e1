//! numerical_stability — bounded-parameter transforms and covariance helpers.
//!
//! Purpose
//! -------
//! Collect the small numerical primitives shared by the codec and the
//! inference layer: the shifted log/exp pair that keeps `ν > 2` and `σ > 0`
//! feasible while the optimizer moves freely, the delta-method sandwich, and
//! the tolerances that decide singularity and round-trip agreement.
//!
//! Key behaviors
//! -------------
//! - `log_shifted` / `exp_shifted` map `(floor, ∞)` ↔ ℝ.
//! - `delta_method` turns a transformed-space covariance into raw-space
//!   covariance given the Jacobian of the inverse map.
//! - `EIGEN_EPS`, `SINGULAR_RCOND` and `ROUND_TRIP_TOL` are the shared
//!   thresholds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite and already validated; these helpers never return
//!   errors and never log.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check the transform pair as inverses
//!   and the delta method on a linear map.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, ROUND_TRIP_TOL, SINGULAR_RCOND, delta_method, exp_shifted, log_shifted,
};

pub mod prelude {
    pub use super::transformations::{
        ROUND_TRIP_TOL, SINGULAR_RCOND, delta_method, exp_shifted, log_shifted,
    };
}
