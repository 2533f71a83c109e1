//! core — data, parameters, codec and configuration for the regression.
//!
//! Purpose
//! -------
//! Collect the building blocks the Student-t likelihood and estimator rest
//! on: validated data, the raw parameter layout, the restriction-aware
//! reparameterization, evaluation diagnostics, options, and result types.
//!
//! Key behaviors
//! -------------
//! - [`RegressionData`] validates `(y, X)` once.
//! - [`RawParams`] splits `[ν, σ, β]` and names its entries.
//! - [`ParameterCodec`] maps raw ↔ θ under a [`SumRestriction`].
//! - [`EvalDiagnostics`] counts evaluations and boundary hits during a call.
//! - [`EstimationOptions`] bundles optimizer and finite-difference settings.
//! - [`PointEstimate`] / [`EstimationResult`] carry the outcome.
//!
//! Invariants & assumptions
//! ------------------------
//! - Raw vectors have length `k + 2`, transformed vectors `k + 1`.
//! - The codec needs at least `max(kept, eliminated) + 1` coefficients
//!   (three for the default restriction).
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the codec tests hold the
//!   round-trip and restriction-preservation properties.

pub mod codec;
pub mod data;
pub mod diagnostics;
pub mod options;
pub mod params;
pub mod results;
pub mod validation;

pub use self::codec::{ParameterCodec, SumRestriction};
pub use self::data::RegressionData;
pub use self::diagnostics::{DiagnosticsSnapshot, EvalDiagnostics};
pub use self::options::EstimationOptions;
pub use self::params::RawParams;
pub use self::results::{EstimationResult, PointEstimate};
