//! Numeric aliases shared by the optimizer, the finite-difference helpers and
//! the covariance step, plus the two concrete L-BFGS solver types.
//!
//! `Theta` is always the unconstrained (transformed) parameter vector; the
//! raw `(ν, σ, β)` vector never reaches this layer. `Cost` is the value
//! argmin minimizes, i.e. the negated mean log-likelihood.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Transformed parameter vector, length `k + 1` for the regression.
pub type Theta = Array1<f64>;

/// Gradient with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Square second-derivative matrix over [`Theta`].
pub type Hessian = Array2<f64>;

/// Outputs × inputs derivative matrix of a vector map of [`Theta`].
pub type Jacobian = Array2<f64>;

/// Minimized scalar.
pub type Cost = f64;

/// argmin's evaluation counters keyed by name (`"cost_count"`, …).
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
