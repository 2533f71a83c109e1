//! Raw-space parameters `(ν, σ, β)` of the Student-t regression.
//!
//! The flat raw vector is laid out `[ν, σ, β₀, …, β_{k−1}]` (length `k + 2`).
//! [`RawParams`] is its structured view. Positivity (`ν > 2`, `σ > 0`) and the
//! restriction are *not* enforced here: the likelihood treats out-of-range
//! values as boundary hits and the codec validates before transforming.
use ndarray::{Array1, s};

use crate::regression::{core::validation::validate_raw_len, errors::ParamResult};

/// Structured raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParams {
    /// Degrees of freedom `ν`.
    pub nu: f64,
    /// Scale `σ`.
    pub sigma: f64,
    /// Regression coefficients, length `k`.
    pub beta: Array1<f64>,
}

impl RawParams {
    /// Split a flat raw vector of length `k + 2` into `(ν, σ, β)`.
    ///
    /// # Errors
    /// [`ParamError::SizeMismatch`](crate::regression::errors::ParamError::SizeMismatch)
    /// when `vp.len() != k + 2`.
    pub fn get_pars(vp: &Array1<f64>, k: usize) -> ParamResult<Self> {
        validate_raw_len(vp.len(), k)?;
        Ok(Self { nu: vp[0], sigma: vp[1], beta: vp.slice(s![2..]).to_owned() })
    }

    /// Number of regression coefficients `k`.
    pub fn n_coef(&self) -> usize {
        self.beta.len()
    }

    /// Flatten back to `[ν, σ, β₀, …]`.
    pub fn to_vec(&self) -> Array1<f64> {
        let mut out = Array1::zeros(self.beta.len() + 2);
        out[0] = self.nu;
        out[1] = self.sigma;
        out.slice_mut(s![2..]).assign(&self.beta);
        out
    }

    /// Display names for a model with `k` coefficients: `["Nu", "Sigma", "B1", …, "Bk"]`.
    ///
    /// Coefficient names are 1-based; `B1` labels `β₀` (the constant).
    pub fn names(k: usize) -> Vec<String> {
        let mut names = Vec::with_capacity(k + 2);
        names.push("Nu".to_string());
        names.push("Sigma".to_string());
        names.extend((1..=k).map(|i| format!("B{i}")));
        names
    }
}
