//! Synthetic data for the Student-t regression.
//!
//! Generates a design with a constant column and `U[0, 1)` regressors, and a
//! response `y = Xβ + σ·t_ν`. Everything is driven by an explicit
//! `StdRng` seed so a run can be reproduced exactly.
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StudentT, Uniform};

use crate::regression::{
    core::{
        params::RawParams,
        validation::{validate_betas, validate_dof, validate_scale},
    },
    errors::{ParamError, RegressionError, RegressionResult},
};

/// `n × k` design: column 0 is one, the rest are `U[0, 1)` draws.
///
/// Draws are taken row by row.
pub fn simulate_design<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Array2<f64> {
    let uniform = Uniform::new(0.0, 1.0);
    Array2::from_shape_fn((n, k), |(_, j)| if j == 0 { 1.0 } else { uniform.sample(rng) })
}

/// Response `y = Xβ + σ·ε` with `ε ~ t_ν` i.i.d.
///
/// # Errors
/// - `ParamError::SizeMismatch` if `truth.len() != x.ncols() + 2`.
/// - `ParamError::InvalidDof` / `InvalidScale` / `InvalidBeta` for parameters
///   outside `ν > 2`, `σ > 0`, finite β.
pub fn simulate_response<R: Rng + ?Sized>(
    truth: &Array1<f64>, x: &Array2<f64>, rng: &mut R,
) -> RegressionResult<Array1<f64>> {
    let params = RawParams::get_pars(truth, x.ncols())?;
    validate_dof(params.nu)?;
    validate_scale(params.sigma)?;
    validate_betas(params.beta.view())?;
    let t_dist =
        StudentT::new(params.nu).map_err(|_| ParamError::InvalidDof { value: params.nu })?;
    let noise = Array1::from_shape_fn(x.nrows(), |_| params.sigma * t_dist.sample(rng));
    Ok(x.dot(&params.beta) + noise)
}

/// simulate — seeded `(y, X)` for a raw parameter vector.
///
/// Parameters
/// ----------
/// - `truth`: `&Array1<f64>`
///   `[ν, σ, β₀, …, β_{k−1}]`; `k` is taken from its length.
/// - `n`: `usize`
///   Number of observations (≥ 1).
/// - `seed`: `u64`
///   Seed for `StdRng::seed_from_u64`; the design is drawn first, then the
///   noise.
///
/// Returns
/// -------
/// `RegressionResult<(Array1<f64>, Array2<f64>)>`
///   The response and the `n × k` design.
///
/// Errors
/// ------
/// - `RegressionError::EmptySeries` when `n == 0`.
/// - `RegressionError::Param` when `truth` is shorter than three entries or
///   holds invalid values.
pub fn simulate(
    truth: &Array1<f64>, n: usize, seed: u64,
) -> RegressionResult<(Array1<f64>, Array2<f64>)> {
    if n == 0 {
        return Err(RegressionError::EmptySeries);
    }
    if truth.len() < 3 {
        return Err(ParamError::SizeMismatch { expected: 3, actual: truth.len() }.into());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let x = simulate_design(n, truth.len() - 2, &mut rng);
    let y = simulate_response(truth, &x, &mut rng)?;
    tracing::debug!(n, k = x.ncols(), seed, "simulated regression data");
    Ok((y, x))
}
