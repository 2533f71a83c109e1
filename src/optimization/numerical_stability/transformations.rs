//! Numerical stability utilities.
//!
//! Provides the shifted log/exp pair used to map bounded-below parameters
//! onto the real line and back, the delta-method sandwich, and the small
//! tolerances shared by the estimation and inference layers.
//!
//! # Provided items
//! - [`log_shifted(x, floor)`]: `ln(x − floor)`, mapping `(floor, ∞)` → ℝ.
//! - [`exp_shifted(t, floor)`]: `exp(t) + floor`, mapping ℝ → `(floor, ∞)`.
//! - [`delta_method(jac, cov)`]: `J · Σ · Jᵀ`, symmetrized.
//! - [`EIGEN_EPS`], [`SINGULAR_RCOND`], [`ROUND_TRIP_TOL`].
use ndarray::Array2;

/// Eigenvalues at or below this magnitude are treated as zero.
pub const EIGEN_EPS: f64 = 1e-12;

/// Reciprocal condition number below which an information matrix is
/// declared singular.
///
/// With relative finite-difference steps the well-posed regression
/// information matrices sit several orders of magnitude above this value,
/// while an unidentified coefficient drives the ratio to the noise floor of
/// the second differences.
pub const SINGULAR_RCOND: f64 = 1e-6;

/// Largest tolerated deviation after mapping a raw vector to the transformed
/// space and back.
pub const ROUND_TRIP_TOL: f64 = 1e-3;

/// `ln(x − floor)`.
///
/// Maps `(floor, ∞)` onto ℝ. Inputs at or below `floor` yield `-∞` or `NaN`;
/// callers validate the domain first.
pub fn log_shifted(x: f64, floor: f64) -> f64 {
    (x - floor).ln()
}

/// `exp(t) + floor`, the inverse of [`log_shifted`].
///
/// Maps ℝ onto `(floor, ∞)`; overflows to `+∞` for `t` above roughly 709.
pub fn exp_shifted(t: f64, floor: f64) -> f64 {
    t.exp() + floor
}

/// Delta-method covariance `J · Σ · Jᵀ`.
///
/// # Parameters
/// - `jac`: `m × n` Jacobian of the map, evaluated at the estimate.
/// - `cov`: `n × n` covariance in the input space.
///
/// # Returns
/// The `m × m` covariance of the mapped parameters, with its two triangles
/// averaged to remove round-off asymmetry.
///
/// # Panics
/// Panics if `jac.ncols() != cov.nrows()` or `cov` is not square; callers
/// check dimensions first.
pub fn delta_method(jac: &Array2<f64>, cov: &Array2<f64>) -> Array2<f64> {
    let mut out = jac.dot(cov).dot(&jac.t());
    let m = out.nrows();
    for i in 0..m {
        for j in 0..i {
            let avg = 0.5 * (out[[i, j]] + out[[j, i]]);
            out[[i, j]] = avg;
            out[[j, i]] = avg;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The shifted log/exp pair as mutual inverses on their domains.
    // - `delta_method` on a linear map, where it is exact.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check `exp_shifted ∘ log_shifted` is the identity above the floor.
    //
    // Given
    // -----
    // - Values 2.5, 4, 30 with floor 2, and values 0.1, 1 with floor 0.
    //
    // Expect
    // ------
    // - Recovery within 1e-12 relative error.
    fn shifted_log_and_exp_are_inverse() {
        // Arrange
        let cases = [(2.5, 2.0), (4.0, 2.0), (30.0, 2.0), (0.1, 0.0), (1.0, 0.0)];

        for (x, floor) in cases {
            // Act
            let back = exp_shifted(log_shifted(x, floor), floor);

            // Assert
            assert!(((back - x) / x).abs() < 1e-12, "x = {x}, floor = {floor}, back = {back}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the delta method reproduces `A Σ Aᵀ` for a linear map.
    //
    // Given
    // -----
    // - `A = [[1, 0], [0, 2], [1, -1]]` and `Σ = [[2, 0.5], [0.5, 1]]`.
    //
    // Expect
    // ------
    // - A symmetric 3×3 matrix equal to the hand-computed product.
    fn delta_method_matches_linear_sandwich() {
        // Arrange
        let jac = array![[1.0, 0.0], [0.0, 2.0], [1.0, -1.0]];
        let cov = array![[2.0, 0.5], [0.5, 1.0]];
        let expected = array![[2.0, 1.0, 1.5], [1.0, 4.0, -1.0], [1.5, -1.0, 2.0]];

        // Act
        let out = delta_method(&jac, &cov);

        // Assert
        assert_eq!(out.dim(), (3, 3));
        for ((i, j), &value) in out.indexed_iter() {
            assert!((value - expected[[i, j]]).abs() < 1e-12, "({i},{j}) = {value}");
        }
    }
}
