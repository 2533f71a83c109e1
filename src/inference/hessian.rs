//! inference::hessian — inversion of the observed information matrix.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the *average* negative log-likelihood
//! into the covariance of the transformed-space estimate. The Hessian is
//! rescaled to the full-sample information, screened for near-singularity by
//! its reciprocal condition number, and inverted with `nalgebra`.
//!
//! Key behaviors
//! -------------
//! - Copy the `ndarray` Hessian into a `nalgebra::DMatrix` (`fill_dmatrix`)
//!   for eigen-based linear algebra.
//! - Compute the reciprocal condition number `min|λ| / max|λ|` from a
//!   symmetric eigendecomposition ([`reciprocal_condition`]).
//! - Reject matrices whose ratio is below [`SINGULAR_RCOND`] and invert the
//!   rest with `try_inverse` ([`invert_information`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The input Hessian is square, finite and symmetric; the finite-difference
//!   routine fills both triangles from the same second difference.
//! - Information is on the full-sample scale: `I = n · H_obj`, where `H_obj`
//!   is the Hessian of `−mean log-likelihood`. Its inverse is the
//!   transformed-space covariance `Cov_tr`.
//!
//! Conventions
//! -----------
//! - A failed inversion after a passing condition check is still reported as
//!   [`InferenceError::SingularHessian`], with `rcond` set to the computed
//!   ratio.
//! - No pseudoinverse is formed: an unidentified direction is an error, not
//!   an inflated standard error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the `ndarray` → `DMatrix` copy, inversion of a
//!   well-conditioned matrix against its analytic inverse, and rejection of
//!   an exactly singular and an ill-conditioned matrix.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        loglik_optimizer::Hessian,
        numerical_stability::transformations::{EIGEN_EPS, SINGULAR_RCOND},
    },
};
use nalgebra::DMatrix;
use ndarray::Array2;

/// invert_information — covariance from an average-scale Hessian.
///
/// Parameters
/// ----------
/// - `hess_obj`: `&Hessian`
///   `p×p` Hessian of the average negative log-likelihood at `θ̂`.
/// - `n_obs`: `usize`
///   Sample size `n` used to rescale to the full-sample information.
///
/// Returns
/// -------
/// `InferenceResult<Array2<f64>>`
///   `(n · H_obj)⁻¹`, symmetrized.
///
/// Errors
/// ------
/// - `InferenceError::DimMismatch` if `hess_obj` is not square.
/// - `InferenceError::SingularHessian` if the reciprocal condition number is
///   below [`SINGULAR_RCOND`] or the inversion fails.
pub fn invert_information(hess_obj: &Hessian, n_obs: usize) -> InferenceResult<Array2<f64>> {
    let (rows, cols) = hess_obj.dim();
    if rows != cols {
        return Err(InferenceError::DimMismatch { expected: (rows, rows), found: (rows, cols) });
    }
    let mut info = DMatrix::<f64>::zeros(rows, cols);
    fill_dmatrix(hess_obj, &mut info);
    info *= n_obs as f64;

    let rcond = reciprocal_condition(&info);
    if !(rcond >= SINGULAR_RCOND) {
        return Err(InferenceError::SingularHessian { rcond });
    }
    let inverse = info.try_inverse().ok_or(InferenceError::SingularHessian { rcond })?;

    let mut cov = Array2::<f64>::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            cov[[i, j]] = 0.5 * (inverse[(i, j)] + inverse[(j, i)]);
        }
    }
    Ok(cov)
}

/// reciprocal_condition — `min|λ| / max|λ|` of a symmetric matrix.
///
/// Returns `0.0` when the largest eigenvalue magnitude is at most
/// [`EIGEN_EPS`] (the zero matrix included) and `NaN` if the decomposition
/// produced non-finite eigenvalues.
pub fn reciprocal_condition(matrix: &DMatrix<f64>) -> f64 {
    let eigenvals = matrix.clone().symmetric_eigen().eigenvalues;
    let (min_abs, max_abs) = eigenvals
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &lambda| (lo.min(lambda.abs()), hi.max(lambda.abs())));
    if max_abs.is_nan() || min_abs.is_nan() {
        return f64::NAN;
    }
    if max_abs <= EIGEN_EPS {
        return 0.0;
    }
    min_abs / max_abs
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix` of the same size.
fn fill_dmatrix(source: &Array2<f64>, target: &mut DMatrix<f64>) {
    let n = source.ncols();
    for j in 0..n {
        for i in 0..source.nrows() {
            target[(i, j)] = source[[i, j]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correct copying of Hessians from `ndarray` into `DMatrix`.
    // - Inversion of a well-conditioned information matrix.
    // - Rejection of singular and ill-conditioned matrices.
    //
    // They intentionally DO NOT cover:
    // - Finite-difference Hessians (see `finite_diff`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `fill_dmatrix` copies entries without altering them.
    //
    // Given
    // -----
    // - A 2×2 symmetric `Array2<f64>` with distinct entries.
    //
    // Expect
    // ------
    // - The `DMatrix` has identical entries at all positions.
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        // Arrange
        let source: Array2<f64> = array![[2.0, 0.5], [0.5, 1.0]];
        let mut target = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(&source, &mut target);

        // Assert
        assert_eq!(target[(0, 0)], 2.0);
        assert_eq!(target[(0, 1)], 0.5);
        assert_eq!(target[(1, 0)], 0.5);
        assert_eq!(target[(1, 1)], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check that the covariance is the inverse of `n · H_obj`.
    //
    // Given
    // -----
    // - `H_obj = [[2, 1], [1, 2]]` and `n = 10`, so `I = [[20, 10], [10, 20]]`.
    //
    // Expect
    // ------
    // - `I⁻¹ = [[2, −1], [−1, 2]] / 30`.
    fn invert_information_matches_analytic_inverse() {
        // Arrange
        let hess = array![[2.0, 1.0], [1.0, 2.0]];

        // Act
        let cov = invert_information(&hess, 10).expect("well-conditioned");

        // Assert
        let expected = array![[2.0, -1.0], [-1.0, 2.0]] / 30.0;
        for (a, b) in cov.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-14, "{a} vs {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure an exactly singular Hessian is rejected.
    //
    // Given
    // -----
    // - `H_obj = [[1, 1], [1, 1]]` (eigenvalues 2 and 0).
    //
    // Expect
    // ------
    // - `SingularHessian` with `rcond` below the threshold.
    fn invert_information_rejects_singular_matrix() {
        // Arrange
        let hess = array![[1.0, 1.0], [1.0, 1.0]];

        // Act
        let err = invert_information(&hess, 100).unwrap_err();

        // Assert
        match err {
            InferenceError::SingularHessian { rcond } => assert!(rcond < SINGULAR_RCOND),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a nearly singular (ill-conditioned) Hessian is rejected even
    // though it is technically invertible.
    //
    // Given
    // -----
    // - `H_obj = diag(1, 1e-9)`.
    //
    // Expect
    // ------
    // - `SingularHessian { rcond ≈ 1e-9 }`.
    fn invert_information_rejects_ill_conditioned_matrix() {
        // Arrange
        let hess = array![[1.0, 0.0], [0.0, 1e-9]];

        // Act
        let err = invert_information(&hess, 1).unwrap_err();

        // Assert
        match err {
            InferenceError::SingularHessian { rcond } => assert!((rcond - 1e-9).abs() < 1e-15),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that a non-square input is reported as a dimension mismatch.
    //
    // Given
    // -----
    // - A 2×3 matrix.
    //
    // Expect
    // ------
    // - `DimMismatch { expected: (2, 2), found: (2, 3) }`.
    fn invert_information_rejects_non_square_input() {
        // Arrange
        let hess = Array2::<f64>::zeros((2, 3));

        // Act
        let err = invert_information(&hess, 1).unwrap_err();

        // Assert
        assert_eq!(err, InferenceError::DimMismatch { expected: (2, 2), found: (2, 3) });
    }
}
