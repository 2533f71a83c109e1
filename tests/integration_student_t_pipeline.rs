//! Integration tests for the restricted Student-t regression.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: seeded simulation, data validation,
//!   reparameterized L-BFGS maximization, delta-method standard errors, and
//!   the text report.
//! - Exercise a realistic regime (`n = 500`, heavy tails with `ν = 4`, small
//!   scale `σ = 0.1`) rather than toy inputs only.
//!
//! Coverage
//! --------
//! - `regression::simulate`: seeded `(y, X)` generation.
//! - `regression::models::student_t`: estimation with the default and a
//!   custom restriction, error paths for bad starting values.
//! - `inference::covariance`: finite standard errors on a well-posed fit and
//!   a singular-information failure on an unidentified coefficient.
//! - `regression::report`: summary text for a fitted model.
//!
//! Exclusions
//! ----------
//! - Codec, likelihood, and finite-difference building blocks; these are
//!   covered by unit tests.
//! - Python bindings.
use ndarray::{Array1, Array2, array, s};
use student_t_mle::{
    inference::InferenceError,
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    regression::{
        EstimationOptions, Objective, ParamError, ParameterCodec, RegressionData,
        RegressionError, StudentTLikelihood, StudentTRegression, SumRestriction,
        default_initial_guess, estimate, simulate::simulate, summary,
    },
};

/// Raw parameters used to simulate the reference scenario:
/// `ν = 4`, `σ = 0.1`, `β = (1, 0.8, 0.2)`.
fn truth() -> Array1<f64> {
    array![4.0, 0.1, 1.0, 0.8, 0.2]
}

/// Reference data set: `n = 500`, seed 1234.
fn reference_data() -> (Array1<f64>, Array2<f64>) {
    simulate(&truth(), 500, 1234).expect("reference truth is valid")
}

#[test]
// Purpose
// -------
// Run the reference scenario end to end from the default starting values.
//
// Given
// -----
// - Simulated data with `n = 500`, seed 1234, and `[5, 1, 1, 2, −1]` as the
//   starting point.
//
// Expect
// ------
// - The solver converges.
// - `σ̂` is close to 0.1, `ν̂ > 2`, and the slopes are near the truth.
// - `β̂₁ + β̂₂ = 1` to machine precision.
// - Five finite, non-negative standard errors; `β₁` and `β₂` share one.
fn reference_scenario_recovers_parameters() {
    // Arrange
    let (y, x) = reference_data();

    // Act
    let fit = estimate(y, x, Some(default_initial_guess(3))).expect("estimation should succeed");
    let raw = fit.raw();

    // Assert
    assert!(fit.converged(), "status: {}", fit.status());
    assert_eq!(raw.len(), 5);
    assert_eq!(fit.estimate.n_obs, 500);
    assert!(raw[0].is_finite() && raw[0] > 2.0);
    assert!((raw[1] - 0.1).abs() < 0.05);
    assert!((raw[3] - 0.8).abs() < 0.1);
    assert!((raw[4] - 0.2).abs() < 0.1);
    assert!((raw[3] + raw[4] - 1.0).abs() < 1e-12);

    assert_eq!(fit.std_errors.len(), 5);
    assert!(fit.std_errors.iter().all(|se| se.is_finite() && *se >= 0.0));
    let (se1, se2) = (fit.std_errors[3], fit.std_errors[4]);
    assert!((se1 - se2).abs() <= 1e-6 * se1.max(se2));
    assert_eq!(fit.covariance.dim(), (5, 5));
    assert!(fit.estimate.diagnostics.evaluations > 0);
}

#[test]
// Purpose
// -------
// Check that the reported log-likelihood is the sample total at the optimum.
//
// Given
// -----
// - The reference fit and a fresh objective over the same data.
//
// Expect
// ------
// - `log_likelihood = −n · objective(θ̂)` up to rounding.
fn log_likelihood_is_sample_total_at_optimum() {
    // Arrange
    let (y, x) = reference_data();
    let fit = estimate(y.clone(), x.clone(), None).expect("estimation should succeed");
    let data = RegressionData::new(y, x).expect("simulated data is valid");
    let codec = ParameterCodec::default();
    let likelihood = StudentTLikelihood::new();
    let objective = Objective::new(&data, &codec, &likelihood);

    // Act
    let mean_cost = objective.evaluate(&fit.estimate.theta_hat).expect("finite objective");

    // Assert
    let expected = -500.0 * mean_cost;
    assert!((fit.log_likelihood() - expected).abs() <= 1e-9 * expected.abs().max(1.0));
}

#[test]
// Purpose
// -------
// Ensure a starting vector of the wrong length is rejected before any
// likelihood evaluation.
//
// Given
// -----
// - Reference data (`k = 3`) and a length-4 guess.
//
// Expect
// ------
// - `RegressionError::Param(SizeMismatch { expected: 5, actual: 4 })`.
fn wrong_length_guess_is_rejected() {
    // Arrange
    let (y, x) = reference_data();

    // Act
    let result = estimate(y, x, Some(array![5.0, 1.0, 1.0, 2.0]));

    // Assert
    assert_eq!(
        result.unwrap_err(),
        RegressionError::Param(ParamError::SizeMismatch { expected: 5, actual: 4 })
    );
}

#[test]
// Purpose
// -------
// Ensure a starting vector outside the feasible region is rejected.
//
// Given
// -----
// - Reference data and a guess with `σ = −1`.
//
// Expect
// ------
// - `RegressionError::Param(InvalidScale { .. })`.
fn infeasible_guess_is_rejected() {
    // Arrange
    let (y, x) = reference_data();

    // Act
    let result = estimate(y, x, Some(array![5.0, -1.0, 1.0, 2.0, -1.0]));

    // Assert
    assert!(matches!(result, Err(RegressionError::Param(ParamError::InvalidScale { .. }))));
}

#[test]
// Purpose
// -------
// Verify that an unidentified coefficient makes the covariance step fail
// while the point estimate is still returned.
//
// Given
// -----
// - Reference data with an extra all-zero regressor (`k = 4`).
//
// Expect
// ------
// - `CovarianceFailed` with a `SingularHessian` reason.
// - The carried estimate has six raw parameters, leaves the unidentified
//   coefficient at its starting value, and satisfies the restriction.
fn unidentified_coefficient_reports_singular_covariance() {
    // Arrange
    let (y, x) = reference_data();
    let mut x_ext = Array2::<f64>::zeros((x.nrows(), 4));
    x_ext.slice_mut(s![.., 0..3]).assign(&x);
    let guess = default_initial_guess(4);

    // Act
    let result = estimate(y, x_ext, Some(guess.clone()));

    // Assert
    match result {
        Err(RegressionError::CovarianceFailed { reason, estimate }) => {
            assert!(matches!(reason, InferenceError::SingularHessian { .. }), "got {reason:?}");
            assert_eq!(estimate.raw.len(), 6);
            assert!((estimate.raw[5] - guess[5]).abs() < 1e-12);
            assert!((estimate.raw[3] + estimate.raw[4] - 1.0).abs() < 1e-12);
        }
        other => panic!("expected CovarianceFailed, got {other:?}"),
    }
}

#[test]
// Purpose
// -------
// Exercise a non-default restriction and optimizer settings.
//
// Given
// -----
// - `k = 4` data simulated with `β = (0.5, 0.3, −1, 0.7)`, the restriction
//   `β₁ + β₃ = 1`, and a tighter gradient tolerance.
//
// Expect
// ------
// - Convergence, the custom restriction holds exactly, and `σ̂` is near 0.2.
fn custom_restriction_is_enforced() {
    // Arrange
    let truth = array![5.0, 0.2, 0.5, 0.3, -1.0, 0.7];
    let (y, x) = simulate(&truth, 500, 99).expect("valid truth");
    let data = RegressionData::new(y, x).expect("simulated data is valid");
    let restriction = SumRestriction::new(1, 3, 1.0).expect("distinct indices");
    let tols = Tolerances::new(Some(1e-6), Some(1e-12), Some(500)).expect("valid tolerances");
    let mle_opts =
        MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).expect("valid options");
    let options = EstimationOptions { mle_opts, ..EstimationOptions::default() };
    let model = StudentTRegression::new(ParameterCodec::new(restriction), options);

    // Act
    let fit =
        model.estimate(&data, &array![5.0, 1.0, 0.0, 0.5, 0.0, 0.5]).expect("estimation succeeds");
    let raw = fit.raw();

    // Assert
    assert!(fit.converged(), "status: {}", fit.status());
    assert!((raw[3] + raw[5] - 1.0).abs() < 1e-12);
    assert!((raw[1] - 0.2).abs() < 0.05);
    assert!(fit.std_errors.iter().all(|se| se.is_finite()));
}

#[test]
// Purpose
// -------
// Check the human-readable report for the reference fit.
//
// Given
// -----
// - The reference fit and the simulation truth.
//
// Expect
// ------
// - Status line, log-likelihood over `n = 500`, a labeled table with a
//   `PTrue` column, and the restriction gap line.
fn summary_reports_reference_fit() {
    // Arrange
    let (y, x) = reference_data();
    let fit = estimate(y, x, None).expect("estimation should succeed");

    // Act
    let text = summary(&fit, Some(&truth()), &SumRestriction::default());

    // Assert
    assert!(text.starts_with("Estimation resulted in "));
    assert!(text.contains("over n=500 observations"));
    assert!(text.contains("PTrue PHat s(P)"));
    assert!(text.contains("Sigma 0.1 "));
    assert!(text.contains("Difference between restriction for b1+b2=1: "));
}
