//! student_t_mle — restricted Student-t regression by constrained maximum
//! likelihood, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the estimator to Python via the `_student_t_mle` extension module. When the
//! `python-bindings` feature is enabled, this module defines the
//! Python-facing classes and the `regression` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`regression`, `optimization`,
//!   `inference`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_student_t_mle` Python extension.
//! - Register the `regression` submodule in `sys.modules` so dotted imports
//!   work from Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input conversion, and error mapping.
//! - Python-visible types mirror the invariants of their Rust counterparts
//!   (`StudentTRegression`, `EstimationResult`).
//!
//! Conventions
//! -----------
//! - Parameter vectors are ordered `[ν, σ, β₀, …, β_{k−1}]` on both sides of
//!   the boundary.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use student_t_mle::regression::{default_initial_guess, estimate, simulate::simulate};
//! use ndarray::array;
//!
//! let truth = array![4.0, 0.1, 1.0, 0.8, 0.2];
//! let (y, x) = simulate(&truth, 500, 1234)?;
//! let fit = estimate(y, x, Some(default_initial_guess(3)))?;
//! assert_eq!(fit.raw().len(), 5);
//! # Ok::<(), student_t_mle::regression::RegressionError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_student_t_pipeline.rs`.
//! - The PyO3 items compile only with `python-bindings` and are exercised from
//!   Python.

pub mod inference;
pub mod optimization;
pub mod regression;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    regression::{
        EstimationResult, ParameterCodec, RegressionData, StudentTRegression, SumRestriction,
        default_initial_guess, simulate::simulate, summary,
    },
    utils::{build_estimation_options, extract_f64_matrix, extract_f64_vector},
};

/// PyStudentTRegression — Python-facing wrapper for [`StudentTRegression`].
///
/// Purpose
/// -------
/// Expose configuration, fitting and reporting of the restricted Student-t
/// regression to Python callers.
///
/// Parameters
/// ----------
/// Constructed from Python via `StudentTRegression(...)`:
/// - `restriction`: `Option<(usize, usize, f64)>`
///   `(kept, eliminated, total)`; defaults to `β[1] + β[2] = 1`.
/// - `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`, `lbfgs_mem`,
///   `verbose`
///   Optimizer settings used to build `MLEOptions`.
/// - `rel_step`, `min_scale`
///   Finite-difference step settings for the covariance step.
/// - `round_trip_tol`
///   Tolerance of the starting-value round-trip check.
///
/// Fields
/// ------
/// - `inner`: [`StudentTRegression`]
/// - `results`: `Option<EstimationResult>`
///   Set by the last successful `estimate`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "StudentTRegression", module = "student_t_mle.regression", unsendable)]
pub struct PyStudentTRegression {
    pub inner: StudentTRegression,
    pub results: Option<EstimationResult>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyStudentTRegression {
    #[new]
    #[pyo3(
        signature = (
            restriction = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
            verbose = false,
            rel_step = None,
            min_scale = None,
            round_trip_tol = None,
        ),
        text_signature = "(/, restriction=None, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, lbfgs_mem=None, verbose=False, rel_step=None, \
                          min_scale=None, round_trip_tol=None)"
    )]
    pub fn new(
        restriction: Option<(usize, usize, f64)>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
        verbose: bool, rel_step: Option<f64>, min_scale: Option<f64>,
        round_trip_tol: Option<f64>,
    ) -> PyResult<Self> {
        let restriction = match restriction {
            Some((kept, eliminated, total)) => SumRestriction::new(kept, eliminated, total)?,
            None => SumRestriction::default(),
        };
        let options = build_estimation_options(
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
            verbose,
            rel_step,
            min_scale,
            round_trip_tol,
        )?;
        let inner = StudentTRegression::new(ParameterCodec::new(restriction), options);
        Ok(Self { inner, results: None })
    }

    #[pyo3(
        signature = (y, x, initial_guess = None),
        text_signature = "(self, y, x, /, initial_guess=None)"
    )]
    pub fn estimate<'py>(
        &mut self, py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
        initial_guess: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PyEstimationResult> {
        let y = extract_f64_vector(py, y, "y")?;
        let x = extract_f64_matrix(x)?;
        let data = RegressionData::new(y, x)?;
        let guess: Array1<f64> = match initial_guess {
            Some(raw) => extract_f64_vector(py, raw, "initial_guess")?,
            None => default_initial_guess(data.n_coef()),
        };
        let result = self.inner.estimate(&data, &guess)?;
        self.results = Some(result.clone());
        Ok(PyEstimationResult { inner: result })
    }

    #[pyo3(signature = (truth = None), text_signature = "(self, /, truth=None)")]
    pub fn summary<'py>(
        &self, py: Python<'py>, truth: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<String> {
        let result = self.fitted()?;
        let truth = truth.map(|raw| extract_f64_vector(py, raw, "truth")).transpose()?;
        Ok(summary(result, truth.as_ref(), self.inner.codec.restriction()))
    }

    #[getter]
    pub fn results(&self) -> PyResult<PyEstimationResult> {
        Ok(PyEstimationResult { inner: self.fitted()?.clone() })
    }
}

#[cfg(feature = "python-bindings")]
impl PyStudentTRegression {
    fn fitted(&self) -> PyResult<&EstimationResult> {
        self.results
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("Model has not been estimated yet"))
    }
}

/// PyEstimationResult — read-only view of an [`EstimationResult`].
///
/// Returned by `StudentTRegression.estimate` and the `results` getter; every
/// accessor copies into Python-owned containers.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "EstimationResult", module = "student_t_mle.regression")]
pub struct PyEstimationResult {
    pub inner: EstimationResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyEstimationResult {
    #[getter]
    pub fn params(&self) -> Vec<f64> {
        self.inner.raw().to_vec()
    }

    #[getter]
    pub fn std_errors(&self) -> Vec<f64> {
        self.inner.std_errors.to_vec()
    }

    #[getter]
    pub fn t_values(&self) -> Vec<f64> {
        self.inner.t_values().to_vec()
    }

    #[getter]
    pub fn covariance(&self) -> Vec<Vec<f64>> {
        self.inner.covariance.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.estimate.theta_hat.to_vec()
    }

    #[getter]
    pub fn names(&self) -> Vec<String> {
        self.inner.estimate.names.clone()
    }

    #[getter]
    pub fn log_likelihood(&self) -> f64 {
        self.inner.log_likelihood()
    }

    #[getter]
    pub fn n_obs(&self) -> usize {
        self.inner.estimate.n_obs
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged()
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.estimate.iterations
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.estimate.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[getter]
    pub fn evaluations(&self) -> usize {
        self.inner.estimate.diagnostics.evaluations
    }

    #[getter]
    pub fn sigma_boundary_hits(&self) -> usize {
        self.inner.estimate.diagnostics.sigma_boundary_hits
    }

    #[getter]
    pub fn nu_boundary_hits(&self) -> usize {
        self.inner.estimate.diagnostics.nu_boundary_hits
    }

    #[getter]
    pub fn round_trip_error(&self) -> Option<f64> {
        self.inner.estimate.diagnostics.round_trip_error
    }
}

/// Seeded synthetic `(y, X)`; returns `(y, rows of X)`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "simulate")]
#[pyo3(signature = (truth, n, seed = 1234), text_signature = "(truth, n, /, seed=1234)")]
pub fn simulate_py<'py>(
    py: Python<'py>, truth: &Bound<'py, PyAny>, n: usize, seed: u64,
) -> PyResult<(Vec<f64>, Vec<Vec<f64>>)> {
    let truth = extract_f64_vector(py, truth, "truth")?;
    let (y, x) = simulate(&truth, n, seed)?;
    let rows = x.rows().into_iter().map(|row| row.to_vec()).collect();
    Ok((y.to_vec(), rows))
}

/// _student_t_mle — PyO3 module initializer for the Python extension.
///
/// Creates the `regression` submodule, attaches it to `_student_t_mle`, and
/// registers it in `sys.modules` as `student_t_mle.regression`.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _student_t_mle<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let regression_mod = PyModule::new(_py, "regression")?;
    regression_module(_py, m, &regression_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("student_t_mle.regression", regression_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn regression_module<'py>(
    _py: Python, student_t_mle: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyStudentTRegression>()?;
    m.add_class::<PyEstimationResult>()?;
    m.add_function(wrap_pyfunction!(simulate_py, m)?)?;
    student_t_mle.add_submodule(m)?;
    Ok(())
}
