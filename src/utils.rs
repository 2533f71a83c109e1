//! Python-side input extraction for the PyO3 bindings.
//!
//! Converts NumPy arrays, pandas objects and plain sequences into `ndarray`
//! containers, and Python keyword arguments into validated estimation
//! options. Compiled only with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::{
        FiniteDiffOptions, LineSearcher, MLEOptions, Tolerances,
        finite_diff::{DEFAULT_MIN_SCALE, DEFAULT_REL_STEP},
    },
    optimization::numerical_stability::ROUND_TRIP_TOL,
    regression::{EstimationOptions, RegressionError},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D array-like into an owned `Array1<f64>`; `name` labels errors.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Copy a 2-D array-like (ndarray, DataFrame, or list of rows) into an
/// owned `Array2<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err("all rows of x must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, verbose: bool,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    // Tolerances::new -> OptResult<Tolerances> -> RegressionError -> PyErr
    let tols = Tolerances::new(tol_grad, tol_cost, max_iter).map_err(RegressionError::from)?;

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(RegressionError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = MLEOptions::new(tols, ls, verbose, lbfgs_mem).map_err(RegressionError::from)?;
    Ok(opts)
}

/// Build [`EstimationOptions`] from Python keyword arguments; `None` keeps
/// the default of each setting.
#[cfg(feature = "python-bindings")]
pub fn build_estimation_options(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, verbose: bool, rel_step: Option<f64>,
    min_scale: Option<f64>, round_trip_tol: Option<f64>,
) -> PyResult<EstimationOptions> {
    let defaults = MLEOptions::default();
    let mle_opts = extract_mle_opts(
        tol_grad.or(defaults.tols.tol_grad),
        tol_cost.or(defaults.tols.tol_cost),
        max_iter.or(defaults.tols.max_iter),
        line_searcher,
        lbfgs_mem,
        verbose,
    )?;
    let fd = FiniteDiffOptions::new(
        rel_step.unwrap_or(DEFAULT_REL_STEP),
        min_scale.unwrap_or(DEFAULT_MIN_SCALE),
    )
    .map_err(RegressionError::from)?;
    Ok(EstimationOptions::new(mle_opts, fd, round_trip_tol.unwrap_or(ROUND_TRIP_TOL))?)
}
