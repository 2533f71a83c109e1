//! Evaluation diagnostics for one estimation call.
//!
//! [`EvalDiagnostics`] is owned by the likelihood built for a single
//! `estimate` call and updated through `&self` while the optimizer runs, so
//! it uses interior mutability. [`DiagnosticsSnapshot`] is the plain copy
//! attached to the result.
use std::cell::{Cell, RefCell};

/// Live counters updated during evaluation.
#[derive(Debug, Default)]
pub struct EvalDiagnostics {
    evaluations: Cell<usize>,
    sigma_boundary_hits: Cell<usize>,
    nu_boundary_hits: Cell<usize>,
    objective_log: RefCell<Vec<f64>>,
    round_trip_error: Cell<Option<f64>>,
}

impl EvalDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one evaluation of the log-likelihood contributions.
    pub fn record_evaluation(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
    }

    /// Count one evaluation rejected because `σ ≤ 0` (or NaN).
    pub fn record_sigma_boundary(&self) {
        self.sigma_boundary_hits.set(self.sigma_boundary_hits.get() + 1);
    }

    /// Count one evaluation rejected because `ν ≤ 2` (or NaN).
    pub fn record_nu_boundary(&self) {
        self.nu_boundary_hits.set(self.nu_boundary_hits.get() + 1);
    }

    /// Append an objective value (`−mean log-likelihood`).
    pub fn record_objective(&self, value: f64) {
        self.objective_log.borrow_mut().push(value);
    }

    pub fn set_round_trip_error(&self, deviation: f64) {
        self.round_trip_error.set(Some(deviation));
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }

    pub fn sigma_boundary_hits(&self) -> usize {
        self.sigma_boundary_hits.get()
    }

    pub fn nu_boundary_hits(&self) -> usize {
        self.nu_boundary_hits.get()
    }

    /// Copy the current state into a plain value.
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            evaluations: self.evaluations.get(),
            sigma_boundary_hits: self.sigma_boundary_hits.get(),
            nu_boundary_hits: self.nu_boundary_hits.get(),
            objective_log: self.objective_log.borrow().clone(),
            round_trip_error: self.round_trip_error.get(),
        }
    }
}

/// Plain copy of [`EvalDiagnostics`] at the end of an estimation call.
///
/// - `evaluations`: calls to the likelihood contributions, including those
///   made by finite differences and the covariance step.
/// - `objective_log`: every objective value computed, in call order.
/// - `round_trip_error`: deviation of the starting values after a codec round
///   trip, `None` if the check never ran.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagnosticsSnapshot {
    pub evaluations: usize,
    pub sigma_boundary_hits: usize,
    pub nu_boundary_hits: usize,
    pub objective_log: Vec<f64>,
    pub round_trip_error: Option<f64>,
}

impl DiagnosticsSnapshot {
    /// Smallest objective value seen, if any.
    pub fn best_objective(&self) -> Option<f64> {
        self.objective_log.iter().copied().filter(|v| v.is_finite()).reduce(f64::min)
    }
}
