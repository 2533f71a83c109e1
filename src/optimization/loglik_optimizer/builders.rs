//! loglik_optimizer::builders — L-BFGS solver construction.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers for the two supported line searches and apply the
//! stopping tolerances from [`MLEOptions`], so callers never touch argmin's
//! generic wiring.
//!
//! Conventions
//! -----------
//! - Builders set the history size and tolerances only. The starting point
//!   and the iteration cap are runtime concerns applied by
//!   [`run_lbfgs`](super::run::run_lbfgs).
//! - History size is `opts.lbfgs_mem`, or [`DEFAULT_LBFGS_MEM`] when unset.
//! - Tolerances argmin rejects surface as [`OptError`](crate::optimization::errors::OptError)
//!   through `From<argmin::core::Error>`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with Hager–Zhang line search, configured from `opts`.
///
/// # Errors
/// Returns an `OptError` if argmin rejects a configured tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), history_size(opts));
    configure_lbfgs(lbfgs, opts)
}

/// L-BFGS with More–Thuente line search, configured from `opts`.
///
/// This is the line search used by the default estimation options.
///
/// # Errors
/// Returns an `OptError` if argmin rejects a configured tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), history_size(opts));
    configure_lbfgs(lbfgs, opts)
}

/// configure_lbfgs — apply optional tolerances to an L-BFGS solver.
///
/// Parameters
/// ----------
/// - `solver`: `LBFGS<L, Theta, Grad, Cost>`
///   Pre-constructed solver with any line search `L`.
/// - `opts`: `&MLEOptions`
///   Source of `tol_grad` (gradient norm) and `tol_cost` (change in cost).
///
/// Returns
/// -------
/// `OptResult<LBFGS<L, Theta, Grad, Cost>>`
///   The solver with every present tolerance applied. Absent tolerances keep
///   argmin's defaults.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when argmin rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn history_size(opts: &MLEOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}
