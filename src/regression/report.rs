//! report — parameter tables for a fitted regression.
//!
//! Purpose
//! -------
//! Render estimation output for people: a parameter table with optional true
//! values, point estimates and standard errors, either as aligned plain text
//! or as LaTeX `tabular` rows, plus a short summary with the log-likelihood
//! and the restriction gap `β̂[kept] + β̂[eliminated] − total`.
//!
//! Conventions
//! -----------
//! - Numbers use `%g`-style formatting with a configurable number of
//!   significant digits (three by default); `NaN` cells are left blank.
//! - Row labels are right-aligned to the widest label.
//! - Plain rows are separated by single spaces, LaTeX rows by ` & ` and
//!   terminated by ` \\`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `%g` formatting edge cases, both renderers, and the
//!   summary text.
use ndarray::{Array1, Array2};

use crate::regression::core::{codec::SumRestriction, results::EstimationResult};

/// Output flavor for [`ParameterTable::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    Plain,
    Latex,
}

impl TableStyle {
    fn separator(self) -> &'static str {
        match self {
            TableStyle::Plain => " ",
            TableStyle::Latex => " & ",
        }
    }

    fn line_end(self) -> &'static str {
        match self {
            TableStyle::Plain => " \n",
            TableStyle::Latex => " \\\\\n",
        }
    }
}

/// Labeled numeric table, one row per parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    pub row_names: Vec<String>,
    pub column_names: Vec<String>,
    pub values: Array2<f64>,
    /// Significant digits per cell.
    pub digits: usize,
}

impl ParameterTable {
    /// Table of `PTrue` (when given), `PHat` and `s(P)` for an estimate.
    ///
    /// A `truth` of the wrong length is shown as blank cells.
    pub fn from_result(result: &EstimationResult, truth: Option<&Array1<f64>>) -> Self {
        let raw = result.raw();
        let m = raw.len();
        let mut columns: Vec<(&str, Array1<f64>)> = Vec::with_capacity(3);
        if let Some(t) = truth {
            let shown = if t.len() == m { t.clone() } else { Array1::from_elem(m, f64::NAN) };
            columns.push(("PTrue", shown));
        }
        columns.push(("PHat", raw.clone()));
        columns.push(("s(P)", result.std_errors.clone()));

        let mut values = Array2::<f64>::zeros((m, columns.len()));
        for (j, (_, column)) in columns.iter().enumerate() {
            values.column_mut(j).assign(column);
        }
        Self {
            row_names: result.estimate.names.clone(),
            column_names: columns.iter().map(|(name, _)| name.to_string()).collect(),
            values,
            digits: 3,
        }
    }

    /// Render the table as text.
    pub fn render(&self, style: TableStyle) -> String {
        let sep = style.separator();
        let end = style.line_end();
        let width = self.row_names.iter().map(|name| name.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(&" ".repeat(width));
        out.push_str(sep);
        out.push_str(&self.column_names.join(sep));
        out.push_str(end);

        for (name, row) in self.row_names.iter().zip(self.values.rows()) {
            let cells: Vec<String> = row
                .iter()
                .map(|v| if v.is_nan() { " ".to_string() } else { format_g(*v, self.digits) })
                .collect();
            out.push_str(&format!("{name:>width$}"));
            out.push_str(sep);
            out.push_str(&cells.join(sep));
            out.push_str(end);
        }
        out
    }
}

/// Human-readable summary of an estimation.
///
/// Includes the solver status, the log-likelihood with the sample size, the
/// plain parameter table, and the restriction gap.
pub fn summary(
    result: &EstimationResult, truth: Option<&Array1<f64>>, restriction: &SumRestriction,
) -> String {
    let table = ParameterTable::from_result(result, truth).render(TableStyle::Plain);
    let gap = restriction.gap(&result.estimate.params.beta).unwrap_or(f64::NAN);
    format!(
        "Estimation resulted in {status}\n\
         Using ML with LL= {ll} over n={n} observations\n\
         Parameter estimates:\n\
         {table}\
         Difference between restriction for b{a}+b{b}={total}: {gap}\n",
        status = result.status(),
        ll = format_g(result.log_likelihood(), 6),
        n = result.estimate.n_obs,
        a = restriction.kept(),
        b = restriction.eliminated(),
        total = format_g(restriction.total(), 6),
        gap = format_g(gap, 6),
    )
}

/// `%g`-style formatting with `digits` significant digits.
///
/// Scientific notation is used when the decimal exponent is below −4 or at
/// least `digits`; trailing zeros are removed.
pub fn format_g(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(&mantissa), exponent.abs());
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') { text.trim_end_matches('0').trim_end_matches('.') } else { text }
}
