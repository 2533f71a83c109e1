//! codec — reparameterization between raw `(ν, σ, β)` and unconstrained θ.
//!
//! Purpose
//! -------
//! Let the optimizer search an unconstrained space while every point it
//! visits maps to a feasible raw vector: `ν > 2`, `σ > 0`, and the linear
//! restriction `β[kept] + β[eliminated] = total` hold by construction.
//!
//! Key behaviors
//! -------------
//! - [`ParameterCodec::transform`]: raw (length `k + 2`) → θ (length `k + 1`),
//!   `θ = (ln(ν − 2), ln σ, β without β[eliminated])`.
//! - [`ParameterCodec::transform_back`]: θ → raw, `ν = exp(θ₀) + 2`,
//!   `σ = exp(θ₁)`, and `β[eliminated] = total − β[kept]` re-inserted.
//! - [`ParameterCodec::round_trip_error`]: max abs deviation of
//!   `transform_back(transform(v))` from `v`, used as a sanity check on
//!   starting values.
//!
//! Invariants & assumptions
//! ------------------------
//! - The restriction names two distinct coefficient indices and a finite
//!   total; [`SumRestriction::new`] enforces this.
//! - Both directions require `k ≥ max(kept, eliminated) + 1` coefficients.
//! - Index exclusion is generic: no branch depends on the particular `k`.
//! - Every call allocates a fresh output vector.
//!
//! Conventions
//! -----------
//! - The default restriction is `β[1] + β[2] = 1` (0-based indices).
//! - A raw vector that violates the restriction transforms without error;
//!   the information in `β[eliminated]` is dropped and the round trip
//!   reports the violation as a deviation.
//!
//! Testing notes
//! -------------
//! - Round trips in both directions, restriction preservation on arbitrary θ,
//!   dimensional agreement with `names`, precondition errors, and a
//!   non-default restriction.
use ndarray::{Array1, s};

use crate::optimization::{
    loglik_optimizer::Theta,
    numerical_stability::{exp_shifted, log_shifted},
};
use crate::regression::{
    core::validation::{validate_betas, validate_dof, validate_scale, validate_theta},
    errors::{ParamError, ParamResult},
};

/// Lower bound on the degrees of freedom; the variance is finite above it.
pub const DOF_FLOOR: f64 = 2.0;

/// Linear equality `β[kept] + β[eliminated] = total` between two coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumRestriction {
    kept: usize,
    eliminated: usize,
    total: f64,
}

impl SumRestriction {
    /// Build a validated restriction.
    ///
    /// # Errors
    /// [`ParamError::InvalidRestriction`] when `kept == eliminated` or `total`
    /// is not finite.
    pub fn new(kept: usize, eliminated: usize, total: f64) -> ParamResult<Self> {
        if kept == eliminated || !total.is_finite() {
            return Err(ParamError::InvalidRestriction { kept, eliminated, total });
        }
        Ok(Self { kept, eliminated, total })
    }

    /// Index of the coefficient kept in θ.
    pub fn kept(&self) -> usize {
        self.kept
    }

    /// Index of the coefficient dropped from θ and rebuilt from the restriction.
    pub fn eliminated(&self) -> usize {
        self.eliminated
    }

    /// Right-hand side of the restriction.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Smallest coefficient count the restriction can be applied to.
    pub fn required_coefficients(&self) -> usize {
        self.kept.max(self.eliminated) + 1
    }

    /// `β[kept] + β[eliminated] − total`; zero when the restriction holds.
    ///
    /// Returns `None` if `beta` is too short.
    pub fn gap(&self, beta: &Array1<f64>) -> Option<f64> {
        let kept = beta.get(self.kept)?;
        let eliminated = beta.get(self.eliminated)?;
        Some(kept + eliminated - self.total)
    }
}

impl Default for SumRestriction {
    fn default() -> Self {
        Self { kept: 1, eliminated: 2, total: 1.0 }
    }
}

/// `ParameterCodec` — bidirectional raw ↔ θ mapping under a [`SumRestriction`].
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use student_t_mle::regression::ParameterCodec;
/// let codec = ParameterCodec::default();
/// let raw = array![4.0, 0.1, 1.0, 0.8, 0.2];
/// let theta = codec.transform(&raw)?;
/// assert_eq!(theta.len(), 4);
/// let back = codec.transform_back(&theta)?;
/// assert!((back[4] - 0.2).abs() < 1e-12);
/// # Ok::<(), student_t_mle::regression::ParamError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterCodec {
    restriction: SumRestriction,
}

impl ParameterCodec {
    pub fn new(restriction: SumRestriction) -> Self {
        Self { restriction }
    }

    pub fn restriction(&self) -> &SumRestriction {
        &self.restriction
    }

    /// Transformed-space length for `k` coefficients.
    pub fn theta_len(&self, k: usize) -> usize {
        k + 1
    }

    /// transform — raw `[ν, σ, β]` → θ.
    ///
    /// Parameters
    /// ----------
    /// - `vp`: `&Array1<f64>`
    ///   Raw vector of length `k + 2`.
    ///
    /// Returns
    /// -------
    /// `ParamResult<Theta>`
    ///   `(ln(ν − 2), ln σ, β₀, …)` with `β[eliminated]` dropped; length `k + 1`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::SizeMismatch` when `vp` is shorter than `[ν, σ]` plus the
    ///   coefficients the restriction needs.
    /// - `ParamError::TooFewCoefficients` when `k` is below
    ///   [`SumRestriction::required_coefficients`].
    /// - `ParamError::InvalidDof` / `ParamError::InvalidScale` when `ν ≤ 2` or
    ///   `σ ≤ 0` (the logarithms would be undefined).
    /// - `ParamError::InvalidBeta` for a non-finite coefficient.
    pub fn transform(&self, vp: &Array1<f64>) -> ParamResult<Theta> {
        let required = self.restriction.required_coefficients();
        if vp.len() < 2 {
            return Err(ParamError::SizeMismatch { expected: required + 2, actual: vp.len() });
        }
        let k = vp.len() - 2;
        if k < required {
            return Err(ParamError::TooFewCoefficients { k, required });
        }
        validate_dof(vp[0])?;
        validate_scale(vp[1])?;
        let beta = vp.slice(s![2..]);
        validate_betas(beta)?;

        let mut theta = Array1::zeros(self.theta_len(k));
        theta[0] = log_shifted(vp[0], DOF_FLOOR);
        theta[1] = log_shifted(vp[1], 0.0);
        let kept_betas =
            beta.iter().enumerate().filter(|(j, _)| *j != self.restriction.eliminated);
        for (slot, (_, &value)) in theta.iter_mut().skip(2).zip(kept_betas) {
            *slot = value;
        }
        Ok(theta)
    }

    /// transform_back — θ → raw `[ν, σ, β]`.
    ///
    /// Parameters
    /// ----------
    /// - `theta`: `&Theta`
    ///   Transformed vector of length `k + 1`.
    ///
    /// Returns
    /// -------
    /// `ParamResult<Array1<f64>>`
    ///   Raw vector of length `k + 2` satisfying `ν > 2`, `σ > 0` (up to
    ///   overflow of `exp`) and the restriction exactly.
    ///
    /// Errors
    /// ------
    /// - `ParamError::TooFewCoefficients` when θ is too short for the restriction.
    /// - `ParamError::InvalidThetaInput` for a non-finite entry.
    pub fn transform_back(&self, theta: &Theta) -> ParamResult<Array1<f64>> {
        let required = self.restriction.required_coefficients();
        let k = theta.len().saturating_sub(1);
        if k < required {
            return Err(ParamError::TooFewCoefficients { k, required });
        }
        validate_theta(theta, self.theta_len(k))?;

        let mut vp = Array1::zeros(k + 2);
        vp[0] = exp_shifted(theta[0], DOF_FLOOR);
        vp[1] = exp_shifted(theta[1], 0.0);
        let mut free = theta.iter().skip(2);
        for j in 0..k {
            if j != self.restriction.eliminated {
                vp[2 + j] = free.next().copied().unwrap_or_default();
            }
        }
        let kept = vp[2 + self.restriction.kept];
        vp[2 + self.restriction.eliminated] = self.restriction.total - kept;
        Ok(vp)
    }

    /// Max abs deviation of `transform_back(transform(vp))` from `vp`.
    ///
    /// # Errors
    /// Any error of [`transform`](Self::transform) or
    /// [`transform_back`](Self::transform_back).
    pub fn round_trip_error(&self, vp: &Array1<f64>) -> ParamResult<f64> {
        let back = self.transform_back(&self.transform(vp)?)?;
        Ok(back.iter().zip(vp.iter()).fold(0.0_f64, |acc, (b, v)| acc.max((b - v).abs())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::core::params::RawParams;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round trips raw → θ → raw and θ → raw → θ.
    // - Restriction preservation for arbitrary θ and several `k`.
    // - Dimensional agreement between transform, get_pars and names.
    // - Precondition errors (too few coefficients, ν ≤ 2, σ ≤ 0, invalid
    //   restriction) and a non-default restriction.
    // -------------------------------------------------------------------------

    fn max_abs_diff(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
        a.iter().zip(b.iter()).fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs()))
    }

    #[test]
    // Purpose
    // -------
    // Check raw → θ → raw recovers a restriction-satisfying vector.
    //
    // Given
    // -----
    // - `[4, 0.1, 1, 0.8, 0.2]` (k = 3) and `[7, 2.5, -1, 0.3, 0.7, 4, -2]` (k = 5).
    //
    // Expect
    // ------
    // - Recovery within 1e-9 and a round-trip error below 1e-9.
    fn raw_round_trip_recovers_input() {
        // Arrange
        let codec = ParameterCodec::default();
        let cases = [array![4.0, 0.1, 1.0, 0.8, 0.2], array![7.0, 2.5, -1.0, 0.3, 0.7, 4.0, -2.0]];

        for vp in cases {
            // Act
            let back = codec
                .transform_back(&codec.transform(&vp).expect("transform"))
                .expect("transform back");

            // Assert
            assert!(max_abs_diff(&back, &vp) < 1e-9, "{vp:?} -> {back:?}");
            assert!(codec.round_trip_error(&vp).expect("round trip") < 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check θ → raw → θ for arbitrary unconstrained vectors.
    //
    // Given
    // -----
    // - `θ = [-1.3, 2.2, 0.5, -4, 3]` (k = 4).
    //
    // Expect
    // ------
    // - Recovery within 1e-9.
    fn theta_round_trip_recovers_input() {
        // Arrange
        let codec = ParameterCodec::default();
        let theta = array![-1.3, 2.2, 0.5, -4.0, 3.0];

        // Act
        let again = codec
            .transform(&codec.transform_back(&theta).expect("transform back"))
            .expect("transform");

        // Assert
        assert!(max_abs_diff(&again, &theta) < 1e-9, "{again:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure every θ maps to a feasible raw vector with the restriction exact.
    //
    // Given
    // -----
    // - θ vectors for k = 3, 4, 6 with large and small entries.
    //
    // Expect
    // ------
    // - `ν > 2`, `σ > 0`, `|β[1] + β[2] − 1| < 1e-12`.
    fn transform_back_preserves_restriction_and_positivity() {
        // Arrange
        let codec = ParameterCodec::default();
        let thetas = [
            array![0.0, 0.0, 1.0, 2.0],
            array![-20.0, 5.0, 3.0, -7.5, 0.25],
            array![3.0, -10.0, 0.0, 123.0, -1.0, 1e-8, 9.0],
        ];

        for theta in thetas {
            // Act
            let vp = codec.transform_back(&theta).expect("transform back");

            // Assert
            assert!(vp[0] > 2.0);
            assert!(vp[1] > 0.0);
            assert!((vp[3] + vp[4] - 1.0).abs() < 1e-12, "{vp:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the dimensional agreement of transform, get_pars and names.
    //
    // Given
    // -----
    // - A raw vector with k = 4.
    //
    // Expect
    // ------
    // - θ length k + 1; raw, names and `get_pars` agree on k + 2 / k.
    fn dimensions_agree_across_helpers() {
        // Arrange
        let codec = ParameterCodec::default();
        let vp = array![5.0, 1.0, 1.0, 2.0, -1.0, 1.0];
        let k = 4;

        // Act
        let theta = codec.transform(&vp).expect("transform");
        let pars = RawParams::get_pars(&vp, k).expect("get_pars");
        let names = RawParams::names(k);

        // Assert
        assert_eq!(theta.len(), k + 1);
        assert_eq!(pars.beta.len(), k);
        assert_eq!(names.len(), vp.len());
    }

    #[test]
    // Purpose
    // -------
    // Ensure `transform` rejects fewer than three coefficients and infeasible
    // ν or σ.
    //
    // Given
    // -----
    // - k = 2; ν = 2; σ = -1.
    //
    // Expect
    // ------
    // - `TooFewCoefficients { k: 2, required: 3 }`, `InvalidDof`, `InvalidScale`.
    fn transform_rejects_preconditions() {
        // Arrange
        let codec = ParameterCodec::default();

        // Act / Assert
        assert_eq!(
            codec.transform(&array![5.0, 1.0, 1.0, 0.0]),
            Err(ParamError::TooFewCoefficients { k: 2, required: 3 })
        );
        assert_eq!(
            codec.transform(&array![2.0, 1.0, 1.0, 0.5, 0.5]),
            Err(ParamError::InvalidDof { value: 2.0 })
        );
        assert_eq!(
            codec.transform(&array![5.0, -1.0, 1.0, 0.5, 0.5]),
            Err(ParamError::InvalidScale { value: -1.0 })
        );
        assert_eq!(
            codec.transform_back(&array![0.0, 0.0, 1.0]),
            Err(ParamError::TooFewCoefficients { k: 2, required: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check that a starting vector violating the restriction shows up as a
    // round-trip deviation rather than an error.
    //
    // Given
    // -----
    // - `β[1] + β[2] = 1.5`.
    //
    // Expect
    // ------
    // - A round-trip error of 0.5.
    fn round_trip_error_reports_restriction_violation() {
        // Arrange
        let codec = ParameterCodec::default();
        let vp = array![5.0, 1.0, 1.0, 1.0, 0.5];

        // Act
        let err = codec.round_trip_error(&vp).expect("round trip");

        // Assert
        assert!((err - 0.5).abs() < 1e-12, "{err}");
    }

    #[test]
    // Purpose
    // -------
    // Verify a non-default restriction with `kept > eliminated`.
    //
    // Given
    // -----
    // - `β[3] + β[0] = 2` and `θ = [0, 0, 10, 20, 0.5]` (k = 4).
    //
    // Expect
    // ------
    // - Free coefficients fill indices 1, 2, 3 in order and `β[0] = 1.5`.
    fn custom_restriction_reinserts_at_eliminated_index() {
        // Arrange
        let restriction = SumRestriction::new(3, 0, 2.0).expect("valid restriction");
        let codec = ParameterCodec::new(restriction);
        let theta = array![0.0, 0.0, 10.0, 20.0, 0.5];

        // Act
        let vp = codec.transform_back(&theta).expect("transform back");

        // Assert
        assert_eq!(vp.slice(s![2..]).to_owned(), array![1.5, 10.0, 20.0, 0.5]);
        assert_eq!(restriction.gap(&vp.slice(s![2..]).to_owned()), Some(0.0));
        assert!(SumRestriction::new(1, 1, 1.0).is_err());
        assert!(SumRestriction::new(1, 2, f64::NAN).is_err());
    }
}
