//! Smith-Wilson calibration.
//!
//! Solves the linear system that makes the curve reprice every observed
//! rate exactly. With observations at maturities `u_1..u_n`, market
//! discount factors `m_i`, and the unconditional discount `mu(t) = e^(-omega*t)`:
//!
//! ```text
//! sum_j W(u_i, u_j) * zeta_j = m_i - mu(u_i)    for every i
//! ```
//!
//! The Gram matrix `W` is symmetric positive definite for distinct positive
//! maturities, so the system has a unique solution obtained by Cholesky
//! factorization.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use rfr_math::linear_algebra::solve_spd;
use rfr_math::wilson::WilsonKernel;

use crate::compounding::Compounding;
use crate::diagnostics::tolerances;
use crate::error::{CurveError, CurveResult};
use crate::observations::ObservationSet;

/// Parameters of the Smith-Wilson method.
///
/// # Example
///
/// ```rust
/// use rfr_curves::calibration::SmithWilsonParams;
///
/// let params = SmithWilsonParams::new(0.1285, 0.0330).unwrap();
/// assert_eq!(params.alpha(), 0.1285);
///
/// // UFR is quoted annually; the kernel uses its continuous equivalent
/// assert!((params.ufr_continuous() - 1.0330_f64.ln()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmithWilsonParams {
    /// Mean-reversion speed (alpha).
    alpha: f64,
    /// Ultimate forward rate, quoted in `compounding`.
    ufr: f64,
    /// Quoting convention for rates and the UFR.
    compounding: Compounding,
}

impl SmithWilsonParams {
    /// Creates Smith-Wilson parameters with annually compounded quotes.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Mean-reversion speed (must be positive and finite)
    /// * `ufr` - Ultimate forward rate as an annual decimal (0.0330 for 3.30%)
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive or `ufr` is not above -100%.
    pub fn new(alpha: f64, ufr: f64) -> CurveResult<Self> {
        Self::with_compounding(alpha, ufr, Compounding::Annual)
    }

    /// Creates Smith-Wilson parameters with an explicit quoting convention.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive or `ufr` is not above -100%.
    pub fn with_compounding(
        alpha: f64,
        ufr: f64,
        compounding: Compounding,
    ) -> CurveResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(CurveError::invalid_parameter(format!(
                "alpha must be positive and finite, got {alpha}"
            )));
        }
        if !ufr.is_finite() || ufr <= -1.0 {
            return Err(CurveError::invalid_parameter(format!(
                "ufr must be finite and above -100%, got {ufr}"
            )));
        }

        Ok(Self {
            alpha,
            ufr,
            compounding,
        })
    }

    /// Returns the mean-reversion speed.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the ultimate forward rate in the quoting convention.
    #[must_use]
    pub fn ufr(&self) -> f64 {
        self.ufr
    }

    /// Returns the quoting convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the continuously compounded ultimate forward intensity.
    ///
    /// This is the `omega` the Wilson kernel and all forward-rate
    /// asymptotics work with.
    #[must_use]
    pub fn ufr_continuous(&self) -> f64 {
        self.compounding.to_continuous(self.ufr)
    }
}

/// The output of a Smith-Wilson calibration.
///
/// Holds everything needed to evaluate the curve: the observations, the
/// parameters, and the fitted kernel weights `zeta`. Deserialization
/// re-checks that the weights line up with the observations, so a stored
/// calibration edited by hand cannot evaluate with silently dropped
/// pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationData")]
pub struct Calibration {
    observations: ObservationSet,
    params: SmithWilsonParams,
    zeta: Vec<f64>,
    rcond: f64,
}

/// Serde mirror of [`Calibration`]; consistency checks run in `TryFrom`.
#[derive(Deserialize)]
struct CalibrationData {
    observations: ObservationSet,
    params: SmithWilsonParams,
    zeta: Vec<f64>,
    rcond: f64,
}

impl TryFrom<CalibrationData> for Calibration {
    type Error = CurveError;

    fn try_from(data: CalibrationData) -> Result<Self, Self::Error> {
        if data.zeta.len() != data.observations.len() {
            return Err(CurveError::invalid_parameter(format!(
                "calibration holds {} weights for {} observations",
                data.zeta.len(),
                data.observations.len()
            )));
        }

        Ok(Self {
            observations: data.observations,
            params: data.params,
            zeta: data.zeta,
            rcond: data.rcond,
        })
    }
}

impl Calibration {
    /// Returns the observations the curve was fitted to.
    #[must_use]
    pub fn observations(&self) -> &ObservationSet {
        &self.observations
    }

    /// Returns the calibration parameters.
    #[must_use]
    pub fn params(&self) -> &SmithWilsonParams {
        &self.params
    }

    /// Returns the fitted kernel weights, one per observation.
    #[must_use]
    pub fn zeta(&self) -> &[f64] {
        &self.zeta
    }

    /// Returns the reciprocal condition number of the calibration system.
    #[must_use]
    pub fn rcond(&self) -> f64 {
        self.rcond
    }

    /// Returns true if the calibration system was poorly conditioned.
    ///
    /// A true value does not invalidate the fit, but the repricing error
    /// of a poorly conditioned system can exceed the usual tolerance.
    #[must_use]
    pub fn condition_warning(&self) -> bool {
        self.rcond < tolerances::CONDITION_WARN
    }
}

/// Calibrates the Smith-Wilson weights to a set of observations.
///
/// Assembles the Gram matrix `W[i][j] = W(u_i, u_j)` over the observed
/// maturities, the market discount vector `m`, and the unconditional
/// discount vector `mu`, then solves `W * zeta = m - mu`.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the Gram matrix
/// cannot be factorized.
///
/// # Example
///
/// ```rust
/// use rfr_curves::calibration::{calibrate, SmithWilsonParams};
/// use rfr_curves::ObservationSet;
///
/// let observations = ObservationSet::from_pairs(&[
///     (1.0, 0.0280),
///     (5.0, 0.0315),
///     (10.0, 0.0340),
/// ]).unwrap();
/// let params = SmithWilsonParams::new(0.1285, 0.0330).unwrap();
///
/// let calibration = calibrate(&observations, params).unwrap();
/// assert_eq!(calibration.zeta().len(), 3);
/// ```
pub fn calibrate(
    observations: &ObservationSet,
    params: SmithWilsonParams,
) -> CurveResult<Calibration> {
    let kernel = WilsonKernel::new(params.alpha(), params.ufr_continuous())?;
    let omega = kernel.omega();

    let n = observations.len();
    let maturities = observations.maturities();

    let m = DVector::from_vec(observations.discount_factors(params.compounding()));
    let mu = DVector::from_iterator(n, maturities.iter().map(|&t| (-omega * t).exp()));

    // Fill the lower triangle and mirror it; the kernel is symmetric
    let mut w = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..=i {
            let value = kernel.value(maturities[i], maturities[j])?;
            w[(i, j)] = value;
            w[(j, i)] = value;
        }
    }

    let rhs = &m - &mu;
    let sol = solve_spd(&w, &rhs)?;

    if sol.rcond < tolerances::CONDITION_WARN {
        warn!(
            "calibration system poorly conditioned (rcond = {:.3e})",
            sol.rcond
        );
    }
    debug!(
        "calibrated {n} observations (alpha = {}, rcond = {:.3e})",
        params.alpha(),
        sol.rcond
    );

    Ok(Calibration {
        observations: observations.clone(),
        params,
        zeta: sol.solution.as_slice().to_vec(),
        rcond: sol.rcond,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eur_observations() -> ObservationSet {
        ObservationSet::from_pairs(&[
            (1.0, 0.0280),
            (2.0, 0.0295),
            (5.0, 0.0315),
            (10.0, 0.0340),
            (20.0, 0.0375),
        ])
        .unwrap()
    }

    fn params() -> SmithWilsonParams {
        SmithWilsonParams::new(0.1285, 0.0330).unwrap()
    }

    #[test]
    fn test_params_validation() {
        assert!(SmithWilsonParams::new(0.1285, 0.0330).is_ok());
        assert!(SmithWilsonParams::new(0.0, 0.0330).is_err());
        assert!(SmithWilsonParams::new(-0.1, 0.0330).is_err());
        assert!(SmithWilsonParams::new(f64::NAN, 0.0330).is_err());
        assert!(SmithWilsonParams::new(0.1285, -1.0).is_err());
        assert!(SmithWilsonParams::new(0.1285, f64::INFINITY).is_err());
    }

    #[test]
    fn test_ufr_continuous_annual() {
        let params = SmithWilsonParams::new(0.1285, 0.0330).unwrap();
        assert_relative_eq!(params.ufr_continuous(), 1.0330_f64.ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_ufr_continuous_passthrough() {
        let params =
            SmithWilsonParams::with_compounding(0.1285, 0.0325, Compounding::Continuous).unwrap();
        assert_relative_eq!(params.ufr_continuous(), 0.0325, epsilon = 1e-15);
    }

    #[test]
    fn test_calibrate_weight_count() {
        let calibration = calibrate(&eur_observations(), params()).unwrap();

        assert_eq!(calibration.zeta().len(), 5);
        assert!(calibration.rcond() > 0.0);
    }

    #[test]
    fn test_calibrate_single_observation() {
        let observations = ObservationSet::from_pairs(&[(10.0, 0.03)]).unwrap();
        let calibration = calibrate(&observations, params()).unwrap();

        assert_eq!(calibration.zeta().len(), 1);
    }

    #[test]
    fn test_flat_market_at_ufr_gives_zero_weights() {
        // When every observed rate equals the UFR, the market discount
        // factors coincide with e^(-omega*t) and the system solves to zero.
        let observations =
            ObservationSet::from_pairs(&[(1.0, 0.0330), (5.0, 0.0330), (10.0, 0.0330)]).unwrap();
        let calibration = calibrate(&observations, params()).unwrap();

        for &z in calibration.zeta() {
            assert!(z.abs() < 1e-10, "zeta = {z}");
        }
    }

    #[test]
    fn test_well_conditioned_market() {
        let calibration = calibrate(&eur_observations(), params()).unwrap();
        assert!(!calibration.condition_warning());
    }

    #[test]
    fn test_calibration_serde_roundtrip() {
        let calibration = calibrate(&eur_observations(), params()).unwrap();
        let json = serde_json::to_string(&calibration).unwrap();
        let back: Calibration = serde_json::from_str(&json).unwrap();

        assert_eq!(calibration, back);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_weights() {
        // A truncated weight vector must not deserialize into a curve
        // that silently drops the last pillar.
        let calibration = calibrate(&eur_observations(), params()).unwrap();
        let mut value = serde_json::to_value(&calibration).unwrap();
        value["zeta"].as_array_mut().unwrap().pop();

        let result: Result<Calibration, _> = serde_json::from_value(value);
        assert!(result.is_err());

        let mut value = serde_json::to_value(&calibration).unwrap();
        value["zeta"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::Value::from(0.0));
        let result: Result<Calibration, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
