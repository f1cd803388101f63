//! Calibration diagnostics for Smith-Wilson curves.
//!
//! A Smith-Wilson curve is only correct if it reproduces every input rate
//! and if its forward rate actually reaches the ultimate forward rate. This
//! module provides the checks for both properties plus [`FitResult`], which
//! couples a curve with its validation report.
//!
//! # Key Principle
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  If the curve does not reproduce every input rate within   │
//! │  tolerance, or its forward does not reach the UFR, the     │
//! │  calibration is wrong. No exceptions.                      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use rfr_curves::curve::SmithWilsonCurve;
//!
//! let result = SmithWilsonCurve::builder()
//!     .add_rate(5.0, 0.0315)
//!     .add_rate(10.0, 0.0340)
//!     .add_rate(20.0, 0.0375)
//!     .alpha(0.1285)
//!     .ufr(0.0330)
//!     .build_validated()
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! let curve = result.curve().unwrap();
//! ```

use std::fmt;
use std::time::Duration;

use crate::curve::SmithWilsonCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::TermStructure;

/// Tolerances for calibration diagnostics.
///
/// Interpolation errors are measured in basis points of the spot rate. The
/// convergence gap is the distance between the instantaneous forward rate
/// and the ultimate forward rate, also in basis points.
///
/// | Check                   | Tolerance | Meaning                        |
/// |-------------------------|-----------|--------------------------------|
/// | Interpolation           | 1e-4 bps  | Exact fit to solver accuracy   |
/// | Interpolation (strict)  | 1e-6 bps  | Near machine precision         |
/// | Interpolation (relaxed) | 1e-2 bps  | Smoke testing                  |
/// | Convergence             | 5.0 bps   | Forward near UFR at horizon    |
pub mod tolerances {
    /// Default interpolation tolerance in basis points.
    pub const INTERPOLATION_BPS: f64 = 1e-4;

    /// Strict interpolation tolerance for small, well-conditioned systems.
    pub const INTERPOLATION_STRICT_BPS: f64 = 1e-6;

    /// Relaxed interpolation tolerance for exploratory work.
    pub const INTERPOLATION_RELAXED_BPS: f64 = 1e-2;

    /// Maximum allowed gap between the instantaneous forward rate and the
    /// UFR at the convergence horizon, in basis points.
    pub const CONVERGENCE_BPS: f64 = 5.0;

    /// Horizon at which convergence is measured, in years.
    pub const CONVERGENCE_HORIZON: f64 = 200.0;

    /// Reciprocal condition number below which the Wilson Gram matrix is
    /// flagged as poorly conditioned.
    pub const CONDITION_WARN: f64 = f64::EPSILON * 1e3;
}

/// Result of checking one input rate against the calibrated curve.
#[derive(Debug, Clone)]
pub struct InterpolationCheck {
    /// Maturity of the observation in years.
    pub maturity: f64,

    /// The observed market rate.
    pub market_rate: f64,

    /// The rate the curve produces at the same maturity.
    pub model_rate: f64,

    /// Absolute error in basis points.
    pub error_bps: f64,

    /// Tolerance applied to this check, in basis points.
    pub tolerance_bps: f64,

    /// Whether the check passed.
    pub passed: bool,
}

impl InterpolationCheck {
    /// Creates a check result from a market/model rate pair.
    #[must_use]
    pub fn new(maturity: f64, market_rate: f64, model_rate: f64, tolerance_bps: f64) -> Self {
        let error_bps = (model_rate - market_rate).abs() * 1e4;
        let passed = error_bps <= tolerance_bps;

        Self {
            maturity,
            market_rate,
            model_rate,
            error_bps,
            tolerance_bps,
            passed,
        }
    }
}

impl fmt::Display for InterpolationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {:>6.2}y | market {:.4}% | model {:.4}% | error {:.2e} bps (tol {:.2e})",
            status,
            self.maturity,
            self.market_rate * 100.0,
            self.model_rate * 100.0,
            self.error_bps,
            self.tolerance_bps
        )
    }
}

/// Result of measuring forward-rate convergence at the long end.
///
/// Carries the reconstructed instantaneous forward rate at the horizon so
/// a reviewer sees the actual long-end level, not just the gap.
#[derive(Debug, Clone)]
pub struct ConvergenceCheck {
    /// Horizon at which convergence is measured, in years.
    pub horizon: f64,

    /// Instantaneous forward rate at the horizon, continuously compounded.
    pub forward_rate: f64,

    /// The continuously compounded ultimate forward rate.
    pub target_rate: f64,

    /// Absolute gap between forward and target, in basis points.
    pub gap_bps: f64,

    /// Tolerance applied to this check, in basis points.
    pub tolerance_bps: f64,

    /// Whether the check passed.
    pub passed: bool,
}

impl ConvergenceCheck {
    /// Creates a check result from a forward/target rate pair.
    #[must_use]
    pub fn new(horizon: f64, forward_rate: f64, target_rate: f64, tolerance_bps: f64) -> Self {
        let gap_bps = (forward_rate - target_rate).abs() * 1e4;
        let passed = gap_bps <= tolerance_bps;

        Self {
            horizon,
            forward_rate,
            target_rate,
            gap_bps,
            tolerance_bps,
            passed,
        }
    }
}

impl fmt::Display for ConvergenceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {:>6.0}y | forward {:.4}% | target {:.4}% | gap {:.2e} bps (tol {:.1})",
            status,
            self.horizon,
            self.forward_rate * 100.0,
            self.target_rate * 100.0,
            self.gap_bps,
            self.tolerance_bps
        )
    }
}

/// Complete validation report for a calibrated curve.
///
/// Aggregates the per-observation interpolation checks with the long-end
/// convergence measurement and the conditioning of the calibration. Every
/// production curve should be accompanied by one of these.
#[derive(Debug, Clone)]
pub struct CalibrationReport {
    checks: Vec<InterpolationCheck>,
    convergence: ConvergenceCheck,
    max_error_bps: f64,
    rms_error_bps: f64,
    rcond: f64,
    all_passed: bool,
}

impl CalibrationReport {
    /// Creates a report from individual checks and the convergence result.
    #[must_use]
    pub fn new(
        checks: Vec<InterpolationCheck>,
        convergence: ConvergenceCheck,
        rcond: f64,
    ) -> Self {
        let max_error_bps = checks.iter().map(|c| c.error_bps).fold(0.0_f64, f64::max);

        let rms_error_bps = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error_bps * c.error_bps).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        let all_passed = checks.iter().all(|c| c.passed);

        Self {
            checks,
            convergence,
            max_error_bps,
            rms_error_bps,
            rcond,
            all_passed,
        }
    }

    /// Returns whether every interpolation check passed and the forward
    /// rate converged to the UFR.
    ///
    /// A poor condition number alone does not fail validation; it is
    /// reported through [`condition_warning`](Self::condition_warning).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.all_passed && self.convergence.passed
    }

    /// Returns the individual interpolation checks.
    #[must_use]
    pub fn checks(&self) -> &[InterpolationCheck] {
        &self.checks
    }

    /// Returns the checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&InterpolationCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Returns the number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Returns the number of checks that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count()
    }

    /// Returns the maximum interpolation error in basis points.
    #[must_use]
    pub fn max_error_bps(&self) -> f64 {
        self.max_error_bps
    }

    /// Returns the RMS interpolation error in basis points.
    #[must_use]
    pub fn rms_error_bps(&self) -> f64 {
        self.rms_error_bps
    }

    /// Returns the long-end convergence check.
    #[must_use]
    pub fn convergence(&self) -> &ConvergenceCheck {
        &self.convergence
    }

    /// Returns the gap between the forward rate and the UFR at the
    /// convergence horizon, in basis points.
    #[must_use]
    pub fn convergence_gap_bps(&self) -> f64 {
        self.convergence.gap_bps
    }

    /// Returns the horizon at which convergence was measured, in years.
    #[must_use]
    pub fn convergence_horizon(&self) -> f64 {
        self.convergence.horizon
    }

    /// Returns the reciprocal condition number of the Wilson Gram matrix.
    #[must_use]
    pub fn rcond(&self) -> f64 {
        self.rcond
    }

    /// Returns `true` if the Gram matrix was poorly conditioned.
    #[must_use]
    pub fn condition_warning(&self) -> bool {
        self.rcond < tolerances::CONDITION_WARN
    }
}

impl fmt::Display for CalibrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calibration Report")?;
        writeln!(f, "==================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_valid() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(
            f,
            "Interpolation: {}/{} passed",
            self.passed_count(),
            self.checks.len()
        )?;
        writeln!(f, "Max Error: {:.2e} bps", self.max_error_bps)?;
        writeln!(f, "RMS Error: {:.2e} bps", self.rms_error_bps)?;
        writeln!(
            f,
            "Convergence: {:.2e} bps gap at {:.0}y (tol {:.1})",
            self.convergence.gap_bps, self.convergence.horizon, self.convergence.tolerance_bps
        )?;
        writeln!(f, "Condition: rcond {:.2e}", self.rcond)?;

        if self.condition_warning() {
            writeln!(f, "Warning: Wilson Gram matrix is poorly conditioned")?;
        }

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

/// Checks that the curve reproduces each input rate within the default
/// tolerance.
///
/// # Errors
///
/// Returns an error if the curve cannot be evaluated at an observation
/// maturity.
pub fn verify_interpolation(curve: &SmithWilsonCurve) -> CurveResult<Vec<InterpolationCheck>> {
    verify_interpolation_with_tolerance(curve, tolerances::INTERPOLATION_BPS)
}

/// Checks interpolation with a custom tolerance in basis points.
///
/// # Errors
///
/// Returns an error if the curve cannot be evaluated at an observation
/// maturity.
pub fn verify_interpolation_with_tolerance(
    curve: &SmithWilsonCurve,
    tolerance_bps: f64,
) -> CurveResult<Vec<InterpolationCheck>> {
    let observations = curve.observations();
    let mut checks = Vec::with_capacity(observations.len());

    for obs in observations {
        let model_rate = curve.spot_rate(obs.maturity)?;
        checks.push(InterpolationCheck::new(
            obs.maturity,
            obs.rate,
            model_rate,
            tolerance_bps,
        ));
    }

    Ok(checks)
}

/// Reconstructs the instantaneous forward rate at `horizon` and measures
/// its distance from the UFR.
///
/// Both rates are continuously compounded.
///
/// # Errors
///
/// Returns an error if `horizon` is not positive and finite.
pub fn verify_convergence(
    curve: &SmithWilsonCurve,
    horizon: f64,
) -> CurveResult<ConvergenceCheck> {
    let forward = curve.instantaneous_forward(horizon)?;
    let target = curve.params().ufr_continuous();

    Ok(ConvergenceCheck::new(
        horizon,
        forward,
        target,
        tolerances::CONVERGENCE_BPS,
    ))
}

/// Runs the full diagnostic suite on a calibrated curve.
///
/// # Errors
///
/// Returns an error if the curve cannot be evaluated.
pub fn validate_calibration(curve: &SmithWilsonCurve) -> CurveResult<CalibrationReport> {
    let checks = verify_interpolation(curve)?;
    let convergence = verify_convergence(curve, tolerances::CONVERGENCE_HORIZON)?;

    Ok(CalibrationReport::new(
        checks,
        convergence,
        curve.calibration().rcond(),
    ))
}

/// A calibrated curve together with its validation report.
///
/// The curve is only handed out through [`curve`](Self::curve) or
/// [`into_curve`](Self::into_curve) when the report is valid, so an
/// unvalidated curve cannot slip into pricing by accident. The unchecked
/// accessors exist for inspection of failed fits.
#[derive(Debug, Clone)]
pub struct FitResult {
    curve: SmithWilsonCurve,
    report: CalibrationReport,
    build_duration: Duration,
}

impl FitResult {
    /// Bundles a curve with its report and build timing.
    #[must_use]
    pub fn new(curve: SmithWilsonCurve, report: CalibrationReport, build_duration: Duration) -> Self {
        Self {
            curve,
            report,
            build_duration,
        }
    }

    /// Returns whether the curve passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Returns the validation report.
    #[must_use]
    pub fn report(&self) -> &CalibrationReport {
        &self.report
    }

    /// Returns how long calibration and validation took.
    #[must_use]
    pub fn build_duration(&self) -> Duration {
        self.build_duration
    }

    /// Returns the curve if it passed validation.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NotCalibrated`] if validation failed.
    pub fn curve(&self) -> CurveResult<&SmithWilsonCurve> {
        if self.is_valid() {
            Ok(&self.curve)
        } else {
            Err(self.rejection())
        }
    }

    /// Consumes the result and returns the curve if it passed validation.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NotCalibrated`] if validation failed.
    pub fn into_curve(self) -> CurveResult<SmithWilsonCurve> {
        if self.is_valid() {
            Ok(self.curve)
        } else {
            Err(self.rejection())
        }
    }

    /// Returns the curve without checking validity.
    #[must_use]
    pub fn curve_unchecked(&self) -> &SmithWilsonCurve {
        &self.curve
    }

    /// Consumes the result and returns the curve without checking validity.
    #[must_use]
    pub fn into_curve_unchecked(self) -> SmithWilsonCurve {
        self.curve
    }

    fn rejection(&self) -> CurveError {
        CurveError::not_calibrated(format!(
            "validation failed: max interpolation error {:.2e} bps, convergence gap {:.2e} bps",
            self.report.max_error_bps(),
            self.report.convergence_gap_bps()
        ))
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit Result")?;
        writeln!(f, "Build time: {:?}", self.build_duration)?;
        writeln!(f)?;
        write!(f, "{}", self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::build_curve;
    use approx::assert_relative_eq;

    fn eur_curve() -> SmithWilsonCurve {
        build_curve(
            &[
                (1.0, 0.0280),
                (2.0, 0.0295),
                (5.0, 0.0315),
                (10.0, 0.0340),
                (20.0, 0.0375),
            ],
            0.1285,
            0.0330,
        )
        .unwrap()
    }

    #[test]
    fn test_interpolation_check_passed() {
        let check = InterpolationCheck::new(10.0, 0.0340, 0.0340 + 1e-9, tolerances::INTERPOLATION_BPS);
        assert!(check.passed);
        assert!(check.error_bps < check.tolerance_bps);
    }

    #[test]
    fn test_interpolation_check_failed() {
        let check = InterpolationCheck::new(10.0, 0.0340, 0.0350, tolerances::INTERPOLATION_BPS);
        assert!(!check.passed);
        assert_relative_eq!(check.error_bps, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_verify_interpolation_all_pass() {
        let curve = eur_curve();
        let checks = verify_interpolation(&curve).unwrap();

        assert_eq!(checks.len(), 5);
        assert!(checks.iter().all(|c| c.passed));
    }

    #[test]
    fn test_verify_convergence_small_gap() {
        let curve = eur_curve();
        let check = verify_convergence(&curve, tolerances::CONVERGENCE_HORIZON).unwrap();

        assert!(check.passed);
        assert!(check.gap_bps < 0.5, "gap was {} bps", check.gap_bps);
        assert_relative_eq!(check.target_rate, 0.0330_f64.ln_1p(), epsilon = 1e-15);
        assert_relative_eq!(check.forward_rate, check.target_rate, epsilon = 5e-5);
    }

    #[test]
    fn test_validate_calibration_passes() {
        let curve = eur_curve();
        let report = validate_calibration(&curve).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.passed_count(), 5);
        assert_eq!(report.failed_count(), 0);
        assert!(report.failed_checks().is_empty());
        assert!(report.max_error_bps() < tolerances::INTERPOLATION_BPS);
        assert!(report.rms_error_bps() <= report.max_error_bps());
        assert!(report.rcond() > 0.0);
        assert!(!report.condition_warning());
    }

    /// A convergence check with the given gap in basis points.
    fn convergence_with_gap(gap_bps: f64) -> ConvergenceCheck {
        let target = 0.0330_f64.ln_1p();
        ConvergenceCheck::new(
            200.0,
            target + gap_bps * 1e-4,
            target,
            tolerances::CONVERGENCE_BPS,
        )
    }

    #[test]
    fn test_convergence_check_gate() {
        assert!(convergence_with_gap(0.1).passed);
        assert!(!convergence_with_gap(7.5).passed);
    }

    #[test]
    fn test_report_counts_failures() {
        let checks = vec![
            InterpolationCheck::new(5.0, 0.0315, 0.0315, tolerances::INTERPOLATION_BPS),
            InterpolationCheck::new(10.0, 0.0340, 0.0350, tolerances::INTERPOLATION_BPS),
        ];
        let report = CalibrationReport::new(checks, convergence_with_gap(0.1), 1e-5);

        assert!(!report.is_valid());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_relative_eq!(report.max_error_bps(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_report_convergence_gate() {
        let checks = vec![InterpolationCheck::new(
            5.0,
            0.0315,
            0.0315,
            tolerances::INTERPOLATION_BPS,
        )];
        let report = CalibrationReport::new(checks, convergence_with_gap(7.5), 1e-5);

        assert!(!report.is_valid());
        assert_eq!(report.failed_count(), 0);
        assert_relative_eq!(report.convergence_gap_bps(), 7.5, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_result_valid() {
        let result = SmithWilsonCurve::builder()
            .add_rate(5.0, 0.0315)
            .add_rate(10.0, 0.0340)
            .add_rate(20.0, 0.0375)
            .alpha(0.1285)
            .ufr(0.0330)
            .build_validated()
            .unwrap();

        assert!(result.is_valid());
        assert_eq!(result.report().checks().len(), 3);
        assert!(result.curve().is_ok());

        let curve = result.into_curve().unwrap();
        assert!(curve.discount_factor(10.0).is_ok());
    }

    #[test]
    fn test_fit_result_gates_invalid_curve() {
        let curve = eur_curve();
        let failing = CalibrationReport::new(
            vec![InterpolationCheck::new(
                10.0,
                0.0340,
                0.0350,
                tolerances::INTERPOLATION_BPS,
            )],
            convergence_with_gap(0.1),
            1e-5,
        );
        let result = FitResult::new(curve, failing, Duration::from_micros(100));

        assert!(!result.is_valid());
        assert!(matches!(
            result.curve(),
            Err(CurveError::NotCalibrated { .. })
        ));

        // The unchecked accessor still works for inspection.
        assert!(result.curve_unchecked().discount_factor(10.0).is_ok());
        assert!(matches!(
            result.into_curve(),
            Err(CurveError::NotCalibrated { .. })
        ));
    }

    #[test]
    fn test_report_display() {
        let curve = eur_curve();
        let report = validate_calibration(&curve).unwrap();
        let text = format!("{report}");

        assert!(text.contains("PASSED"));
        assert!(text.contains("5/5 passed"));
        assert!(text.contains("Convergence"));
    }

    #[test]
    fn test_check_display() {
        let check = InterpolationCheck::new(10.0, 0.0340, 0.0340, tolerances::INTERPOLATION_BPS);
        let text = format!("{check}");

        assert!(text.contains('✓'));
        assert!(text.contains("10.00y"));
    }

    #[test]
    fn test_custom_tolerance() {
        let curve = eur_curve();
        let strict = verify_interpolation_with_tolerance(&curve, tolerances::INTERPOLATION_STRICT_BPS)
            .unwrap();

        for check in &strict {
            assert_relative_eq!(check.tolerance_bps, tolerances::INTERPOLATION_STRICT_BPS);
        }
    }
}
