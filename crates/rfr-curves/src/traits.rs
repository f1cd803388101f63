//! Core traits for term structure operations.
//!
//! This module defines the [`TermStructure`] trait that all curve
//! implementations satisfy. The trait provides a complete API for
//! retrieving discount factors, zero rates, and forward rates, all
//! keyed by time in years.

use serde::{Deserialize, Serialize};

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};

/// A sampled point on a term structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Discount factor at the maturity.
    pub discount_factor: f64,
    /// Spot (zero) rate at the maturity, in the requested compounding.
    pub spot_rate: f64,
}

/// The core trait for term structures.
///
/// A term structure provides the fundamental operations needed for
/// discounting cash flows and computing forward rates. Implementations
/// only need to supply [`discount_factor`](TermStructure::discount_factor);
/// everything else derives from it.
///
/// # Derived Methods
///
/// The trait provides default implementations for:
/// - [`zero_rate`](TermStructure::zero_rate): Derived from discount factors
/// - [`forward_rate`](TermStructure::forward_rate): Forward rate between two times
/// - [`instantaneous_forward`](TermStructure::instantaneous_forward): Limiting forward rate
/// - [`curve_points`](TermStructure::curve_points): Bulk sampling for reporting
pub trait TermStructure: Send + Sync {
    /// Returns the discount factor from the valuation date to time `t`.
    ///
    /// The discount factor represents the present value of one unit
    /// received at time `t` years from valuation.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is not a positive finite time.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Returns the zero rate at time `t` with the specified compounding.
    ///
    /// The zero rate is the constant rate that, when applied from the
    /// valuation date to time `t`, reproduces the discount factor.
    ///
    /// # Errors
    ///
    /// Propagates any error from
    /// [`discount_factor`](TermStructure::discount_factor).
    fn zero_rate(&self, t: f64, compounding: Compounding) -> CurveResult<f64> {
        let df = self.discount_factor(t)?;
        Ok(compounding.zero_rate(df, t))
    }

    /// Returns the simply-compounded forward rate between times `t1` and `t2`.
    ///
    /// This is the rate that can be locked in today for a deposit starting
    /// at `t1` and maturing at `t2`:
    ///
    /// `F(t1, t2) = (DF(t1) / DF(t2) - 1) / (t2 - t1)`
    ///
    /// Returns `Ok(0.0)` for degenerate intervals (`t2 <= t1`).
    ///
    /// # Errors
    ///
    /// Returns `CalibrationFailed` if the terminal discount factor is not
    /// positive; the forward is undefined there.
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }

        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;

        if df2 <= 0.0 {
            return Err(CurveError::calibration_failed(
                format!("discount factor {df2:.3e} at {t2}y is not positive"),
                0.0,
            ));
        }

        let tau = t2 - t1;
        Ok((df1 / df2 - 1.0) / tau)
    }

    /// Returns the instantaneous forward rate at time `t`.
    ///
    /// This is the limiting forward rate as the forward period shrinks to
    /// zero: `f(t) = -d(ln DF(t))/dt`.
    ///
    /// # Default Implementation
    ///
    /// Uses numerical differentiation with a one-day step. Implementations
    /// with an analytic derivative should override this.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationFailed` if the discount factor is not positive
    /// near `t`; the log-derivative is undefined there.
    fn instantaneous_forward(&self, t: f64) -> CurveResult<f64> {
        let h = 1.0 / 365.0; // One day step

        let df = self.discount_factor(t)?;
        let df_plus = self.discount_factor(t + h)?;

        if df <= 0.0 || df_plus <= 0.0 {
            return Err(CurveError::calibration_failed(
                format!("discount factor near {t}y is not positive"),
                0.0,
            ));
        }

        // f(t) ≈ -[ln(DF(t+h)) - ln(DF(t))] / h
        Ok(-(df_plus.ln() - df.ln()) / h)
    }

    /// Samples the curve at the given maturities.
    ///
    /// Returns one [`CurvePoint`] per requested maturity with the discount
    /// factor and the spot rate in the requested compounding.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while evaluating the curve.
    fn curve_points(
        &self,
        maturities: &[f64],
        compounding: Compounding,
    ) -> CurveResult<Vec<CurvePoint>> {
        let mut points = Vec::with_capacity(maturities.len());
        for &t in maturities {
            let discount_factor = self.discount_factor(t)?;
            let spot_rate = compounding.zero_rate(discount_factor, t);
            points.push(CurvePoint {
                maturity: t,
                discount_factor,
                spot_rate,
            });
        }
        Ok(points)
    }
}
