//! Currency-specific regulatory conventions.
//!
//! This module provides the EIOPA risk-free rate parameters for the major
//! currencies: the ultimate forward rate, the last liquid point of the swap
//! market, the convergence point and the alpha floor.
//!
//! # Supported Currencies
//!
//! - EUR: Euro (LLP 20y)
//! - USD: US Dollar (LLP 30y)
//! - GBP: British Pound (LLP 50y)
//! - CHF: Swiss Franc (LLP 25y)
//!
//! # Example
//!
//! ```
//! use rfr_curves::conventions::eur;
//!
//! let params = eur::params(0.1285).unwrap();
//! assert_eq!(params.ufr(), eur::UFR);
//!
//! let criterion = eur::alpha_criterion();
//! assert_eq!(criterion.convergence_point, eur::CONVERGENCE_POINT);
//! ```

use crate::alpha::AlphaCriterion;
use crate::calibration::SmithWilsonParams;
use crate::error::CurveResult;

/// EUR (Euro) regulatory conventions.
///
/// The euro swap market is treated as liquid out to 20 years.
pub mod eur {
    use super::*;

    /// Ultimate forward rate, annually compounded.
    pub const UFR: f64 = 0.0330;

    /// Last liquid point of the swap market, in years.
    pub const LAST_LIQUID_POINT: f64 = 20.0;

    /// Convergence point: last liquid point plus 40 years.
    pub const CONVERGENCE_POINT: f64 = 60.0;

    /// Regulatory floor for the mean-reversion speed.
    pub const MIN_ALPHA: f64 = 0.05;

    /// Creates Smith-Wilson parameters with the EUR ultimate forward rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive and finite.
    pub fn params(alpha: f64) -> CurveResult<SmithWilsonParams> {
        SmithWilsonParams::new(alpha, UFR)
    }

    /// The EIOPA alpha search criterion for the EUR market.
    #[must_use]
    pub fn alpha_criterion() -> AlphaCriterion {
        AlphaCriterion::eiopa(LAST_LIQUID_POINT)
    }

    /// Regulatory convention summary for EUR.
    #[must_use]
    pub fn summary() -> ConventionSummary {
        ConventionSummary {
            currency: "EUR",
            ufr: UFR,
            last_liquid_point: LAST_LIQUID_POINT,
            convergence_point: CONVERGENCE_POINT,
            min_alpha: MIN_ALPHA,
        }
    }
}

/// USD (US Dollar) regulatory conventions.
///
/// The dollar swap market is treated as liquid out to 30 years.
pub mod usd {
    use super::*;

    /// Ultimate forward rate, annually compounded.
    pub const UFR: f64 = 0.0330;

    /// Last liquid point of the swap market, in years.
    pub const LAST_LIQUID_POINT: f64 = 30.0;

    /// Convergence point: last liquid point plus 40 years.
    pub const CONVERGENCE_POINT: f64 = 70.0;

    /// Regulatory floor for the mean-reversion speed.
    pub const MIN_ALPHA: f64 = 0.05;

    /// Creates Smith-Wilson parameters with the USD ultimate forward rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive and finite.
    pub fn params(alpha: f64) -> CurveResult<SmithWilsonParams> {
        SmithWilsonParams::new(alpha, UFR)
    }

    /// The EIOPA alpha search criterion for the USD market.
    #[must_use]
    pub fn alpha_criterion() -> AlphaCriterion {
        AlphaCriterion::eiopa(LAST_LIQUID_POINT)
    }

    /// Regulatory convention summary for USD.
    #[must_use]
    pub fn summary() -> ConventionSummary {
        ConventionSummary {
            currency: "USD",
            ufr: UFR,
            last_liquid_point: LAST_LIQUID_POINT,
            convergence_point: CONVERGENCE_POINT,
            min_alpha: MIN_ALPHA,
        }
    }
}

/// GBP (British Pound) regulatory conventions.
///
/// The sterling swap market is treated as liquid out to 50 years, so the
/// extrapolation starts much later than for the euro.
pub mod gbp {
    use super::*;

    /// Ultimate forward rate, annually compounded.
    pub const UFR: f64 = 0.0330;

    /// Last liquid point of the swap market, in years.
    pub const LAST_LIQUID_POINT: f64 = 50.0;

    /// Convergence point: last liquid point plus 40 years.
    pub const CONVERGENCE_POINT: f64 = 90.0;

    /// Regulatory floor for the mean-reversion speed.
    pub const MIN_ALPHA: f64 = 0.05;

    /// Creates Smith-Wilson parameters with the GBP ultimate forward rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive and finite.
    pub fn params(alpha: f64) -> CurveResult<SmithWilsonParams> {
        SmithWilsonParams::new(alpha, UFR)
    }

    /// The EIOPA alpha search criterion for the GBP market.
    #[must_use]
    pub fn alpha_criterion() -> AlphaCriterion {
        AlphaCriterion::eiopa(LAST_LIQUID_POINT)
    }

    /// Regulatory convention summary for GBP.
    #[must_use]
    pub fn summary() -> ConventionSummary {
        ConventionSummary {
            currency: "GBP",
            ufr: UFR,
            last_liquid_point: LAST_LIQUID_POINT,
            convergence_point: CONVERGENCE_POINT,
            min_alpha: MIN_ALPHA,
        }
    }
}

/// CHF (Swiss Franc) regulatory conventions.
pub mod chf {
    use super::*;

    /// Ultimate forward rate, annually compounded.
    pub const UFR: f64 = 0.0330;

    /// Last liquid point of the swap market, in years.
    pub const LAST_LIQUID_POINT: f64 = 25.0;

    /// Convergence point: last liquid point plus 40 years.
    pub const CONVERGENCE_POINT: f64 = 65.0;

    /// Regulatory floor for the mean-reversion speed.
    pub const MIN_ALPHA: f64 = 0.05;

    /// Creates Smith-Wilson parameters with the CHF ultimate forward rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive and finite.
    pub fn params(alpha: f64) -> CurveResult<SmithWilsonParams> {
        SmithWilsonParams::new(alpha, UFR)
    }

    /// The EIOPA alpha search criterion for the CHF market.
    #[must_use]
    pub fn alpha_criterion() -> AlphaCriterion {
        AlphaCriterion::eiopa(LAST_LIQUID_POINT)
    }

    /// Regulatory convention summary for CHF.
    #[must_use]
    pub fn summary() -> ConventionSummary {
        ConventionSummary {
            currency: "CHF",
            ufr: UFR,
            last_liquid_point: LAST_LIQUID_POINT,
            convergence_point: CONVERGENCE_POINT,
            min_alpha: MIN_ALPHA,
        }
    }
}

/// Summary of regulatory conventions for a currency.
#[derive(Debug, Clone, Copy)]
pub struct ConventionSummary {
    /// ISO currency code.
    pub currency: &'static str,
    /// Ultimate forward rate, annually compounded.
    pub ufr: f64,
    /// Last liquid point in years.
    pub last_liquid_point: f64,
    /// Convergence point in years.
    pub convergence_point: f64,
    /// Regulatory floor for alpha.
    pub min_alpha: f64,
}

impl std::fmt::Display for ConventionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} Regulatory Conventions:", self.currency)?;
        writeln!(f, "  UFR: {:.2}%", self.ufr * 100.0)?;
        writeln!(f, "  Last Liquid Point: {}y", self.last_liquid_point)?;
        writeln!(f, "  Convergence Point: {}y", self.convergence_point)?;
        writeln!(f, "  Alpha Floor: {}", self.min_alpha)?;
        Ok(())
    }
}

/// Returns the convention summary for a currency code.
#[must_use]
pub fn get_conventions(currency: &str) -> Option<ConventionSummary> {
    match currency.to_uppercase().as_str() {
        "EUR" => Some(eur::summary()),
        "USD" => Some(usd::summary()),
        "GBP" => Some(gbp::summary()),
        "CHF" => Some(chf::summary()),
        _ => None,
    }
}

/// Lists all supported currencies.
#[must_use]
pub fn supported_currencies() -> &'static [&'static str] {
    &["EUR", "USD", "GBP", "CHF"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eur_conventions() {
        let summary = eur::summary();
        assert_eq!(summary.currency, "EUR");
        assert_relative_eq!(summary.ufr, 0.0330);
        assert_relative_eq!(summary.last_liquid_point, 20.0);
        assert_relative_eq!(summary.convergence_point, 60.0);
    }

    #[test]
    fn test_usd_conventions() {
        let summary = usd::summary();
        assert_eq!(summary.currency, "USD");
        assert_relative_eq!(summary.last_liquid_point, 30.0);
        assert_relative_eq!(summary.convergence_point, 70.0);
    }

    #[test]
    fn test_gbp_conventions() {
        let summary = gbp::summary();
        assert_eq!(summary.currency, "GBP");
        assert_relative_eq!(summary.last_liquid_point, 50.0);
        assert_relative_eq!(summary.convergence_point, 90.0);
    }

    #[test]
    fn test_chf_conventions() {
        let summary = chf::summary();
        assert_eq!(summary.currency, "CHF");
        assert_relative_eq!(summary.last_liquid_point, 25.0);
        assert_relative_eq!(summary.convergence_point, 65.0);
    }

    #[test]
    fn test_params_use_currency_ufr() {
        let params = eur::params(0.1285).unwrap();
        assert_relative_eq!(params.ufr(), eur::UFR);
        assert_relative_eq!(params.alpha(), 0.1285);

        assert!(eur::params(-0.1).is_err());
    }

    #[test]
    fn test_criterion_matches_convergence_point() {
        // The criterion derives its convergence point from the LLP; the
        // published constant must agree.
        for (criterion, point, floor) in [
            (eur::alpha_criterion(), eur::CONVERGENCE_POINT, eur::MIN_ALPHA),
            (usd::alpha_criterion(), usd::CONVERGENCE_POINT, usd::MIN_ALPHA),
            (gbp::alpha_criterion(), gbp::CONVERGENCE_POINT, gbp::MIN_ALPHA),
            (chf::alpha_criterion(), chf::CONVERGENCE_POINT, chf::MIN_ALPHA),
        ] {
            assert_relative_eq!(criterion.convergence_point, point);
            assert_relative_eq!(criterion.alpha_min, floor);
        }
    }

    #[test]
    fn test_get_conventions() {
        assert!(get_conventions("EUR").is_some());
        assert!(get_conventions("eur").is_some()); // Case insensitive
        assert!(get_conventions("JPY").is_none());
    }

    #[test]
    fn test_supported_currencies() {
        let currencies = supported_currencies();
        assert_eq!(currencies.len(), 4);
        assert!(currencies.contains(&"EUR"));
        assert!(currencies.contains(&"GBP"));
    }

    #[test]
    fn test_convention_summary_display() {
        let display = format!("{}", gbp::summary());
        assert!(display.contains("GBP"));
        assert!(display.contains("50y"));
        assert!(display.contains("3.30%"));
    }
}
