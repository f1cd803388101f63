//! Compounding conventions for interest rate calculations.
//!
//! Regulatory risk-free rates are quoted annually compounded, while the
//! Smith-Wilson kernel works with the continuously compounded equivalent.
//! This module provides both conventions and the conversions between
//! quoted rates and discount factors.
//!
//! # Example
//!
//! ```rust
//! use rfr_curves::Compounding;
//!
//! let rate = 0.03; // 3% rate
//! let t = 10.0;    // 10 years
//!
//! let df_annual = Compounding::Annual.discount_factor(rate, t);
//! let df_continuous = Compounding::Continuous.discount_factor(rate, t);
//!
//! // Continuous compounding discounts harder for the same quote
//! assert!(df_continuous < df_annual);
//! ```

use serde::{Deserialize, Serialize};

/// Interest compounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Annual compounding (1x per year), the quoting convention for
    /// regulatory risk-free rates
    #[default]
    Annual,
    /// Continuous compounding (e^rt)
    Continuous,
}

impl Compounding {
    /// Computes the discount factor for a rate over `t` years.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Annual => (1.0 + rate).powf(-t),
            Compounding::Continuous => (-rate * t).exp(),
        }
    }

    /// Recovers the zero rate implied by a discount factor over `t` years.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        match self {
            Compounding::Annual => df.powf(-1.0 / t) - 1.0,
            Compounding::Continuous => -df.ln() / t,
        }
    }

    /// Converts a rate in this convention to its continuous equivalent.
    #[must_use]
    pub fn to_continuous(&self, rate: f64) -> f64 {
        match self {
            Compounding::Annual => rate.ln_1p(),
            Compounding::Continuous => rate,
        }
    }

    /// Converts a continuously compounded rate into this convention.
    #[must_use]
    pub fn from_continuous(&self, rate: f64) -> f64 {
        match self {
            Compounding::Annual => rate.exp_m1(),
            Compounding::Continuous => rate,
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }
}

impl std::fmt::Display for Compounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Compounding::Annual => "Annual",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{s}")
    }
}
