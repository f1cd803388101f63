//! Parametric term structures.
//!
//! [`NelsonSiegelCurve`] and [`SvenssonCurve`] wrap the factor models from
//! `rfr_math` behind the [`TermStructure`] trait. Unlike the Smith-Wilson
//! curve they do not reproduce market quotes exactly; they serve as smooth
//! benchmarks and as generators for synthetic market scenarios.
//!
//! Model rates are continuously compounded.

use rfr_math::parametric::{NelsonSiegel, Svensson};

use crate::error::{CurveError, CurveResult};
use crate::traits::TermStructure;

/// A Nelson-Siegel curve exposed as a [`TermStructure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelsonSiegelCurve {
    model: NelsonSiegel,
}

impl NelsonSiegelCurve {
    /// Creates a curve from Nelson-Siegel factors.
    ///
    /// # Errors
    ///
    /// Returns an error if the decay parameter `tau` is not positive and
    /// finite.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> CurveResult<Self> {
        Ok(Self {
            model: NelsonSiegel::new(beta0, beta1, beta2, tau)?,
        })
    }

    /// Returns the underlying factor model.
    #[must_use]
    pub fn model(&self) -> &NelsonSiegel {
        &self.model
    }
}

impl TermStructure for NelsonSiegelCurve {
    fn discount_factor(&self, maturity: f64) -> CurveResult<f64> {
        validate_maturity(maturity)?;
        Ok((-self.model.zero_rate(maturity) * maturity).exp())
    }

    fn instantaneous_forward(&self, maturity: f64) -> CurveResult<f64> {
        validate_maturity(maturity)?;
        Ok(self.model.forward_rate(maturity))
    }
}

/// A Svensson curve exposed as a [`TermStructure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvenssonCurve {
    model: Svensson,
}

impl SvenssonCurve {
    /// Creates a curve from Svensson factors.
    ///
    /// # Errors
    ///
    /// Returns an error if either decay parameter is not positive and
    /// finite.
    pub fn new(
        beta0: f64,
        beta1: f64,
        beta2: f64,
        beta3: f64,
        tau1: f64,
        tau2: f64,
    ) -> CurveResult<Self> {
        Ok(Self {
            model: Svensson::new(beta0, beta1, beta2, beta3, tau1, tau2)?,
        })
    }

    /// Returns the underlying factor model.
    #[must_use]
    pub fn model(&self) -> &Svensson {
        &self.model
    }
}

impl TermStructure for SvenssonCurve {
    fn discount_factor(&self, maturity: f64) -> CurveResult<f64> {
        validate_maturity(maturity)?;
        Ok((-self.model.zero_rate(maturity) * maturity).exp())
    }

    fn instantaneous_forward(&self, maturity: f64) -> CurveResult<f64> {
        validate_maturity(maturity)?;
        Ok(self.model.forward_rate(maturity))
    }
}

fn validate_maturity(maturity: f64) -> CurveResult<()> {
    if !maturity.is_finite() || maturity <= 0.0 {
        return Err(CurveError::invalid_parameter(format!(
            "maturity must be positive and finite, got {maturity}"
        )));
    }
    Ok(())
}
