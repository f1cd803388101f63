//! Wilson kernel functions for Smith-Wilson curve construction.
//!
//! The Smith-Wilson method represents the discount curve as the unconditional
//! discount factor `e^(-omega*t)` plus a linear combination of kernel functions
//! centred on the observed maturities. This module provides the kernel and its
//! time derivative; assembling and solving the calibration system lives in
//! higher-level crates.

use crate::error::{MathError, MathResult};

/// The symmetric Wilson kernel `W(t, u)`.
///
/// The kernel is defined as:
/// ```text
/// W(t, u) = e^(-omega*(t + u)) * H(t, u)
/// H(t, u) = alpha * min(t, u) - e^(-alpha * max(t, u)) * sinh(alpha * min(t, u))
/// ```
///
/// Where:
/// - `alpha`: Mean-reversion speed controlling how fast forward rates
///   converge to the ultimate forward rate
/// - `omega`: Continuously compounded ultimate forward intensity,
///   `ln(1 + UFR)` for an annually compounded UFR
///
/// # Properties
///
/// - **Symmetric**: `W(t, u) = W(u, t)`, so the calibration Gram matrix is
///   symmetric positive definite for distinct positive maturities
/// - **Vanishes at the short end**: `W(t, u) -> 0` as `t -> 0`, which pins
///   the discount factor at `t = 0` to exactly 1
/// - **Decays at infinity**: `W(t, u) -> 0` as `t -> infinity`, so forward
///   rates converge to `omega`
///
/// # Example
///
/// ```rust
/// use rfr_math::wilson::WilsonKernel;
///
/// // EIOPA-style parameters: alpha = 0.1285, UFR = 3.30% annual
/// let kernel = WilsonKernel::new(0.1285, 0.0330_f64.ln_1p()).unwrap();
///
/// // Symmetric in its arguments
/// let w = kernel.value(5.0, 10.0).unwrap();
/// assert!((w - kernel.value(10.0, 5.0).unwrap()).abs() < 1e-16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilsonKernel {
    /// Mean-reversion speed (alpha)
    alpha: f64,
    /// Continuously compounded ultimate forward intensity (omega)
    omega: f64,
}

impl WilsonKernel {
    /// Creates a new Wilson kernel.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Mean-reversion speed (must be positive and finite)
    /// * `omega` - Continuously compounded ultimate forward intensity
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not positive or either parameter
    /// is not finite.
    pub fn new(alpha: f64, omega: f64) -> MathResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "alpha must be positive and finite, got {alpha}"
            )));
        }
        if !omega.is_finite() {
            return Err(MathError::invalid_input(format!(
                "omega must be finite, got {omega}"
            )));
        }

        Ok(Self { alpha, omega })
    }

    /// Returns the mean-reversion speed.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the ultimate forward intensity.
    #[must_use]
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Evaluates the kernel `W(t, u)`.
    ///
    /// Uses `sinh` for the symmetric exponential difference, which keeps
    /// `H` exactly symmetric in floating point.
    ///
    /// # Errors
    ///
    /// Returns an error if either maturity is not positive and finite.
    /// Out-of-domain maturities are rejected, never clamped.
    pub fn value(&self, t: f64, u: f64) -> MathResult<f64> {
        check_maturity(t)?;
        check_maturity(u)?;

        Ok((-self.omega * (t + u)).exp() * self.h(t, u))
    }

    /// Evaluates the partial derivative of the kernel with respect to `t`.
    ///
    /// ```text
    /// dW/dt(t, u) = e^(-omega*(t + u)) * (dH/dt(t, u) - omega * H(t, u))
    /// ```
    ///
    /// With `H` differentiated piecewise:
    /// ```text
    /// t < u:  dH/dt = alpha * (1 - e^(-alpha*u) * cosh(alpha*t))
    /// t >= u: dH/dt = alpha * e^(-alpha*t) * sinh(alpha*u)
    /// ```
    ///
    /// Both branches agree at `t = u`, so the derivative is continuous
    /// across the diagonal.
    ///
    /// # Errors
    ///
    /// Returns an error if either maturity is not positive and finite.
    pub fn derivative_t(&self, t: f64, u: f64) -> MathResult<f64> {
        check_maturity(t)?;
        check_maturity(u)?;

        let dh = if t < u {
            self.alpha * (1.0 - (-self.alpha * u).exp() * (self.alpha * t).cosh())
        } else {
            self.alpha * (-self.alpha * t).exp() * (self.alpha * u).sinh()
        };

        Ok((-self.omega * (t + u)).exp() * (dh - self.omega * self.h(t, u)))
    }

    /// Helper function: `H(t, u) = alpha*min - e^(-alpha*max) * sinh(alpha*min)`
    fn h(&self, t: f64, u: f64) -> f64 {
        let lo = t.min(u);
        let hi = t.max(u);

        self.alpha * lo - (-self.alpha * hi).exp() * (self.alpha * lo).sinh()
    }
}

fn check_maturity(t: f64) -> MathResult<()> {
    if !t.is_finite() || t <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "maturity must be positive and finite, got {t}"
        )));
    }

    Ok(())
}
