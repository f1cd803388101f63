//! Nelson-Siegel and Svensson factor models.
//!
//! The regulatory curve in this workspace is kernel-based and reprices its
//! inputs exactly. These factor models complement it on the steering side,
//! where a whole curve shape from a handful of interpretable numbers is
//! worth more than an exact fit of every quote.
//!
//! Both models write the continuously compounded zero rate as a level plus
//! exponentially decaying slope and curvature loadings:
//!
//! ```text
//! L1(x) = (1 - e^(-x)) / x          slope loading
//! L2(x) = L1(x) - e^(-x)            curvature loading
//! ```
//!
//! Svensson adds a second curvature term with its own decay scale so a
//! long-end hump can be shaped independently of the short one.

use crate::error::{MathError, MathResult};

/// Slope loading `(1 - e^(-x)) / x`, with a series expansion near zero.
fn slope_loading(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0 - x / 2.0 + x * x / 6.0
    } else {
        (1.0 - (-x).exp()) / x
    }
}

/// Curvature loading `(1 - e^(-x)) / x - e^(-x)`.
fn curvature_loading(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        x / 2.0 - x * x / 3.0
    } else {
        slope_loading(x) - (-x).exp()
    }
}

fn check_decay(name: &str, value: f64) -> MathResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "decay parameter {name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}

/// Nelson-Siegel zero curve.
///
/// Four factors with direct curve readings: `beta0` is the level the curve
/// settles at and `beta0 + beta1` the rate it starts from. `beta2` bends
/// the belly of the curve and `tau` sets how far out the bend sits.
///
/// ```text
/// z(t) = beta0 + beta1 * L1(t / tau) + beta2 * L2(t / tau)
/// f(t) = beta0 + (beta1 + beta2 * t / tau) * e^(-t / tau)
/// ```
///
/// Rates are continuously compounded.
///
/// # Example
///
/// ```rust
/// use rfr_math::parametric::NelsonSiegel;
///
/// // settles at 3.3%, starts near 1.5%, mild belly
/// let model = NelsonSiegel::new(0.033, -0.018, 0.008, 2.5).unwrap();
/// assert!(model.zero_rate(0.5) < model.zero_rate(30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelsonSiegel {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    tau: f64,
}

impl NelsonSiegel {
    /// Creates a model from its four factors.
    ///
    /// # Errors
    ///
    /// Returns an error if `tau` is not positive and finite.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> MathResult<Self> {
        check_decay("tau", tau)?;
        Ok(Self {
            beta0,
            beta1,
            beta2,
            tau,
        })
    }

    /// Returns the zero rate at `t`, continuously compounded.
    ///
    /// At `t <= 0` this is the short-rate limit `beta0 + beta1`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x = t / self.tau;
        self.beta0 + self.beta1 * slope_loading(x) + self.beta2 * curvature_loading(x)
    }

    /// Returns the instantaneous forward rate at `t`.
    #[must_use]
    pub fn forward_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x = t / self.tau;
        self.beta0 + (self.beta1 + self.beta2 * x) * (-x).exp()
    }

    /// Returns the slope of the zero curve at `t`.
    ///
    /// Uses the continuous-compounding identity `f(t) = z(t) + t * z'(t)`,
    /// which both closed forms above satisfy exactly.
    #[must_use]
    pub fn derivative(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        (self.forward_rate(t) - self.zero_rate(t)) / t
    }

    /// Returns the factors as `(beta0, beta1, beta2, tau)`.
    #[must_use]
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.beta0, self.beta1, self.beta2, self.tau)
    }
}

/// Svensson zero curve.
///
/// Extends [`NelsonSiegel`] with a second curvature term on its own decay
/// scale. With `beta3 = 0` the model collapses to Nelson-Siegel exactly.
///
/// ```text
/// z(t) = beta0 + beta1 * L1(t / tau1) + beta2 * L2(t / tau1)
///              + beta3 * L2(t / tau2)
/// ```
///
/// # Example
///
/// ```rust
/// use rfr_math::parametric::Svensson;
///
/// let model = Svensson::new(0.033, -0.018, 0.008, -0.004, 2.5, 9.0).unwrap();
/// let df = (-model.zero_rate(10.0) * 10.0).exp();
/// assert!(df > 0.0 && df < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svensson {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    beta3: f64,
    tau1: f64,
    tau2: f64,
}

impl Svensson {
    /// Creates a model from its six factors.
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
    ) -> MathResult<Self> {
        check_decay("tau1", tau1)?;
        check_decay("tau2", tau2)?;
        Ok(Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        })
    }

    /// Returns the zero rate at `t`, continuously compounded.
    ///
    /// At `t <= 0` this is the short-rate limit `beta0 + beta1`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x1 = t / self.tau1;
        let x2 = t / self.tau2;
        self.beta0
            + self.beta1 * slope_loading(x1)
            + self.beta2 * curvature_loading(x1)
            + self.beta3 * curvature_loading(x2)
    }

    /// Returns the instantaneous forward rate at `t`.
    #[must_use]
    pub fn forward_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x1 = t / self.tau1;
        let x2 = t / self.tau2;
        self.beta0
            + (self.beta1 + self.beta2 * x1) * (-x1).exp()
            + self.beta3 * x2 * (-x2).exp()
    }

    /// Returns the slope of the zero curve at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        (self.forward_rate(t) - self.zero_rate(t)) / t
    }

    /// Returns the factors as `(beta0, beta1, beta2, beta3, tau1, tau2)`.
    #[must_use]
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        )
    }
}
