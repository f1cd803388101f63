//! # Rfr Curves
//!
//! Smith-Wilson risk-free term structure construction for the Rfr library.
//!
//! This crate provides:
//!
//! - **Term Structure Trait**: Core [`TermStructure`] trait for discount
//!   factors, zero rates and forward rates
//! - **Smith-Wilson Curves**: Exact-fit calibration to market rates with
//!   extrapolation to the ultimate forward rate
//! - **Alpha Search**: The smallest mean-reversion speed meeting the
//!   regulatory convergence criterion
//! - **Diagnostics**: Interpolation and convergence validation with audit
//!   reports
//! - **Conventions**: EIOPA parameters for EUR, USD, GBP and CHF
//! - **Parametric Curves**: Nelson-Siegel and Svensson benchmarks
//! - **Compounding**: Annual and continuous quoting conventions
//!
//! ## Quick Start
//!
//! ```rust
//! use rfr_curves::prelude::*;
//!
//! // Calibrate to euro swap quotes
//! let curve = SmithWilsonCurve::builder()
//!     .add_rate(1.0, 0.0280)
//!     .add_rate(5.0, 0.0315)
//!     .add_rate(10.0, 0.0340)
//!     .add_rate(20.0, 0.0375)
//!     .alpha(0.1285)
//!     .ufr(0.0330)
//!     .build()
//!     .unwrap();
//!
//! // Observed maturities are repriced exactly
//! let spot = curve.spot_rate(10.0).unwrap();
//! assert!((spot - 0.0340).abs() < 1e-8);
//!
//! // Beyond the last liquid point the forward relaxes to the UFR
//! let forward = curve.instantaneous_forward(60.0).unwrap();
//! assert!((forward - 0.0330_f64.ln_1p()).abs() < 5e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alpha;
pub mod calibration;
pub mod compounding;
pub mod conventions;
pub mod curve;
pub mod diagnostics;
pub mod error;
pub mod observations;
pub mod parametric;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alpha::{minimal_alpha, AlphaCriterion, AlphaSearchResult};
    pub use crate::calibration::{calibrate, Calibration, SmithWilsonParams};
    pub use crate::compounding::Compounding;
    pub use crate::conventions;
    pub use crate::curve::{build_curve, SmithWilsonCurve, SmithWilsonCurveBuilder};
    pub use crate::diagnostics::{
        tolerances, validate_calibration, verify_convergence, verify_interpolation,
        CalibrationReport, ConvergenceCheck, FitResult, InterpolationCheck,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::observations::{ObservationSet, RateObservation};
    pub use crate::parametric::{NelsonSiegelCurve, SvenssonCurve};
    pub use crate::traits::{CurvePoint, TermStructure};
}

pub use compounding::Compounding;
pub use curve::{build_curve, SmithWilsonCurve, SmithWilsonCurveBuilder};
pub use error::{CurveError, CurveResult};
pub use observations::{ObservationSet, RateObservation};
pub use traits::TermStructure;
