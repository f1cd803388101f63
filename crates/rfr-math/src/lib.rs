//! # Rfr Math
//!
//! Mathematical kernels and solvers for the Rfr term structure library.
//!
//! This crate provides:
//!
//! - **Wilson Kernel**: The Smith-Wilson kernel function and its time derivative
//! - **Linear Algebra**: Symmetric positive definite solves with conditioning estimates
//! - **Solvers**: Bracketing root-finding for parameter searches
//! - **Parametric**: Nelson-Siegel and Svensson curve models
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Careful handling of edge cases
//! - **Explicit Errors**: Out-of-domain inputs are rejected with typed
//!   errors, never clamped

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod linear_algebra;
pub mod parametric;
pub mod solvers;
pub mod wilson;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{solve_spd, SpdSolution};
    pub use crate::parametric::{NelsonSiegel, Svensson};
    pub use crate::solvers::{bisection, SolverConfig, SolverResult};
    pub use crate::wilson::WilsonKernel;
}

pub use error::{MathError, MathResult};
