//! Error types for curve operations.
//!
//! This module provides error handling for curve construction, calibration,
//! and validation.

use rfr_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Invalid input parameter (non-positive maturity, NaN rate, ...).
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of what is wrong with the parameter.
        reason: String,
    },

    /// Not enough observations for calibration.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Actual number of observations provided.
        actual: usize,
    },

    /// Curve calibration failed.
    #[error("Calibration failed (rcond: {rcond:.2e}): {reason}")]
    CalibrationFailed {
        /// Description of the failure.
        reason: String,
        /// Reciprocal condition number estimate when available, 0 otherwise.
        rcond: f64,
    },

    /// Calibration did not pass validation, so the curve cannot be used.
    #[error("Curve not calibrated: {reason}")]
    NotCalibrated {
        /// Description of which validation check failed.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(reason: impl Into<String>, rcond: f64) -> Self {
        Self::CalibrationFailed {
            reason: reason.into(),
            rcond,
        }
    }

    /// Creates a not calibrated error.
    #[must_use]
    pub fn not_calibrated(reason: impl Into<String>) -> Self {
        Self::NotCalibrated {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::NotPositiveDefinite
            | MathError::ConvergenceFailed { .. }
            | MathError::InvalidBracket { .. } => Self::CalibrationFailed {
                reason: err.to_string(),
                rcond: 0.0,
            },
            MathError::InvalidInput { .. } | MathError::DimensionMismatch { .. } => {
                Self::InvalidParameter {
                    reason: err.to_string(),
                }
            }
        }
    }
}
