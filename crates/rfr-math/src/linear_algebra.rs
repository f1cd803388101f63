//! Linear algebra utilities.
//!
//! This module provides the dense symmetric positive definite solve used
//! by Smith-Wilson calibration, built on nalgebra's Cholesky factorization.

use crate::error::{MathError, MathResult};
use log::debug;
use nalgebra::{Cholesky, DMatrix, DVector};

/// Solution of a symmetric positive definite system, with a conditioning
/// estimate of the coefficient matrix.
#[derive(Debug, Clone)]
pub struct SpdSolution {
    /// Solution vector `x` with `A * x = b`.
    pub solution: DVector<f64>,
    /// Reciprocal condition number estimate of `A` in the 1-norm.
    ///
    /// Values near zero indicate a nearly singular system whose solution
    /// digits cannot all be trusted.
    pub rcond: f64,
}

/// Solves `A * x = b` for symmetric positive definite `A` using Cholesky
/// factorization.
///
/// Alongside the solution, estimates the reciprocal condition number
/// `1 / (||A||_1 * ||A^-1||_1)` from the explicit inverse. The systems
/// solved here are small (one row per observed maturity), so forming the
/// inverse costs little.
///
/// # Errors
///
/// Returns an error if the matrix is not square, the system is empty, the
/// right-hand side length does not match, or the factorization fails
/// because the matrix is not positive definite.
pub fn solve_spd(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<SpdSolution> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }

    let cholesky = Cholesky::new(a.clone()).ok_or(MathError::NotPositiveDefinite)?;
    let solution = cholesky.solve(b);

    let inverse = cholesky.inverse();
    let rcond = 1.0 / (norm_one(a) * norm_one(&inverse));

    debug!("solved {n}x{n} SPD system, rcond = {rcond:.3e}");

    Ok(SpdSolution { solution, rcond })
}

/// Induced 1-norm: maximum absolute column sum.
fn norm_one(m: &DMatrix<f64>) -> f64 {
    m.column_iter()
        .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_identity() {
        let a = DMatrix::identity(3, 3);
        let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        let result = solve_spd(&a, &b).unwrap();

        assert_relative_eq!(result.solution[0], 1.0, epsilon = 1e-14);
        assert_relative_eq!(result.solution[1], 2.0, epsilon = 1e-14);
        assert_relative_eq!(result.solution[2], 3.0, epsilon = 1e-14);
        assert_relative_eq!(result.rcond, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_spd_system() {
        // A = [[4, 2], [2, 3]] is SPD; x = [1, 2] gives b = [8, 8]
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
        let b = DVector::from_vec(vec![8.0, 8.0]);

        let result = solve_spd(&a, &b).unwrap();

        assert_relative_eq!(result.solution[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.solution[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_not_positive_definite() {
        // Eigenvalues 3 and -1
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        let result = solve_spd(&a, &b);
        assert!(matches!(result, Err(MathError::NotPositiveDefinite)));
    }

    #[test]
    fn test_solve_non_square() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        assert!(solve_spd(&a, &b).is_err());
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let a = DMatrix::identity(3, 3);
        let b = DVector::from_vec(vec![1.0, 2.0]);

        let result = solve_spd(&a, &b);
        assert!(matches!(result, Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_solve_empty_system() {
        let a = DMatrix::<f64>::zeros(0, 0);
        let b = DVector::<f64>::zeros(0);

        let result = solve_spd(&a, &b);
        assert!(matches!(result, Err(MathError::InsufficientData { .. })));
    }

    #[test]
    fn test_rcond_flags_near_singular() {
        // Nearly dependent columns
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0 + 1e-10]);
        let b = DVector::from_vec(vec![2.0, 2.0]);

        let result = solve_spd(&a, &b).unwrap();
        assert!(result.rcond < 1e-9, "rcond = {}", result.rcond);
    }

    #[test]
    fn test_norm_one() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, -3.0, 2.0, 4.0]);
        // Column sums: |1| + |2| = 3, |-3| + |4| = 7
        assert_relative_eq!(norm_one(&m), 7.0, epsilon = 1e-15);
    }
}
