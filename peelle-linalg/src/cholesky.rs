//! Cholesky factorization and SPD inversion.
//!
//! Every covariance matrix the estimation routines invert is
//! symmetric positive definite by contract, so Cholesky is both the
//! cheapest and the most diagnostic factorization: a non-positive
//! pivot is exactly the singularity the caller must hear about.

use crate::dense::DenseMatrix;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinalgError {
    #[error("matrix is not positive definite (pivot {pivot:.3e} at column {col})")]
    NotPositiveDefinite { col: usize, pivot: f64 },

    #[error("singular matrix encountered")]
    SingularMatrix,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Cholesky factorization A = L * L' of a symmetric positive
/// definite matrix.
pub struct CholeskyDecomp {
    /// Lower triangular factor.
    pub l: DenseMatrix,
}

impl CholeskyDecomp {
    /// Factor a symmetric positive definite matrix.
    ///
    /// Fails with `NotPositiveDefinite` when a pivot is non-positive,
    /// which covers both indefinite and (numerically) singular input,
    /// and with `SingularMatrix` when a pivot is not finite.
    pub fn new(a: &DenseMatrix) -> Result<Self, LinalgError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: a.ncols(),
            });
        }

        let mut l = DenseMatrix::zeros(n, n);
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l.get(j, k) * l.get(j, k);
            }
            let pivot = a.get(j, j) - sum;
            if !pivot.is_finite() {
                return Err(LinalgError::SingularMatrix);
            }
            if pivot <= 0.0 {
                return Err(LinalgError::NotPositiveDefinite { col: j, pivot });
            }
            l.set(j, j, pivot.sqrt());

            for i in (j + 1)..n {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += l.get(i, k) * l.get(j, k);
                }
                l.set(i, j, (a.get(i, j) - sum) / l.get(j, j));
            }
        }

        Ok(CholeskyDecomp { l })
    }

    /// Solve L * L' * x = b for a single right-hand side.
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.l.nrows();
        assert_eq!(b.len(), n);

        // Forward substitution L * y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += self.l.get(i, j) * y[j];
            }
            y[i] = (b[i] - sum) / self.l.get(i, i);
        }

        // Backward substitution L' * x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += self.l.get(j, i) * x[j];
            }
            x[i] = (y[i] - sum) / self.l.get(i, i);
        }

        x
    }

    /// Solve A * X = B column by column, i.e. compute A^{-1} * B.
    pub fn solve_mat(&self, b: &DenseMatrix) -> DenseMatrix {
        assert_eq!(b.nrows(), self.l.nrows());
        let mut out = DenseMatrix::zeros(b.nrows(), b.ncols());
        for j in 0..b.ncols() {
            let col = self.solve(&b.col(j));
            out.set_col(j, &col);
        }
        out
    }

    /// Inverse of the factored matrix, A^{-1} = (L L')^{-1}.
    pub fn inverse(&self) -> DenseMatrix {
        let n = self.l.nrows();
        let mut inv = DenseMatrix::zeros(n, n);
        for j in 0..n {
            let mut e = vec![0.0; n];
            e[j] = 1.0;
            inv.set_col(j, &self.solve(&e));
        }
        inv
    }
}

/// Solve a symmetric positive definite system A * x = b.
pub fn solve_spd(a: &DenseMatrix, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    Ok(CholeskyDecomp::new(a)?.solve(b))
}

/// Invert a symmetric positive definite matrix.
pub fn inverse_spd(a: &DenseMatrix) -> Result<DenseMatrix, LinalgError> {
    Ok(CholeskyDecomp::new(a)?.inverse())
}
