//! Dense matrix operations backed by faer.
//!
//! The estimation routines operate on tiny fixed-size matrices (2x2
//! and 3x3 at most), so this wrapper favors a small, explicit API
//! over throughput: it exposes only the operations the GLS engine
//! and the SAMMY recipes use.

use faer::Mat;

/// A dense f64 matrix wrapping faer's column-major `Mat<f64>`.
///
/// Row-major constructors are provided because the covariance and
/// design matrices in the reference material are written row by row.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    inner: Mat<f64>,
}

impl DenseMatrix {
    /// Matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            inner: Mat::zeros(nrows, ncols),
        }
    }

    /// Identity matrix of size n x n.
    pub fn identity(n: usize) -> Self {
        Self {
            inner: Mat::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 }),
        }
    }

    /// Build from a flat row-major slice.
    pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        Self {
            inner: Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j]),
        }
    }

    /// Column vector (n x 1) from a slice.
    pub fn column(data: &[f64]) -> Self {
        Self {
            inner: Mat::from_fn(data.len(), 1, |i, _| data[i]),
        }
    }

    /// Diagonal matrix from a slice of diagonal entries.
    pub fn from_diag(diag: &[f64]) -> Self {
        let n = diag.len();
        Self {
            inner: Mat::from_fn(n, n, |i, j| if i == j { diag[i] } else { 0.0 }),
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner.read(row, col)
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner.write(row, col, value);
    }

    /// Matrix product self * other.
    pub fn mat_mul(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.ncols(), other.nrows());
        DenseMatrix {
            inner: &self.inner * &other.inner,
        }
    }

    /// Matrix-vector product self * v.
    pub fn mat_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.ncols(), v.len());
        let mut out = vec![0.0; self.nrows()];
        for (j, &vj) in v.iter().enumerate() {
            for (i, oi) in out.iter_mut().enumerate() {
                *oi += self.inner.read(i, j) * vj;
            }
        }
        out
    }

    /// Transposed copy.
    pub fn transpose(&self) -> DenseMatrix {
        DenseMatrix {
            inner: self.inner.transpose().to_owned(),
        }
    }

    /// Element-wise sum self + other.
    pub fn add(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.nrows(), other.nrows());
        assert_eq!(self.ncols(), other.ncols());
        DenseMatrix {
            inner: Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
                self.inner.read(i, j) + other.inner.read(i, j)
            }),
        }
    }

    /// Element-wise difference self - other.
    pub fn sub(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.nrows(), other.nrows());
        assert_eq!(self.ncols(), other.ncols());
        DenseMatrix {
            inner: Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
                self.inner.read(i, j) - other.inner.read(i, j)
            }),
        }
    }

    /// Scalar multiple.
    pub fn scale(&self, s: f64) -> DenseMatrix {
        DenseMatrix {
            inner: Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
                self.inner.read(i, j) * s
            }),
        }
    }

    /// Diagonal entries.
    pub fn diag(&self) -> Vec<f64> {
        let n = self.nrows().min(self.ncols());
        (0..n).map(|i| self.inner.read(i, i)).collect()
    }

    /// Column j as a vector.
    pub fn col(&self, j: usize) -> Vec<f64> {
        (0..self.nrows()).map(|i| self.inner.read(i, j)).collect()
    }

    /// Overwrite column j from a slice.
    pub fn set_col(&mut self, j: usize, data: &[f64]) {
        assert_eq!(data.len(), self.nrows());
        for (i, &v) in data.iter().enumerate() {
            self.inner.write(i, j, v);
        }
    }
}

impl std::fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{:.6}", self.inner.read(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
