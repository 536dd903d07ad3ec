//! Generalized least squares.
//!
//! For data Y with covariance V and design matrix X (often written G
//! in the SAMMY manual), the GLS solution is
//!   est = (X' V^{-1} X)^{-1} X' V^{-1} Y
//! with exact parameter covariance (X' V^{-1} X)^{-1}. The estimate
//! is the minimum-variance linear unbiased estimator under the
//! assumed covariance model; the covariance is a model quantity, not
//! an empirical one, and in particular does not depend on Y.

use anyhow::{ensure, Context, Result};
use tracing::debug;

use peelle_linalg::cholesky::{inverse_spd, CholeskyDecomp};
use peelle_linalg::dense::DenseMatrix;

/// The n x 1 design matrix of ones: every observation measures the
/// same single parameter.
pub fn design_ones(n: usize) -> DenseMatrix {
    DenseMatrix::column(&vec![1.0; n])
}

/// Standard uncertainties of a parameter covariance matrix: the
/// square roots of its diagonal.
pub fn standard_uncertainties(m: &DenseMatrix) -> Vec<f64> {
    m.diag().iter().map(|d| d.sqrt()).collect()
}

fn validate_shapes(v: &DenseMatrix, x: &DenseMatrix) -> Result<()> {
    ensure!(
        v.is_square(),
        "covariance matrix must be square, got {}x{}",
        v.nrows(),
        v.ncols()
    );
    ensure!(
        x.nrows() == v.nrows(),
        "design matrix must have the same number of rows as the covariance matrix ({} vs {})",
        x.nrows(),
        v.nrows()
    );
    ensure!(
        x.ncols() >= 1 && x.ncols() <= x.nrows(),
        "design matrix must have between 1 and {} columns, got {}",
        x.nrows(),
        x.ncols()
    );
    Ok(())
}

/// Parameter covariance of the GLS fit, (X' V^{-1} X)^{-1}.
///
/// Not a function of the data points. Fails when V or the
/// normal-equations matrix X' V^{-1} X is not invertible.
pub fn get_gls_unc(v: &DenseMatrix, x: &DenseMatrix) -> Result<DenseMatrix> {
    validate_shapes(v, x)?;

    let chol = CholeskyDecomp::new(v).context("covariance matrix V is not invertible")?;
    let vinv_x = chol.solve_mat(x);
    let normal = x.transpose().mat_mul(&vinv_x);
    let unc = inverse_spd(&normal)
        .context("normal-equations matrix X' V^-1 X is not invertible")?;

    debug!(
        n = v.nrows(),
        p = x.ncols(),
        "computed GLS parameter covariance"
    );
    Ok(unc)
}

/// GLS parameter estimate and its covariance.
///
/// Returns (est, unc) with est = unc * X' * V^{-1} * Y. Propagates
/// any singularity failure from the covariance computation.
pub fn get_gls_estimate(
    y: &DenseMatrix,
    v: &DenseMatrix,
    x: &DenseMatrix,
) -> Result<(DenseMatrix, DenseMatrix)> {
    ensure!(
        y.ncols() == 1,
        "data must be a column vector, got {}x{}",
        y.nrows(),
        y.ncols()
    );
    ensure!(
        y.nrows() == v.nrows(),
        "data vector must have the same number of rows as the covariance matrix ({} vs {})",
        y.nrows(),
        v.nrows()
    );

    let unc = get_gls_unc(v, x)?;

    let chol = CholeskyDecomp::new(v).context("covariance matrix V is not invertible")?;
    let vinv_y = chol.solve_mat(y);
    let est = unc.mat_mul(&x.transpose().mat_mul(&vinv_y));

    Ok((est, unc))
}
