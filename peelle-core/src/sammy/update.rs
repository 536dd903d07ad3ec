//! M+W solution scheme of the SAMMY Bayesian equations.
//!
//! With prior parameters P, prior information M^{-1}, data D with
//! covariance V, theory T and sensitivity matrix G:
//!   W  = G' V^{-1} G
//!   M' = (M^{-1} + W)^{-1}
//!   P' = P + M' G' V^{-1} (D - T)
//! A zero row/column in M^{-1} encodes a flat prior on the
//! corresponding parameter.
//!
//! Reference: SAMMY manual, Section IV.A.1, "Derivation of SAMMY's
//! Solution Schemes, M+W Version".

use anyhow::{ensure, Context, Result};
use tracing::debug;

use peelle_linalg::cholesky::{inverse_spd, CholeskyDecomp};
use peelle_linalg::dense::DenseMatrix;

/// One Bayesian update step, returning the posterior parameters and
/// their covariance (P', M').
pub fn m_plus_w(
    p: &DenseMatrix,
    m_inv: &DenseMatrix,
    d: &DenseMatrix,
    v: &DenseMatrix,
    t: &DenseMatrix,
    g: &DenseMatrix,
) -> Result<(DenseMatrix, DenseMatrix)> {
    let n = v.nrows();
    let np = p.nrows();
    ensure!(v.is_square(), "data covariance must be square, got {}x{}", n, v.ncols());
    ensure!(
        d.ncols() == 1 && d.nrows() == n,
        "data must be an {}x1 column vector, got {}x{}",
        n,
        d.nrows(),
        d.ncols()
    );
    ensure!(
        t.ncols() == 1 && t.nrows() == n,
        "theory must be an {}x1 column vector, got {}x{}",
        n,
        t.nrows(),
        t.ncols()
    );
    ensure!(
        g.nrows() == n && g.ncols() == np,
        "sensitivity matrix must be {}x{}, got {}x{}",
        n,
        np,
        g.nrows(),
        g.ncols()
    );
    ensure!(p.ncols() == 1, "prior parameters must be a column vector");
    ensure!(
        m_inv.nrows() == np && m_inv.ncols() == np,
        "prior information matrix must be {0}x{0}, got {1}x{2}",
        np,
        m_inv.nrows(),
        m_inv.ncols()
    );

    let chol = CholeskyDecomp::new(v).context("data covariance matrix is not invertible")?;

    // Y = G' V^{-1} (D - T), W = G' V^{-1} G
    let residual = d.sub(t);
    let y = g.transpose().mat_mul(&chol.solve_mat(&residual));
    let w = g.transpose().mat_mul(&chol.solve_mat(g));

    let m_prime = inverse_spd(&m_inv.add(&w))
        .context("posterior information matrix M^-1 + W is not invertible")?;
    let p_prime = p.add(&m_prime.mat_mul(&y));

    debug!(n, np, "M+W update complete");
    Ok((p_prime, m_prime))
}

/// Print each parameter as `"<value> +/- <uncertainty>"`, one line
/// per parameter in order, with the uncertainty taken from the
/// covariance diagonal. Values are rounded to four decimals for
/// comparison with the SAMMY manual worked example.
pub fn print_parameters(p: &DenseMatrix, m: &DenseMatrix) {
    for (value, variance) in p.col(0).iter().zip(m.diag()) {
        println!("{:.4} +/- {:.4}", value, variance.sqrt());
    }
}
