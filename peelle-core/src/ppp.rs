//! Peelle's Pertinent Puzzle susceptibility check.
//!
//! For a 2x2 covariance matrix with standard deviations sigma1 and
//! sigma2 and correlation rho, the GLS combination of the two
//! measurements falls below both of them whenever
//!   rho > min(sigma1/sigma2, sigma2/sigma1),
//! the published sufficient condition for PPP in a two-measurement
//! fit.

use anyhow::{ensure, Result};
use tracing::debug;

use peelle_linalg::dense::DenseMatrix;

/// Decide whether GLS fitting with this 2x2 covariance matrix will
/// exhibit PPP.
///
/// When `verbose`, prints the computed correlation and ratio and a
/// "PPP" / "no PPP" tag. Downstream scripts parse those lines, so
/// the format is stable; printing never changes the returned value.
pub fn check_2x2_matrix_for_ppp(v: &DenseMatrix, verbose: bool) -> Result<bool> {
    ensure!(
        v.nrows() == 2 && v.ncols() == 2,
        "PPP check is defined for 2x2 covariance matrices, got {}x{}",
        v.nrows(),
        v.ncols()
    );
    let (v11, v22) = (v.get(0, 0), v.get(1, 1));
    ensure!(
        v11 > 0.0 && v22 > 0.0,
        "covariance diagonal entries must be positive variances, got {} and {}",
        v11,
        v22
    );

    let sigma1 = v11.sqrt();
    let sigma2 = v22.sqrt();
    let rho = v.get(0, 1) / (sigma1 * sigma2);
    let ratio = (sigma1 / sigma2).min(sigma2 / sigma1);
    let susceptible = rho > ratio;

    debug!(rho, ratio, susceptible, "PPP check");
    if verbose {
        println!("rho: {}, ratio: {}", rho, ratio);
        println!("{}", if susceptible { "PPP" } else { "no PPP" });
    }

    Ok(susceptible)
}
