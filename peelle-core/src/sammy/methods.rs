//! The four normalization-uncertainty recipes.
//!
//! Inputs are two raw counts r with absolute uncertainties dr, a
//! normalization factor n and its uncertainty dn, under the model
//! r_i = n * x for a single physical value x. The methods differ in
//! how dn enters:
//!
//! - `method1`: n is a second fit parameter with prior n +/- dn,
//!   solved with the Bayesian M+W scheme. Returns [x, n].
//! - `method2`: dn (absolute) is folded into the data covariance,
//!   propagated through the measured counts. Off-diagonal terms built
//!   from data values are the classic source of PPP bias.
//! - `method2a`: as `method2`, but dn is read as the fractional
//!   uncertainty of the normalization.
//! - `method2b`: as `method2`, but the normalization term is
//!   evaluated at the common expected count instead of the individual
//!   measured counts, which removes the PPP mechanism. Agrees with
//!   `method1` on the combined value and its variance.

use anyhow::{ensure, Result};
use tracing::debug;

use peelle_linalg::dense::DenseMatrix;

use crate::gls::{design_ones, get_gls_estimate};
use crate::sammy::update::{m_plus_w, print_parameters};

fn validate_measurements(r: &[f64], dr: &[f64], n: f64) -> Result<()> {
    ensure!(
        r.len() == 2,
        "expected exactly 2 count values, got {}",
        r.len()
    );
    ensure!(
        dr.len() == 2,
        "expected exactly 2 count uncertainties, got {}",
        dr.len()
    );
    ensure!(n != 0.0, "normalization factor must be nonzero");
    Ok(())
}

/// Uncertainty-weighted GLS average of the two raw counts, using only
/// the dr contributions.
fn average_counts(r: &[f64], dr: &[f64]) -> Result<f64> {
    let d = DenseMatrix::column(r);
    let v = DenseMatrix::from_diag(&[dr[0] * dr[0], dr[1] * dr[1]]);
    let (avg, _) = get_gls_estimate(&d, &v, &design_ones(2))?;
    Ok(avg.get(0, 0))
}

/// Method 1: normalization as an explicit fit parameter.
///
/// The prior value x_bar is the dr-weighted average of the counts
/// divided by n; the prior on x is flat (zero information) while n
/// carries 1/dn^2. The sensitivity matrix uses the bilinear
/// decomposition r_i = n * x, so G = [[n, x_bar], [n, x_bar]].
pub fn method1(
    r: &[f64],
    dr: &[f64],
    n: f64,
    dn: f64,
    verbose: bool,
) -> Result<(DenseMatrix, DenseMatrix)> {
    validate_measurements(r, dr, n)?;
    ensure!(dn > 0.0, "normalization uncertainty must be positive");

    let x = average_counts(r, dr)? / n;

    let d = DenseMatrix::column(r);
    let v = DenseMatrix::from_diag(&[dr[0] * dr[0], dr[1] * dr[1]]);
    let t = DenseMatrix::column(&[n * x, n * x]);
    let g = DenseMatrix::from_row_major(2, 2, &[n, x, n, x]);
    let p = DenseMatrix::column(&[x, n]);

    // Flat prior on x, measured prior on n.
    let mut m_inv = DenseMatrix::zeros(2, 2);
    m_inv.set(1, 1, 1.0 / (dn * dn));

    let (p_prime, m_prime) = m_plus_w(&p, &m_inv, &d, &v, &t, &g)?;
    debug!(x = p_prime.get(0, 0), n = p_prime.get(1, 0), "method1 fit");

    if verbose {
        print_parameters(&p_prime, &m_prime);
    }
    Ok((p_prime, m_prime))
}

/// Method 2: normalization uncertainty in the data covariance,
/// absolute dn, evaluated at the measured counts.
///
/// V_ij = delta_ij * dr_i^2 + (r_i/n)(r_j/n) * dn^2, single-parameter
/// fit of x with design [[n], [n]].
pub fn method2(
    r: &[f64],
    dr: &[f64],
    n: f64,
    dn: f64,
    verbose: bool,
) -> Result<(DenseMatrix, DenseMatrix)> {
    validate_measurements(r, dr, n)?;

    let s = dn / n;
    let cross = r[0] * r[1] * s * s;
    let v = DenseMatrix::from_row_major(
        2,
        2,
        &[
            dr[0] * dr[0] + (r[0] * s) * (r[0] * s),
            cross,
            cross,
            dr[1] * dr[1] + (r[1] * s) * (r[1] * s),
        ],
    );
    let y = DenseMatrix::column(r);
    let g = DenseMatrix::column(&[n, n]);

    let (p, m) = get_gls_estimate(&y, &v, &g)?;
    debug!(x = p.get(0, 0), "method2 fit");

    if verbose {
        print_parameters(&p, &m);
    }
    Ok((p, m))
}

/// Method 2a: as method 2 with dn read as the fractional uncertainty
/// of the normalization.
///
/// V_ij = delta_ij * dr_i^2 + r_i * r_j * dn^2.
pub fn method2a(
    r: &[f64],
    dr: &[f64],
    n: f64,
    dn: f64,
    verbose: bool,
) -> Result<(DenseMatrix, DenseMatrix)> {
    validate_measurements(r, dr, n)?;

    let cross = r[0] * r[1] * dn * dn;
    let v = DenseMatrix::from_row_major(
        2,
        2,
        &[
            dr[0] * dr[0] + (r[0] * dn) * (r[0] * dn),
            cross,
            cross,
            dr[1] * dr[1] + (r[1] * dn) * (r[1] * dn),
        ],
    );
    let y = DenseMatrix::column(r);
    let g = DenseMatrix::column(&[n, n]);

    let (p, m) = get_gls_estimate(&y, &v, &g)?;
    debug!(x = p.get(0, 0), "method2a fit");

    if verbose {
        print_parameters(&p, &m);
    }
    Ok((p, m))
}

/// Method 2b: as method 2 with the normalization term evaluated at
/// the common expected count.
///
/// With r_bar the dr-weighted average of the counts,
/// V_ij = delta_ij * dr_i^2 + (r_bar/n)^2 * dn^2 for all i, j. The
/// normalization contribution is the same constant in every entry,
/// so it cannot pull the combined value outside the measured range.
pub fn method2b(
    r: &[f64],
    dr: &[f64],
    n: f64,
    dn: f64,
    verbose: bool,
) -> Result<(DenseMatrix, DenseMatrix)> {
    validate_measurements(r, dr, n)?;

    let r_bar = average_counts(r, dr)?;
    let c = (r_bar / n * dn) * (r_bar / n * dn);
    let v = DenseMatrix::from_row_major(
        2,
        2,
        &[dr[0] * dr[0] + c, c, c, dr[1] * dr[1] + c],
    );
    let y = DenseMatrix::column(r);
    let g = DenseMatrix::column(&[n, n]);

    let (p, m) = get_gls_estimate(&y, &v, &g)?;
    debug!(x = p.get(0, 0), "method2b fit");

    if verbose {
        print_parameters(&p, &m);
    }
    Ok((p, m))
}
