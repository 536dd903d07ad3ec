//! peelle-linalg: Linear algebra support for peelle-rs
//!
//! Provides the dense matrix type and the Cholesky-based SPD solve
//! and inversion used by the GLS estimation routines. Inversion
//! failure (a singular or non-positive-definite matrix) is reported
//! as a typed error rather than propagated as NaNs.

pub mod cholesky;
pub mod dense;

pub use cholesky::LinalgError;
pub use dense::DenseMatrix;
