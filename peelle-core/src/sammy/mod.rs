//! SAMMY-manual recipes for combining two correlated count
//! measurements with a shared normalization factor.
//!
//! Four side-by-side prescriptions that differ only in where the
//! normalization uncertainty enters the fit: as an explicit fit
//! parameter updated through the Bayesian M+W scheme (method 1), or
//! folded into the data covariance ahead of a straight GLS solve
//! (methods 2, 2a, 2b). They are kept as independent code paths so
//! each can be audited against its published algebra.

mod methods;
mod update;

pub use methods::{method1, method2, method2a, method2b};
pub use update::{m_plus_w, print_parameters};
