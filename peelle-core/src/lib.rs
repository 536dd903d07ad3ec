//! peelle-core: Statistical routines around Peelle's Pertinent Puzzle
//!
//! Implements the generalized-least-squares engine, the 2x2 PPP
//! susceptibility check, and the four SAMMY-manual recipes for
//! combining two correlated count measurements that share a
//! normalization factor.

pub mod gls;
pub mod ppp;
pub mod sammy;

pub use gls::{get_gls_estimate, get_gls_unc};
pub use ppp::check_2x2_matrix_for_ppp;
