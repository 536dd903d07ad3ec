//! Integration tests against the published reference scenarios.
//!
//! The numbers come from the PPP literature's two-measurement
//! example and the SAMMY manual's normalization worked example, used
//! here to verify numerical agreement end to end.

use peelle_core::gls::{design_ones, get_gls_estimate, get_gls_unc, standard_uncertainties};
use peelle_core::ppp::check_2x2_matrix_for_ppp;
use peelle_core::sammy::{method1, method2, method2a, method2b};
use peelle_linalg::dense::DenseMatrix;

fn correlated_v() -> DenseMatrix {
    DenseMatrix::from_row_major(2, 2, &[0.05, 0.06, 0.06, 0.1125])
}

mod gls_engine {
    use super::*;

    #[test]
    fn test_correlated_combination() {
        let y = DenseMatrix::column(&[1.0, 1.5]);
        let (est, unc) = get_gls_estimate(&y, &correlated_v(), &design_ones(2)).unwrap();

        assert!((est.get(0, 0) - 0.88235294).abs() < 1e-7);
        let su = standard_uncertainties(&unc);
        assert!((su[0] - 0.21828206).abs() < 1e-7);
    }

    #[test]
    fn test_combination_falls_below_both_measurements() {
        // The PPP pathology itself: with this covariance the combined
        // value is smaller than either input.
        let y = DenseMatrix::column(&[1.0, 1.5]);
        let (est, _) = get_gls_estimate(&y, &correlated_v(), &design_ones(2)).unwrap();
        assert!(est.get(0, 0) < 1.0);
        assert!(check_2x2_matrix_for_ppp(&correlated_v(), false).unwrap());
    }

    #[test]
    fn test_uncorrelated_combination_stays_interior() {
        let y = DenseMatrix::column(&[1.0, 1.5]);
        let v = DenseMatrix::from_diag(&[0.05, 0.1125]);
        let (est, unc) = get_gls_estimate(&y, &v, &design_ones(2)).unwrap();
        assert!(est.get(0, 0) > 1.0 && est.get(0, 0) < 1.5);
        assert!((unc.get(0, 0).sqrt() - 0.1860521).abs() < 1e-7);
    }

    #[test]
    fn test_unc_does_not_depend_on_data() {
        let unc_direct = get_gls_unc(&correlated_v(), &design_ones(2)).unwrap();
        for y_vals in [[1.0, 1.5], [-3.0, 7.0], [0.0, 0.0]] {
            let y = DenseMatrix::column(&y_vals);
            let (_, unc) = get_gls_estimate(&y, &correlated_v(), &design_ones(2)).unwrap();
            assert!((unc.get(0, 0) - unc_direct.get(0, 0)).abs() < 1e-12);
        }
    }
}

mod ppp_check {
    use super::*;

    #[test]
    fn test_reference_correlated_matrix() {
        // rho = 0.8, ratio = 2/3
        assert!(check_2x2_matrix_for_ppp(&correlated_v(), false).unwrap());
    }

    #[test]
    fn test_reference_diagonal_matrix() {
        let v = DenseMatrix::from_row_major(2, 2, &[0.05, 0.0, 0.0, 0.1125]);
        assert!(!check_2x2_matrix_for_ppp(&v, false).unwrap());
    }

    #[test]
    fn test_verbose_output_is_side_effect_only() {
        assert_eq!(
            check_2x2_matrix_for_ppp(&correlated_v(), true).unwrap(),
            check_2x2_matrix_for_ppp(&correlated_v(), false).unwrap()
        );
    }
}

mod sammy_methods {
    use super::*;

    const R: [f64; 2] = [10000.0, 12100.0];
    const DR: [f64; 2] = [100.0, 110.0];
    const N: f64 = 100.0;
    const DN: f64 = 0.5;

    #[test]
    fn test_method1_manual_example() {
        let (p, m) = method1(&R, &DR, N, DN, false).unwrap();
        assert!((p.get(0, 0) - 109.50226244).abs() < 1e-6);
        assert!((p.get(1, 0) - 100.0).abs() < 1e-6);
        assert!((m.get(0, 0) - 0.84727995).abs() < 1e-6);
        assert!((m.get(0, 1) + 0.27375566).abs() < 1e-6);
        assert!((m.get(1, 1) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_methods_share_the_verbose_contract() {
        for (quiet, loud) in [
            (
                method2(&R, &DR, N, DN, false).unwrap(),
                method2(&R, &DR, N, DN, true).unwrap(),
            ),
            (
                method2a(&R, &DR, N, DN, false).unwrap(),
                method2a(&R, &DR, N, DN, true).unwrap(),
            ),
            (
                method2b(&R, &DR, N, DN, false).unwrap(),
                method2b(&R, &DR, N, DN, true).unwrap(),
            ),
        ] {
            assert_eq!(quiet.0.get(0, 0), loud.0.get(0, 0));
            assert_eq!(quiet.1.get(0, 0), loud.1.get(0, 0));
        }
    }

    #[test]
    fn test_covariance_recipes_stay_in_measured_range() {
        // All three implicit-covariance variants estimate a single
        // combined value; for this input none of them should leave
        // the measured interval [r0/n, r1/n].
        let lo = R[0] / N;
        let hi = R[1] / N;
        for (p, _) in [
            method2(&R, &DR, N, DN, false).unwrap(),
            method2a(&R, &DR, N, DN / N, false).unwrap(),
            method2b(&R, &DR, N, DN, false).unwrap(),
        ] {
            let x = p.get(0, 0);
            assert!(x >= lo && x <= hi, "combined value {} outside range", x);
        }
    }

    #[test]
    fn test_method1_and_method2b_agree() {
        let (p1, m1) = method1(&R, &DR, N, DN, false).unwrap();
        let (p2b, m2b) = method2b(&R, &DR, N, DN, false).unwrap();
        assert!((p1.get(0, 0) - p2b.get(0, 0)).abs() < 1e-6);
        assert!((m1.get(0, 0) - m2b.get(0, 0)).abs() < 1e-6);
    }

    #[test]
    fn test_constructed_covariances_pass_through_ppp_check() {
        // method2b's constant normalization term keeps the implied
        // correlation at or below the PPP threshold for any inputs
        // with equal dr-weighted pulls; verify on the reference data.
        let r_bar = {
            let d = DenseMatrix::column(&R);
            let v = DenseMatrix::from_diag(&[DR[0] * DR[0], DR[1] * DR[1]]);
            get_gls_estimate(&d, &v, &design_ones(2)).unwrap().0.get(0, 0)
        };
        let c = (r_bar / N * DN) * (r_bar / N * DN);
        let v2b = DenseMatrix::from_row_major(
            2,
            2,
            &[DR[0] * DR[0] + c, c, c, DR[1] * DR[1] + c],
        );
        assert!(!check_2x2_matrix_for_ppp(&v2b, false).unwrap());
    }

    #[test]
    fn test_singular_covariance_propagates() {
        // dr = 0 on both points makes the constructed covariance
        // rank one; the GLS engine must refuse it.
        assert!(method2(&R, &[0.0, 0.0], N, DN, false).is_err());
    }
}
