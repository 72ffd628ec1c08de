use num_complex::Complex64;

use crate::coefficients::{coated_ab, cylinder_ab, mie_ab};
use crate::truncation::wiscombe_order;

const WAVELENGTH: f64 = 632.8e-9;

fn assert_close_c(a: Complex64, b: Complex64, tol: f64) {
    assert!((a - b).norm() <= tol, "{a} vs {b} (tol {tol})");
}

// 800 nm sphere, n = 1.5, vacuum medium: x = 3.971672128432, N = 12.
fn reference_sphere() -> (f64, usize) {
    let x = std::f64::consts::PI * 800e-9 / WAVELENGTH;
    let nmax = wiscombe_order(x).unwrap();
    (x, nmax)
}

#[test]
fn sphere_first_coefficients_match_reference() {
    let (x, nmax) = reference_sphere();
    assert_eq!(nmax, 12);
    let coeffs = mie_ab(Complex64::new(1.5, 0.0), x, nmax).unwrap();
    assert_eq!(coeffs.order(), nmax);
    assert_close_c(
        coeffs.a[0],
        Complex64::new(0.868_454_411_909_9, 0.337_996_074_450_8),
        1e-10,
    );
    assert_close_c(
        coeffs.b[0],
        Complex64::new(0.942_765_732_322_9, 0.232_289_703_345_9),
        1e-10,
    );
}

#[test]
fn sphere_coefficients_are_finite_for_absorbing_index() {
    let (x, nmax) = reference_sphere();
    let coeffs = mie_ab(Complex64::new(1.4, 0.8), x, nmax).unwrap();
    for (an, bn) in coeffs.a.iter().zip(coeffs.b.iter()) {
        assert!(an.re.is_finite() && an.im.is_finite());
        assert!(bn.re.is_finite() && bn.im.is_finite());
    }
}

#[test]
fn coated_sphere_reduces_to_homogeneous_sphere() {
    let (x, nmax) = reference_sphere();
    let m = Complex64::new(1.5, 0.0);
    let plain = mie_ab(m, x, nmax).unwrap();
    let coated = coated_ab(m, m, x, x, nmax).unwrap();
    for n in 0..nmax {
        assert_close_c(coated.a[n], plain.a[n], 1e-12);
        assert_close_c(coated.b[n], plain.b[n], 1e-12);
    }
}

#[test]
fn coated_sphere_reduction_holds_for_complex_index() {
    let x = 1.7;
    let nmax = wiscombe_order(x).unwrap();
    let m = Complex64::new(1.4, 0.3);
    let plain = mie_ab(m, x, nmax).unwrap();
    let coated = coated_ab(m, m, x, x, nmax).unwrap();
    for n in 0..nmax {
        assert_close_c(coated.a[n], plain.a[n], 1e-10);
        assert_close_c(coated.b[n], plain.b[n], 1e-10);
    }
}

#[test]
fn cylinder_cross_polarized_series_vanish() {
    let (x, nmax) = reference_sphere();
    let coeffs = cylinder_ab(Complex64::new(1.5, 0.0), x, nmax).unwrap();
    assert_eq!(coeffs.order(), nmax);
    for n in 0..nmax {
        assert_eq!(coeffs.a1[n], Complex64::new(0.0, 0.0));
        assert_eq!(coeffs.b2[n], Complex64::new(0.0, 0.0));
        assert!(coeffs.a2[n].norm().is_finite());
        assert!(coeffs.b1[n].norm().is_finite());
    }
}

#[test]
fn coefficient_moduli_are_bounded_by_unity_for_lossless_sphere() {
    let (x, nmax) = reference_sphere();
    let coeffs = mie_ab(Complex64::new(1.33, 0.0), x, nmax).unwrap();
    for (an, bn) in coeffs.a.iter().zip(coeffs.b.iter()) {
        assert!(an.norm() <= 1.0 + 1e-12);
        assert!(bn.norm() <= 1.0 + 1e-12);
    }
}

#[test]
fn truncated_keeps_leading_terms() {
    let (x, nmax) = reference_sphere();
    let coeffs = mie_ab(Complex64::new(1.5, 0.0), x, nmax).unwrap();
    let short = coeffs.truncated(5);
    assert_eq!(short.order(), 5);
    assert_eq!(short.a[..], coeffs.a[..5]);
    assert_eq!(coeffs.truncated(100).order(), nmax);
}
