use num_complex::Complex64;

use crate::special::{
    bessel_j_seq, bessel_y_seq, hankel1_seq, log_derivative, riccati_psi_chi,
    riccati_psi_chi_complex,
};

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} vs {b} (tol {tol})");
}

fn assert_close_c(a: Complex64, b: Complex64, tol: f64) {
    assert!((a - b).norm() <= tol, "{a} vs {b} (tol {tol})");
}

// Power-series J_n(z), usable for moderate |z| in tests.
fn j_series(n: usize, z: Complex64) -> Complex64 {
    let mut sum = Complex64::new(0.0, 0.0);
    let half = z / 2.0;
    for k in 0..60 {
        let mut term = half.powu((2 * k + n) as u32);
        for j in 1..=k {
            term /= j as f64;
        }
        for j in 1..=(k + n) {
            term /= j as f64;
        }
        if k % 2 == 1 {
            term = -term;
        }
        sum += term;
    }
    sum
}

#[test]
fn riccati_low_orders_match_closed_forms() {
    let x = 2.3;
    let (psi, chi) = riccati_psi_chi(x, 2);
    assert_close(psi[0], x.sin(), 1e-14);
    assert_close(psi[1], x.sin() / x - x.cos(), 1e-13);
    assert_close(chi[0], x.cos(), 1e-14);
    assert_close(chi[1], x.cos() / x + x.sin(), 1e-13);
}

#[test]
fn complex_riccati_agrees_with_real_path_on_real_axis() {
    let x = 3.9;
    let (psi_r, chi_r) = riccati_psi_chi(x, 10);
    let (psi_c, chi_c) = riccati_psi_chi_complex(Complex64::new(x, 0.0), 10).unwrap();
    for n in 0..=10 {
        assert_close_c(psi_c[n], Complex64::new(psi_r[n], 0.0), 1e-10);
        assert_close_c(chi_c[n], Complex64::new(chi_r[n], 0.0), 1e-10);
    }
}

#[test]
fn log_derivative_matches_riccati_ratio() {
    let x = 3.9;
    let d = log_derivative(Complex64::new(x, 0.0), 6).unwrap();
    let (psi, _) = riccati_psi_chi(x, 6);
    for n in 1..=6 {
        let expected = (psi[n - 1] - n as f64 / x * psi[n]) / psi[n];
        assert_close_c(d[n], Complex64::new(expected, 0.0), 1e-9);
    }
}

#[test]
fn log_derivative_rejects_non_finite_argument() {
    assert!(log_derivative(Complex64::new(f64::NAN, 0.0), 5).is_err());
}

#[test]
fn miller_j_keeps_zero_imaginary_part_on_real_axis() {
    for &x in &[0.5, 1.0, 2.4, 3.7, 6.1, 11.0] {
        let seq = bessel_j_seq(Complex64::new(x, 0.0), 4).unwrap();
        for n in 0..=4 {
            assert_close(seq[n].im, 0.0, 1e-12);
        }
    }
}

#[test]
fn miller_j_matches_power_series_for_complex_argument() {
    for &z in &[
        Complex64::new(2.0, 0.5),
        Complex64::new(0.8, 1.2),
        Complex64::new(5.0, 2.0),
    ] {
        let seq = bessel_j_seq(z, 6).unwrap();
        for &n in &[0usize, 1, 4] {
            let reference = j_series(n, z);
            assert!(
                (seq[n] - reference).norm() <= 1e-10 * reference.norm().max(1.0),
                "J_{n}({z}): {} vs {}",
                seq[n],
                reference
            );
        }
    }
}

#[test]
fn miller_j_at_zero_argument() {
    let seq = bessel_j_seq(Complex64::new(0.0, 0.0), 3).unwrap();
    assert_close_c(seq[0], Complex64::new(1.0, 0.0), 1e-15);
    for n in 1..=3 {
        assert_close_c(seq[n], Complex64::new(0.0, 0.0), 1e-15);
    }
}

#[test]
fn bessel_seeds_carry_full_double_precision() {
    let j1 = bessel_j_seq(Complex64::new(1.0, 0.0), 1).unwrap();
    assert_close(j1[0].re, 0.765_197_686_557_966_6, 1e-13);
    assert_close(j1[1].re, 0.440_050_585_744_933_5, 1e-13);
    let y1 = bessel_y_seq(1.0, 1).unwrap();
    assert_close(y1[0], 0.088_256_964_215_676_96, 1e-13);
    assert_close(y1[1], -0.781_212_821_300_288_7, 1e-13);
    let j10 = bessel_j_seq(Complex64::new(10.0, 0.0), 1).unwrap();
    assert_close(j10[0].re, -0.245_935_764_451_348_3, 1e-13);
    assert_close(j10[1].re, 0.043_472_746_168_861_44, 1e-13);
    let y10 = bessel_y_seq(10.0, 1).unwrap();
    assert_close(y10[0], 0.055_671_167_283_599_39, 1e-13);
    assert_close(y10[1], 0.249_015_424_206_953_9, 1e-13);
}

#[test]
fn hankel_satisfies_wronskian() {
    // J_{n+1} Y_n - J_n Y_{n+1} = 2 / (pi x)
    for &x in &[0.1, 0.5, 1.3, 2.404_825_557_695_773, 4.0, 9.2, 30.0] {
        let j = bessel_j_seq(Complex64::new(x, 0.0), 10).unwrap();
        let y = bessel_y_seq(x, 10).unwrap();
        let reference = 2.0 / (std::f64::consts::PI * x);
        for n in 0..10 {
            let w = j[n + 1].re * y[n] - j[n].re * y[n + 1];
            assert!(
                (w - reference).abs() <= 1e-11 * reference.abs(),
                "x = {x}, n = {n}: {w} vs {reference}"
            );
        }
    }
}

#[test]
fn hankel_combines_j_and_y() {
    let x = 2.7;
    let h = hankel1_seq(x, 3).unwrap();
    let y = bessel_y_seq(x, 3).unwrap();
    for n in 0..=3 {
        assert_close(h[n].im, y[n], 1e-12);
    }
}

#[test]
fn bessel_y_rejects_non_positive_argument() {
    assert!(bessel_y_seq(0.0, 3).is_err());
    assert!(bessel_y_seq(-1.0, 3).is_err());
}
