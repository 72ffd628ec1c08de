use num_complex::Complex64;

use crate::coefficients::{coated_ab, cylinder_ab, mie_ab};
use crate::cross_section::{
    cylinder_efficiencies, merge_polarizations, sphere_efficiencies,
};
use crate::truncation::wiscombe_order;

fn assert_rel(a: f64, b: f64, tol: f64) {
    let scale = b.abs().max(1e-300);
    assert!((a - b).abs() / scale <= tol, "{a} vs {b} (rel tol {tol})");
}

#[test]
fn reference_sphere_efficiencies() {
    // 800 nm sphere, n = 1.5, vacuum, lambda = 632.8 nm.
    let x = std::f64::consts::PI * 800e-9 / 632.8e-9;
    let nmax = wiscombe_order(x).unwrap();
    let coeffs = mie_ab(Complex64::new(1.5, 0.0), x, nmax).unwrap();
    let eff = sphere_efficiencies(&coeffs, x);
    assert_rel(eff.qsca, 4.049_628_722_290, 1e-9);
    assert_rel(eff.qext, 4.049_628_722_290, 1e-9);
    assert_rel(eff.qback, 0.864_164_333_616, 1e-9);
    assert_rel(eff.qforward, 66.745_009_204_735, 1e-9);
    assert_rel(eff.g, 0.752_342_839_113, 1e-9);
    assert_rel(eff.qpr(), 1.002_919_552_008, 1e-8);
    assert_rel(eff.qratio(), 0.864_164_333_616 / 4.049_628_722_290, 1e-8);
}

#[test]
fn absorbing_sphere_efficiencies() {
    // 500 nm sphere, n = 1.4 + 0.2i, water-like medium 1.33, lambda = 1 um.
    let x = std::f64::consts::PI * 500e-9 * 1.33 / 1000e-9;
    let nmax = wiscombe_order(x).unwrap();
    assert_eq!(nmax, 9);
    let m = Complex64::new(1.4, 0.2) / 1.33;
    let coeffs = mie_ab(m, x, nmax).unwrap();
    let eff = sphere_efficiencies(&coeffs, x);
    assert_rel(eff.qsca, 0.107_621_085_514, 1e-9);
    assert_rel(eff.qext, 0.755_520_832_638, 1e-9);
    assert_rel(eff.qabs(), 0.647_899_747_123, 1e-9);
    assert_rel(eff.g, 0.678_555_783_251, 1e-8);
    assert_rel(eff.qpr(), 0.682_493_922_662, 1e-8);
    assert_rel(eff.qback, 0.001_345_230_105, 1e-8);
}

#[test]
fn lossless_sphere_conserves_energy() {
    // Real index: extinction is all scattering.
    for &(d, n) in &[(100e-9, 1.33), (800e-9, 1.5), (2.5e-6, 1.7)] {
        let x = std::f64::consts::PI * d / 632.8e-9;
        let nmax = wiscombe_order(x).unwrap();
        let coeffs = mie_ab(Complex64::new(n, 0.0), x, nmax).unwrap();
        let eff = sphere_efficiencies(&coeffs, x);
        assert_rel(eff.qext, eff.qsca, 1e-9);
        assert!(eff.qabs().abs() < 1e-9 * eff.qext);
    }
}

#[test]
fn absorbing_media_have_non_negative_absorption() {
    for &im in &[0.01, 0.1, 0.5, 2.0] {
        let x = 2.5;
        let nmax = wiscombe_order(x).unwrap();
        let coeffs = mie_ab(Complex64::new(1.4, im), x, nmax).unwrap();
        let eff = sphere_efficiencies(&coeffs, x);
        assert!(eff.qabs() >= 0.0, "negative Qabs at k = {im}");
    }
}

#[test]
fn coated_sphere_efficiencies() {
    // 400 nm core n = 1.4, 200 nm shell n = 1.6, vacuum, lambda = 632.8 nm.
    let wl = 632.8e-9;
    let x = std::f64::consts::PI * 400e-9 / wl;
    let y = std::f64::consts::PI * 800e-9 / wl;
    let nmax = wiscombe_order(y).unwrap();
    let coeffs = coated_ab(
        Complex64::new(1.4, 0.0),
        Complex64::new(1.6, 0.0),
        x,
        y,
        nmax,
    )
    .unwrap();
    let eff = sphere_efficiencies(&coeffs, y);
    assert_rel(eff.qsca, 4.639_205_790_332, 1e-9);
    assert_rel(eff.qext, 4.639_205_790_332, 1e-9);
    assert_rel(eff.g, 0.711_594_616_049, 1e-8);
}

#[test]
fn coated_sphere_with_absorbing_shell() {
    let wl = 632.8e-9;
    let x = std::f64::consts::PI * 400e-9 / wl;
    let y = std::f64::consts::PI * 800e-9 / wl;
    let nmax = wiscombe_order(y).unwrap();
    let coeffs = coated_ab(
        Complex64::new(1.4, 0.0),
        Complex64::new(1.6, 0.1),
        x,
        y,
        nmax,
    )
    .unwrap();
    let eff = sphere_efficiencies(&coeffs, y);
    assert_rel(eff.qsca, 2.721_311_551_655, 1e-9);
    assert_rel(eff.qext, 3.792_209_285_570, 1e-9);
    assert_rel(eff.qabs(), 1.070_897_733_915, 1e-8);
}

#[test]
fn reference_cylinder_efficiencies() {
    let x = std::f64::consts::PI * 800e-9 / 632.8e-9;
    let nmax = wiscombe_order(x).unwrap();
    let coeffs = cylinder_ab(Complex64::new(1.5, 0.0), x, nmax).unwrap();
    let eff = cylinder_efficiencies(&coeffs, x);
    assert_rel(eff.qsca1, 4.100_475_526_642_84, 1e-9);
    assert_rel(eff.qsca2, 3.758_763_221_277_04, 1e-9);
    // Lossless: per-case extinction equals scattering.
    assert_rel(eff.qext1, eff.qsca1, 1e-9);
    assert_rel(eff.qext2, eff.qsca2, 1e-9);
}

#[test]
fn absorbing_cylinder_efficiencies() {
    let x = std::f64::consts::PI * 800e-9 / 632.8e-9;
    let nmax = wiscombe_order(x).unwrap();
    let coeffs = cylinder_ab(Complex64::new(1.5, 0.1), x, nmax).unwrap();
    let eff = cylinder_efficiencies(&coeffs, x);
    assert_rel(eff.qsca1, 2.224_491_6, 1e-6);
    assert_rel(eff.qsca2, 2.104_387_8, 1e-6);
    assert_rel(eff.qext1, 3.139_902_8, 1e-6);
    assert_rel(eff.qext2, 2.986_793_5, 1e-6);
    // Absorption stays positive under a complex index.
    assert!(eff.qext1 > eff.qsca1);
    assert!(eff.qext2 > eff.qsca2);
}

#[test]
fn polarization_merge_selects_cases() {
    let jones_x = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
    let jones_y = [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
    assert_eq!(merge_polarizations(3.0, 7.0, jones_x), 7.0);
    assert_eq!(merge_polarizations(3.0, 7.0, jones_y), 3.0);
    // 45 degrees mixes the two cases evenly.
    let c = std::f64::consts::FRAC_1_SQRT_2;
    let jones_45 = [Complex64::new(c, 0.0), Complex64::new(c, 0.0)];
    assert_rel(merge_polarizations(3.0, 7.0, jones_45), 5.0, 1e-12);
}
