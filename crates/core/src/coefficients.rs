//! Expansion-coefficient recursions for spheres, coated spheres, and
//! infinite cylinders.
//!
//! Sphere and coated-sphere coefficients use the log-derivative scheme:
//! downward recursion for D_n at the internal arguments, upward recursion
//! for the Riccati-Bessel functions at the external argument. Cylinder
//! coefficients use cylindrical J and H^(1) sequences directly.

use num_complex::Complex64;

use crate::error::EngineError;
use crate::special::{
    bessel_j_seq, cyl_derivative, hankel1_seq, log_derivative, riccati_psi_chi,
    riccati_psi_chi_complex,
};

/// Multipole coefficients a_n, b_n for n = 1..=order, stored zero-based
/// (`a[i]` is a_{i+1}).
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSet {
    pub a: Vec<Complex64>,
    pub b: Vec<Complex64>,
}

impl CoefficientSet {
    pub fn order(&self) -> usize {
        self.a.len()
    }

    /// Truncated copy holding the first `order` terms (or all of them when
    /// `order` is larger than what is stored).
    pub fn truncated(&self, order: usize) -> Self {
        let n = order.min(self.a.len());
        Self {
            a: self.a[..n].to_vec(),
            b: self.b[..n].to_vec(),
        }
    }
}

/// Homogeneous-sphere coefficients for relative index `m` and size
/// parameter `x`, orders 1..=nmax.
pub fn mie_ab(m: Complex64, x: f64, nmax: usize) -> Result<CoefficientSet, EngineError> {
    let mx = m * x;
    let d = log_derivative(mx, nmax)?;
    let (psi, chi) = riccati_psi_chi(x, nmax);
    let mut a = Vec::with_capacity(nmax);
    let mut b = Vec::with_capacity(nmax);
    for n in 1..=nmax {
        let xi_n = Complex64::new(psi[n], -chi[n]);
        let xi_nm1 = Complex64::new(psi[n - 1], -chi[n - 1]);
        let nx = n as f64 / x;
        let da = d[n] / m + nx;
        let db = d[n] * m + nx;
        a.push((da * psi[n] - psi[n - 1]) / (da * xi_n - xi_nm1));
        b.push((db * psi[n] - psi[n - 1]) / (db * xi_n - xi_nm1));
    }
    Ok(CoefficientSet { a, b })
}

/// Coated-sphere coefficients. `m1`, `m2` are the relative indices of core
/// and shell, `x`, `y` the core and outer size parameters. Degenerates to
/// [`mie_ab`] when `x == y` or `m1 == m2`.
pub fn coated_ab(
    m1: Complex64,
    m2: Complex64,
    x: f64,
    y: f64,
    nmax: usize,
) -> Result<CoefficientSet, EngineError> {
    let m1x = m1 * x;
    let m2x = m2 * x;
    let m2y = m2 * y;

    let (psi_m1x, _) = riccati_psi_chi_complex(m1x, nmax)?;
    let (psi_m2x, chi_m2x) = riccati_psi_chi_complex(m2x, nmax)?;
    let (psi_m2y, chi_m2y) = riccati_psi_chi_complex(m2y, nmax)?;
    let (psi_y, chi_y) = riccati_psi_chi(y, nmax);

    // f'_n(z) = f_{n-1}(z) - (n/z) f_n(z), valid for psi and chi alike.
    let deriv = |seq: &[Complex64], n: usize, z: Complex64| -> Complex64 {
        seq[n - 1] - n as f64 / z * seq[n]
    };

    let mut a = Vec::with_capacity(nmax);
    let mut b = Vec::with_capacity(nmax);
    for n in 1..=nmax {
        let dp_m1x = deriv(&psi_m1x, n, m1x);
        let dp_m2x = deriv(&psi_m2x, n, m2x);
        let dc_m2x = deriv(&chi_m2x, n, m2x);
        let dp_m2y = deriv(&psi_m2y, n, m2y);
        let dc_m2y = deriv(&chi_m2y, n, m2y);
        let ny = n as f64 / y;
        let dp_y = psi_y[n - 1] - ny * psi_y[n];
        let dc_y = chi_y[n - 1] - ny * chi_y[n];

        // Inner-boundary terms; both vanish when m1 == m2 or x == 0, which
        // collapses the result to the homogeneous sphere.
        let an = (m2 * psi_m2x[n] * dp_m1x - m1 * dp_m2x * psi_m1x[n])
            / (m2 * chi_m2x[n] * dp_m1x - m1 * dc_m2x * psi_m1x[n]);
        let bn = (m2 * psi_m1x[n] * dp_m2x - m1 * psi_m2x[n] * dp_m1x)
            / (m2 * dc_m2x * psi_m1x[n] - m1 * dp_m1x * chi_m2x[n]);

        let xi_n = Complex64::new(psi_y[n], -chi_y[n]);
        let dxi_n = Complex64::new(dp_y, -dc_y);

        let pa = dp_m2y - an * dc_m2y;
        let qa = psi_m2y[n] - an * chi_m2y[n];
        a.push((psi_y[n] * pa - m2 * dp_y * qa) / (xi_n * pa - m2 * dxi_n * qa));

        let pb = dp_m2y - bn * dc_m2y;
        let qb = psi_m2y[n] - bn * chi_m2y[n];
        b.push((m2 * psi_y[n] * pb - dp_y * qb) / (m2 * xi_n * pb - dxi_n * qb));
    }
    Ok(CoefficientSet { a, b })
}

/// Cylinder coefficients for both incident polarizations, orders
/// 0..=order-1 (`a1[i]` is the coefficient of azimuthal order i).
///
/// Case I (E parallel to the cylinder axis) gives b1 with a1 identically
/// zero at normal incidence; case II (E perpendicular) gives a2 with b2
/// identically zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderCoefficients {
    pub a1: Vec<Complex64>,
    pub a2: Vec<Complex64>,
    pub b1: Vec<Complex64>,
    pub b2: Vec<Complex64>,
}

impl CylinderCoefficients {
    pub fn order(&self) -> usize {
        self.b1.len()
    }

    pub fn truncated(&self, order: usize) -> Self {
        let n = order.min(self.b1.len());
        Self {
            a1: self.a1[..n].to_vec(),
            a2: self.a2[..n].to_vec(),
            b1: self.b1[..n].to_vec(),
            b2: self.b2[..n].to_vec(),
        }
    }
}

/// Normal-incidence cylinder coefficients for relative index `m` and size
/// parameter `x`.
pub fn cylinder_ab(
    m: Complex64,
    x: f64,
    nmax: usize,
) -> Result<CylinderCoefficients, EngineError> {
    let mx = m * x;
    let xc = Complex64::new(x, 0.0);
    let j_mx = bessel_j_seq(mx, nmax)?;
    let j_x = bessel_j_seq(xc, nmax)?;
    let h_x = hankel1_seq(x, nmax)?;

    let zero = Complex64::new(0.0, 0.0);
    let mut a2 = Vec::with_capacity(nmax);
    let mut b1 = Vec::with_capacity(nmax);
    for n in 0..nmax {
        let jp_mx = cyl_derivative(&j_mx, n, mx);
        let jp_x = cyl_derivative(&j_x, n, xc);
        let hp_x = cyl_derivative(&h_x, n, xc);

        // Case II: E perpendicular to the axis.
        a2.push(
            (m * j_mx[n] * jp_x - jp_mx * j_x[n]) / (m * j_mx[n] * hp_x - jp_mx * h_x[n]),
        );
        // Case I: E parallel to the axis.
        b1.push(
            (j_mx[n] * jp_x - m * jp_mx * j_x[n]) / (j_mx[n] * hp_x - m * jp_mx * h_x[n]),
        );
    }
    Ok(CylinderCoefficients {
        a1: vec![zero; nmax],
        a2,
        b1,
        b2: vec![zero; nmax],
    })
}
