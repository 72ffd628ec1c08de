//! Special-function kernel: Riccati-Bessel and cylindrical Bessel recursions.
//!
//! All series used by the coefficient recursions come from here. The
//! stability rules are the classic ones: logarithmic derivatives of psi are
//! generated by downward recursion (stable for complex argument, i.e.
//! absorbing media), chi and Y by upward recursion (their stable direction),
//! and cylindrical J by Miller's downward scheme with the
//! J0 + 2*sum(J_2k) = 1 normalization.

use num_complex::Complex64;

use crate::error::EngineError;

/// Riccati-Bessel psi_n(x) = x j_n(x) and chi_n(x) = -x y_n(x) for real x,
/// orders 0..=nmax, by upward recursion.
pub fn riccati_psi_chi(x: f64, nmax: usize) -> (Vec<f64>, Vec<f64>) {
    let mut psi = vec![0.0; nmax + 1];
    let mut chi = vec![0.0; nmax + 1];
    let psi_m1 = x.cos();
    let chi_m1 = -x.sin();
    psi[0] = x.sin();
    chi[0] = x.cos();
    for n in 1..=nmax {
        let (psi_prev2, chi_prev2) = if n >= 2 {
            (psi[n - 2], chi[n - 2])
        } else {
            (psi_m1, chi_m1)
        };
        let f = (2 * n - 1) as f64 / x;
        psi[n] = f * psi[n - 1] - psi_prev2;
        chi[n] = f * chi[n - 1] - chi_prev2;
    }
    (psi, chi)
}

/// Logarithmic derivative D_n(z) = psi_n'(z)/psi_n(z), orders 0..=nmax.
///
/// Downward recursion started well above nmax; stable for complex z with
/// large imaginary part, where the upward direction blows up.
pub fn log_derivative(z: Complex64, nmax: usize) -> Result<Vec<Complex64>, EngineError> {
    if !z.re.is_finite() || !z.im.is_finite() {
        return Err(EngineError::validation(format!(
            "log_derivative: non-finite argument {z}"
        )));
    }
    let start = nmax + z.norm() as usize + 16;
    let mut d = Complex64::new(0.0, 0.0);
    let mut out = vec![Complex64::new(0.0, 0.0); nmax + 1];
    for n in (1..=start).rev() {
        let nz = (n as f64) / z;
        d = nz - 1.0 / (d + nz);
        if n - 1 <= nmax {
            out[n - 1] = d;
        }
    }
    Ok(out)
}

/// Riccati-Bessel psi_n and chi_n at complex argument, orders 0..=nmax.
///
/// psi is built from the downward log-derivative ratios
/// (psi_n = psi_{n-1} / (D_n + n/z)); chi goes upward.
pub fn riccati_psi_chi_complex(
    z: Complex64,
    nmax: usize,
) -> Result<(Vec<Complex64>, Vec<Complex64>), EngineError> {
    let d = log_derivative(z, nmax)?;
    let mut psi = vec![Complex64::new(0.0, 0.0); nmax + 1];
    let mut chi = vec![Complex64::new(0.0, 0.0); nmax + 1];
    let chi_m1 = -z.sin();
    psi[0] = z.sin();
    chi[0] = z.cos();
    for n in 1..=nmax {
        let nz = (n as f64) / z;
        psi[n] = psi[n - 1] / (d[n] + nz);
        let chi_prev2 = if n >= 2 { chi[n - 2] } else { chi_m1 };
        chi[n] = (2 * n - 1) as f64 / z * chi[n - 1] - chi_prev2;
    }
    Ok((psi, chi))
}

/// Cylindrical Bessel J_n(z), orders 0..=nmax, for complex z.
///
/// Miller downward recursion with periodic rescaling to avoid overflow,
/// normalized by J0(z) + 2*sum_{k>=1} J_{2k}(z) = 1 (valid for complex z).
pub fn bessel_j_seq(z: Complex64, nmax: usize) -> Result<Vec<Complex64>, EngineError> {
    if !z.re.is_finite() || !z.im.is_finite() {
        return Err(EngineError::validation(format!(
            "bessel_j_seq: non-finite argument {z}"
        )));
    }
    let mut out = vec![Complex64::new(0.0, 0.0); nmax + 1];
    if z.norm() < 1e-12 {
        out[0] = Complex64::new(1.0, 0.0);
        return Ok(out);
    }
    let start = nmax + z.norm() as usize + 20 + (15.0 * z.norm().sqrt()) as usize;
    let mut jp1 = Complex64::new(0.0, 0.0);
    let mut j = Complex64::new(1e-30, 0.0);
    let mut norm = Complex64::new(0.0, 0.0);
    for n in (0..=start).rev() {
        let jm1 = (2 * (n + 1)) as f64 / z * j - jp1;
        jp1 = j;
        j = jm1;
        if n <= nmax {
            out[n] = j;
        }
        if n > 0 && n % 2 == 0 {
            norm += 2.0 * j;
        }
        if j.re.abs() > 1e100 || j.im.abs() > 1e100 {
            let scale = 1e-100;
            j *= scale;
            jp1 *= scale;
            norm *= scale;
            for value in out.iter_mut() {
                *value *= scale;
            }
        }
    }
    norm += j; // J_0
    if norm.norm() == 0.0 || !norm.re.is_finite() || !norm.im.is_finite() {
        return Err(EngineError::instability(format!(
            "bessel_j_seq: normalization failed for argument {z}"
        )));
    }
    for value in out.iter_mut() {
        *value /= norm;
    }
    Ok(out)
}

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Cylindrical Bessel Y_n(x), orders 0..=nmax, real x > 0.
///
/// Y0 and Y1 are assembled from the Miller-normalized J sequence via the
/// Neumann series
///   Y0 = (2/pi) [ (ln(x/2) + gamma) J0 + 2 sum_{k>=1} (-1)^{k+1} J_{2k}/k ]
/// and its derivative (Y1 = -Y0'), so the seeds carry full double precision;
/// the remaining orders follow by upward recursion, the stable direction.
pub fn bessel_y_seq(x: f64, nmax: usize) -> Result<Vec<f64>, EngineError> {
    if !x.is_finite() || x <= 0.0 {
        return Err(EngineError::validation(format!(
            "bessel_y_seq: argument must be finite and positive, got {x}"
        )));
    }
    // J_n(x) is negligible this far past the turning point, so both Neumann
    // sums below have converged to machine precision.
    let top = nmax.max(x as usize + (10.0 * x.cbrt()) as usize + 24);
    let j = bessel_j_seq(Complex64::new(x, 0.0), top)?;
    let log_term = (0.5 * x).ln() + EULER_GAMMA;
    let mut sum0 = 0.0;
    let mut sum1 = 0.0;
    let mut sign = 1.0;
    for k in 1..=(top - 1) / 2 {
        sum0 += sign * j[2 * k].re / k as f64;
        sum1 += sign * (j[2 * k - 1].re - j[2 * k + 1].re) / k as f64;
        sign = -sign;
    }
    let mut out = vec![0.0; nmax + 1];
    out[0] = std::f64::consts::FRAC_2_PI * (log_term * j[0].re + 2.0 * sum0);
    if nmax >= 1 {
        out[1] = std::f64::consts::FRAC_2_PI * (log_term * j[1].re - j[0].re / x - sum1);
    }
    for n in 2..=nmax {
        out[n] = 2.0 * (n - 1) as f64 / x * out[n - 1] - out[n - 2];
    }
    Ok(out)
}

/// Hankel functions of the first kind H^(1)_n(x) = J_n(x) + i Y_n(x),
/// orders 0..=nmax, real x > 0.
pub fn hankel1_seq(x: f64, nmax: usize) -> Result<Vec<Complex64>, EngineError> {
    let j = bessel_j_seq(Complex64::new(x, 0.0), nmax)?;
    let y = bessel_y_seq(x, nmax)?;
    Ok(j.iter()
        .zip(y.iter())
        .map(|(jn, yn)| Complex64::new(jn.re, *yn))
        .collect())
}

/// Derivative from the sequence: f_n'(z) = f_{n-1}(z) - (n/z) f_n(z),
/// with f_0'(z) = -f_1(z).
pub fn cyl_derivative(seq: &[Complex64], n: usize, z: Complex64) -> Complex64 {
    if n == 0 {
        -seq[1]
    } else {
        seq[n - 1] - (n as f64) / z * seq[n]
    }
}
