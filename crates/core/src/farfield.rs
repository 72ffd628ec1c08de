//! Far-field amplitude functions, scattered fields, and Stokes parameters.

use num_complex::Complex64;
use rayon::prelude::*;

use crate::coefficients::{CoefficientSet, CylinderCoefficients};

/// Scattering amplitudes S1, S2 at a set of polar angles.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudePair {
    pub s1: Vec<Complex64>,
    pub s2: Vec<Complex64>,
}

/// S1/S2 for a sphere-like scatterer at the given polar angles (radians,
/// 0 = forward). Uses the pi_n/tau_n angular-function recursion.
pub fn sphere_s1s2(coeffs: &CoefficientSet, angles: &[f64]) -> AmplitudePair {
    let pairs: Vec<(Complex64, Complex64)> = angles
        .par_iter()
        .map(|&theta| sphere_s1s2_at(coeffs, theta.cos()))
        .collect();
    AmplitudePair {
        s1: pairs.iter().map(|p| p.0).collect(),
        s2: pairs.iter().map(|p| p.1).collect(),
    }
}

/// Single-angle S1/S2 at mu = cos(theta).
pub fn sphere_s1s2_at(coeffs: &CoefficientSet, mu: f64) -> (Complex64, Complex64) {
    let nmax = coeffs.order();
    let mut pi_nm1 = 0.0;
    let mut pi_n = 1.0;
    let mut s1 = Complex64::new(0.0, 0.0);
    let mut s2 = Complex64::new(0.0, 0.0);
    for n in 1..=nmax {
        let nf = n as f64;
        let tau_n = nf * mu * pi_n - (nf + 1.0) * pi_nm1;
        let f = (2.0 * nf + 1.0) / (nf * (nf + 1.0));
        let an = coeffs.a[n - 1];
        let bn = coeffs.b[n - 1];
        s1 += f * (an * pi_n + bn * tau_n);
        s2 += f * (an * tau_n + bn * pi_n);
        let pi_np1 = ((2.0 * nf + 1.0) * mu * pi_n - (nf + 1.0) * pi_nm1) / nf;
        pi_nm1 = pi_n;
        pi_n = pi_np1;
    }
    (s1, s2)
}

/// T1/T2 for an infinite cylinder at normal incidence, at the given
/// scattering angles (radians, 0 = forward). The n = 0 term enters once,
/// all higher orders twice.
pub fn cylinder_s1s2(coeffs: &CylinderCoefficients, angles: &[f64]) -> AmplitudePair {
    let nmax = coeffs.order();
    let pairs: Vec<(Complex64, Complex64)> = angles
        .par_iter()
        .map(|&theta| {
            let mut t1 = coeffs.b1[0];
            let mut t2 = coeffs.a2[0];
            for n in 1..nmax {
                let c = (n as f64 * theta).cos();
                t1 += 2.0 * coeffs.b1[n] * c;
                t2 += 2.0 * coeffs.a2[n] * c;
            }
            (t1, t2)
        })
        .collect();
    AmplitudePair {
        s1: pairs.iter().map(|p| p.0).collect(),
        s2: pairs.iter().map(|p| p.1).collect(),
    }
}

/// Far-zone scattered field components on a set of directions.
#[derive(Debug, Clone, PartialEq)]
pub struct FarField {
    pub e_phi: Vec<Complex64>,
    pub e_theta: Vec<Complex64>,
}

impl FarField {
    /// Scattered E_phi/E_theta from the amplitudes, incident Jones vector,
    /// and azimuth of each direction. The projection rotates the Jones
    /// vector into the scattering plane of each point.
    pub fn from_amplitudes(amplitudes: &AmplitudePair, jones: [Complex64; 2], azimuths: &[f64]) -> Self {
        let mut e_phi = Vec::with_capacity(azimuths.len());
        let mut e_theta = Vec::with_capacity(azimuths.len());
        for (i, &az) in azimuths.iter().enumerate() {
            let (cos_az, sin_az) = (az.cos(), az.sin());
            e_phi.push(amplitudes.s1[i] * (jones[0] * cos_az + jones[1] * sin_az));
            e_theta.push(amplitudes.s2[i] * (jones[0] * sin_az - jones[1] * cos_az));
        }
        Self { e_phi, e_theta }
    }
}

/// Stokes parameters (I, Q, U, V) of the scattered far field.
#[derive(Debug, Clone, PartialEq)]
pub struct StokesSet {
    pub i: Vec<f64>,
    pub q: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

impl StokesSet {
    pub fn from_fields(fields: &FarField) -> Self {
        let n = fields.e_phi.len();
        let mut out = Self {
            i: Vec::with_capacity(n),
            q: Vec::with_capacity(n),
            u: Vec::with_capacity(n),
            v: Vec::with_capacity(n),
        };
        for (ep, et) in fields.e_phi.iter().zip(fields.e_theta.iter()) {
            let cross = ep * et.conj();
            out.i.push(ep.norm_sqr() + et.norm_sqr());
            out.q.push(ep.norm_sqr() - et.norm_sqr());
            out.u.push(-2.0 * cross.re);
            out.v.push(2.0 * cross.im);
        }
        out
    }
}

/// Scattering phase function |S1|^2 + |S2|^2 at the given polar angles.
pub fn phase_function(amplitudes: &AmplitudePair) -> Vec<f64> {
    amplitudes
        .s1
        .iter()
        .zip(amplitudes.s2.iter())
        .map(|(s1, s2)| s1.norm_sqr() + s2.norm_sqr())
        .collect()
}
