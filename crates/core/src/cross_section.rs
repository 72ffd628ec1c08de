//! Cross-section and efficiency aggregation from expansion coefficients.

use num_complex::Complex64;

use crate::coefficients::{CoefficientSet, CylinderCoefficients};

/// Dimensionless efficiencies of a single scatterer.
///
/// `qabs`, `qpr` and `qratio` are derived: Qabs = Qext - Qsca,
/// Qpr = Qext - g Qsca, Qratio = Qback / Qsca. Cross sections follow by
/// multiplying with the geometric area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiencies {
    pub qsca: f64,
    pub qext: f64,
    pub qback: f64,
    pub qforward: f64,
    pub g: f64,
}

impl Efficiencies {
    pub fn qabs(&self) -> f64 {
        self.qext - self.qsca
    }

    pub fn qpr(&self) -> f64 {
        self.qext - self.g * self.qsca
    }

    pub fn qratio(&self) -> f64 {
        self.qback / self.qsca
    }
}

/// Efficiencies of a sphere-like scatterer (homogeneous or coated) from its
/// multipole coefficients and outer size parameter.
pub fn sphere_efficiencies(coeffs: &CoefficientSet, x: f64) -> Efficiencies {
    let nmax = coeffs.order();
    let mut qsca = 0.0;
    let mut qext = 0.0;
    let mut back = Complex64::new(0.0, 0.0);
    let mut forward = Complex64::new(0.0, 0.0);
    for n in 1..=nmax {
        let an = coeffs.a[n - 1];
        let bn = coeffs.b[n - 1];
        let f = (2 * n + 1) as f64;
        qsca += f * (an.norm_sqr() + bn.norm_sqr());
        qext += f * (an + bn).re;
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        back += f * sign * (an - bn);
        forward += f * (an + bn);
    }
    let x2 = x * x;
    let qsca = qsca * 2.0 / x2;
    Efficiencies {
        qsca,
        qext: qext * 2.0 / x2,
        qback: back.norm_sqr() / x2,
        qforward: forward.norm_sqr() / x2,
        g: asymmetry(coeffs, x, qsca),
    }
}

/// Asymmetry parameter <cos theta> by the cross-term series.
fn asymmetry(coeffs: &CoefficientSet, x: f64, qsca: f64) -> f64 {
    let nmax = coeffs.order();
    let mut g = 0.0;
    for n in 1..nmax {
        let an = coeffs.a[n - 1];
        let bn = coeffs.b[n - 1];
        let an1 = coeffs.a[n];
        let bn1 = coeffs.b[n];
        let nf = n as f64;
        g += nf * (nf + 2.0) / (nf + 1.0) * (an * an1.conj() + bn * bn1.conj()).re;
    }
    for n in 1..=nmax {
        let an = coeffs.a[n - 1];
        let bn = coeffs.b[n - 1];
        let nf = n as f64;
        g += (2.0 * nf + 1.0) / (nf * (nf + 1.0)) * (an * bn.conj()).re;
    }
    if qsca == 0.0 {
        0.0
    } else {
        g * 4.0 / (qsca * x * x)
    }
}

/// Per-polarization cylinder efficiencies (case I: E parallel to the axis,
/// case II: perpendicular), before the Jones-vector merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderEfficiencies {
    pub qsca1: f64,
    pub qsca2: f64,
    pub qext1: f64,
    pub qext2: f64,
}

/// Cylinder scattering and extinction efficiencies from the normal-incidence
/// coefficient series. The n = 0 term enters once, all higher orders twice.
pub fn cylinder_efficiencies(coeffs: &CylinderCoefficients, x: f64) -> CylinderEfficiencies {
    let nmax = coeffs.order();
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    let mut e1 = Complex64::new(0.0, 0.0);
    let mut e2 = Complex64::new(0.0, 0.0);
    for n in 1..nmax {
        s1 += coeffs.b1[n].norm_sqr();
        s2 += coeffs.a2[n].norm_sqr();
        e1 += coeffs.b1[n];
        e2 += coeffs.a2[n];
    }
    CylinderEfficiencies {
        qsca1: 2.0 / x * (2.0 * s1 + coeffs.b1[0].norm_sqr()),
        qsca2: 2.0 / x * (2.0 * s2 + coeffs.a2[0].norm_sqr()),
        qext1: 2.0 / x * (coeffs.b1[0] + 2.0 * e1).re,
        qext2: 2.0 / x * (coeffs.a2[0] + 2.0 * e2).re,
    }
}

/// Merge the two cylinder polarization cases with the source Jones vector:
/// the x component drives case II, the y component case I.
pub fn merge_polarizations(case1: f64, case2: f64, jones: [Complex64; 2]) -> f64 {
    case2 * jones[0].norm_sqr() + case1 * jones[1].norm_sqr()
}
