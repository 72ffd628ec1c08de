//! Angular sampling meshes for detector integration.

use serde::{Deserialize, Serialize};

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// A direction on the unit sphere, as polar angle from the forward axis and
/// azimuth in the transverse plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshPoint {
    pub theta: f64,
    pub azimuth: f64,
}

/// Quasi-uniform Fibonacci-spiral sampling of a spherical cap.
///
/// Points are laid out on the cap of half-angle `max_angle` around +z with
/// uniform z spacing and golden-ratio azimuth increments, then the cap is
/// rotated to point at (`gamma_offset` polar, `phi_offset` azimuth). Every
/// point carries the same solid-angle weight [`FibonacciMesh::d_omega`].
#[derive(Debug, Clone, PartialEq)]
pub struct FibonacciMesh {
    pub points: Vec<MeshPoint>,
    d_omega: f64,
}

impl FibonacciMesh {
    pub fn cap(sampling: usize, max_angle: f64, gamma_offset: f64, phi_offset: f64) -> Self {
        let z_min = max_angle.cos();
        let (cg, sg) = (gamma_offset.cos(), gamma_offset.sin());
        let (cp, sp) = (phi_offset.cos(), phi_offset.sin());
        let mut points = Vec::with_capacity(sampling);
        for i in 0..sampling {
            let z = 1.0 - (1.0 - z_min) * (i as f64 + 0.5) / sampling as f64;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let az = 2.0 * std::f64::consts::PI * i as f64 / GOLDEN_RATIO;
            let (x, y) = (r * az.cos(), r * az.sin());
            // Rotate about y by gamma, then about z by phi.
            let (x1, z1) = (x * cg + z * sg, -x * sg + z * cg);
            let (x2, y2) = (x1 * cp - y * sp, x1 * sp + y * cp);
            points.push(MeshPoint {
                theta: z1.clamp(-1.0, 1.0).acos(),
                azimuth: y2.atan2(x2),
            });
        }
        Self {
            points,
            d_omega: 2.0 * std::f64::consts::PI * (1.0 - z_min) / sampling as f64,
        }
    }

    /// Full-sphere mesh, used for angular integrals such as the cylinder
    /// asymmetry parameter.
    pub fn full_sphere(sampling: usize) -> Self {
        Self::cap(sampling, std::f64::consts::PI, 0.0, 0.0)
    }

    /// Solid angle attached to each point.
    pub fn d_omega(&self) -> f64 {
        self.d_omega
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn thetas(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.theta).collect()
    }

    pub fn azimuths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.azimuth).collect()
    }

    /// Integral of a per-point quantity over the mesh.
    pub fn integral(&self, values: &[f64]) -> f64 {
        values.iter().sum::<f64>() * self.d_omega
    }

    /// Integral of a per-point quantity weighted by cos(theta).
    pub fn cos_integral(&self, values: &[f64]) -> f64 {
        values
            .iter()
            .zip(self.points.iter())
            .map(|(v, p)| v * p.theta.cos())
            .sum::<f64>()
            * self.d_omega
    }
}
