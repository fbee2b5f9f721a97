//! Isotropic material properties and the stress-strain relation

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::math::Mat6;

/// Isotropic linear-elastic material attached to every element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density in kg/m³
    pub rho: f64,
}

impl Material {
    /// Create a new material, validating the parameter ranges.
    ///
    /// Requires `e > 0`, `-1 < nu < 0.5` and `rho >= 0`. A Poisson ratio of
    /// 0.5 makes the constitutive matrix singular and is rejected here.
    pub fn new(e: f64, nu: f64, rho: f64) -> SolverResult<Self> {
        if !e.is_finite() || e <= 0.0 {
            return Err(SolverError::InvalidMaterial(format!(
                "Young's modulus must be positive, got {e}"
            )));
        }
        if !nu.is_finite() || nu <= -1.0 || nu >= 0.5 {
            return Err(SolverError::InvalidMaterial(format!(
                "Poisson's ratio must lie in (-1, 0.5), got {nu}"
            )));
        }
        if !rho.is_finite() || rho < 0.0 {
            return Err(SolverError::InvalidMaterial(format!(
                "density must be non-negative, got {rho}"
            )));
        }
        Ok(Self { e, nu, rho })
    }

    /// Structural steel (S235/A36 class)
    pub fn steel() -> Self {
        Self {
            e: 200e9,
            nu: 0.3,
            rho: 7850.0,
        }
    }

    /// Aluminum 6061-T6
    pub fn aluminum() -> Self {
        Self {
            e: 68.9e9,
            nu: 0.33,
            rho: 2700.0,
        }
    }

    /// Shear modulus G = E / (2 * (1 + nu))
    pub fn shear_modulus(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Build the 6x6 isotropic constitutive matrix D relating strain
    /// [εxx, εyy, εzz, γxy, γyz, γzx] to stress [σxx, σyy, σzz, τxy, τyz, τzx].
    pub fn constitutive_matrix(&self) -> Mat6 {
        let factor = self.e / ((1.0 + self.nu) * (1.0 - 2.0 * self.nu));
        let diag = factor * (1.0 - self.nu);
        let off = factor * self.nu;
        let shear = factor * 0.5 * (1.0 - 2.0 * self.nu);

        let mut d = Mat6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                d[(i, j)] = if i == j { diag } else { off };
            }
            d[(i + 3, i + 3)] = shear;
        }
        d
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
