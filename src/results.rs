//! Result types for the solid solver

use serde::{Deserialize, Serialize};

use crate::math::Vec6;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
        }
    }

    /// Displacement magnitude
    pub fn magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Reaction forces at a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
}

impl Reaction {
    /// Create from array [FX, FY, FZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
        }
    }

    /// Force magnitude
    pub fn magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Stress state of one tetrahedral element (constant over the element)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementStress {
    /// Owning element id
    pub element: usize,
    /// Normal stress in X
    pub sxx: f64,
    /// Normal stress in Y
    pub syy: f64,
    /// Normal stress in Z
    pub szz: f64,
    /// Shear stress XY
    pub txy: f64,
    /// Shear stress YZ
    pub tyz: f64,
    /// Shear stress ZX
    pub tzx: f64,
    /// Von Mises equivalent stress
    pub von_mises: f64,
}

impl ElementStress {
    /// Create from stress components, computing the von Mises stress
    pub fn from_components(
        element: usize,
        sxx: f64,
        syy: f64,
        szz: f64,
        txy: f64,
        tyz: f64,
        tzx: f64,
    ) -> Self {
        let von_mises = (0.5
            * ((sxx - syy).powi(2) + (syy - szz).powi(2) + (szz - sxx).powi(2))
            + 3.0 * (txy.powi(2) + tyz.powi(2) + tzx.powi(2)))
        .sqrt();
        Self {
            element,
            sxx,
            syy,
            szz,
            txy,
            tyz,
            tzx,
            von_mises,
        }
    }

    /// Create from a stress vector [σxx, σyy, σzz, τxy, τyz, τzx]
    pub fn from_vector(element: usize, s: &Vec6) -> Self {
        Self::from_components(element, s[0], s[1], s[2], s[3], s[4], s[5])
    }

    /// Stress components as an array [σxx, σyy, σzz, τxy, τyz, τzx]
    pub fn as_array(&self) -> [f64; 6] {
        [self.sxx, self.syy, self.szz, self.txy, self.tyz, self.tzx]
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total degrees of freedom
    pub total_dofs: usize,
    /// Degrees of freedom with a prescribed displacement
    pub constrained_dofs: usize,
    /// Maximum displacement magnitude
    pub max_displacement: f64,
    /// Node with maximum displacement
    pub max_disp_node: usize,
    /// Maximum reaction magnitude
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: usize,
    /// Maximum von Mises stress
    pub max_von_mises: f64,
    /// Element with maximum von Mises stress
    pub max_stress_element: usize,
}
