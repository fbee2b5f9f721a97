//! 4-node tetrahedral element (constant strain, single-point integration)
//!
//! The Tet4 is the simplest 3D solid element: 4 corner nodes, 3 translational
//! DOFs per node, constant strain and stress over the element. One Gauss
//! point at the centroid integrates the linear shape functions exactly, so no
//! higher-order quadrature is needed.

use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

use crate::elements::{Material, Node};
use crate::error::{SolverError, SolverResult};
use crate::math::{BMat, Mat12, Mat3, NMat, Vec12, Vec3};
use crate::results::ElementStress;

/// Single-point Gauss weight for the unit tetrahedron
const GAUSS_WEIGHT: f64 = 1.0 / 6.0;
/// Integration point location in reference (a, b, c) coordinates
const GAUSS_POINT: f64 = 0.25;

/// A 4-node tetrahedral solid element.
///
/// Nodes are expected in an order giving a positive Jacobian determinant;
/// construction fails otherwise. Nodal coordinates are captured at
/// construction time and read-only for the life of the element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tet4 {
    /// Element id
    pub id: usize,
    /// 1-based ids of the 4 corner nodes, in element order
    pub node_ids: [usize; 4],
    coords: [Vec3; 4],
    /// Material attached to this element
    pub material: Material,
    /// Gravity acceleration vector, if body forces apply
    pub gravity: Option<Vec3>,
}

impl Tet4 {
    /// Create an element from 4 node references.
    ///
    /// Fails with [`SolverError::InvalidGeometry`] when the Jacobian
    /// determinant derived from the node order is not strictly positive
    /// (degenerate or inverted tetrahedron).
    pub fn from_nodes(
        id: usize,
        nodes: [&Node; 4],
        material: Material,
        gravity: Option<Vec3>,
    ) -> SolverResult<Self> {
        let elem = Self {
            id,
            node_ids: nodes.map(|n| n.id),
            coords: nodes.map(|n| n.position()),
            material,
            gravity,
        };
        elem.validate_geometry()?;
        Ok(elem)
    }

    /// Check the positive-Jacobian invariant.
    ///
    /// `from_nodes` runs this at construction; it must be re-run on any
    /// element that did not pass through the factory, e.g. one restored
    /// from serialized form.
    pub fn validate_geometry(&self) -> SolverResult<()> {
        let det_j = self.jacobian().determinant();
        if !det_j.is_finite() || det_j <= 0.0 {
            return Err(SolverError::InvalidGeometry {
                element: self.id,
                det_j,
            });
        }
        Ok(())
    }

    /// Jacobian of the map from reference (a, b, c) to physical coordinates.
    ///
    /// Rows are the edge vectors from node 0 to nodes 1, 2 and 3.
    pub fn jacobian(&self) -> Mat3 {
        let e1 = self.coords[1] - self.coords[0];
        let e2 = self.coords[2] - self.coords[0];
        let e3 = self.coords[3] - self.coords[0];
        Mat3::new(
            e1.x, e1.y, e1.z, //
            e2.x, e2.y, e2.z, //
            e3.x, e3.y, e3.z,
        )
    }

    /// Element volume, det(J) / 6
    pub fn volume(&self) -> f64 {
        self.jacobian().determinant() / 6.0
    }

    /// Strain-displacement matrix B (6x12) with strain ordering
    /// [εxx, εyy, εzz, γxy, γyz, γzx].
    ///
    /// The constant reference derivatives of the linear shape functions are
    /// mapped to physical derivatives by solving J · dN/dxyz = dN/dabc
    /// rather than forming an explicit inverse.
    pub fn b_matrix(&self) -> SolverResult<BMat> {
        #[rustfmt::skip]
        let dn_dabc = SMatrix::<f64, 3, 4>::from_row_slice(&[
            -1.0, 1.0, 0.0, 0.0,
            -1.0, 0.0, 1.0, 0.0,
            -1.0, 0.0, 0.0, 1.0,
        ]);

        let j = self.jacobian();
        let dn_dxyz = j
            .lu()
            .solve(&dn_dabc)
            .ok_or(SolverError::InvalidGeometry {
                element: self.id,
                det_j: j.determinant(),
            })?;

        let mut b = BMat::zeros();
        for i in 0..4 {
            let (dx, dy, dz) = (dn_dxyz[(0, i)], dn_dxyz[(1, i)], dn_dxyz[(2, i)]);
            let c = 3 * i;
            b[(0, c)] = dx;
            b[(1, c + 1)] = dy;
            b[(2, c + 2)] = dz;
            b[(3, c)] = dy;
            b[(3, c + 1)] = dx;
            b[(4, c + 1)] = dz;
            b[(4, c + 2)] = dy;
            b[(5, c)] = dz;
            b[(5, c + 2)] = dx;
        }
        Ok(b)
    }

    /// Element stiffness matrix Ke = w · Bᵀ · D · B · det(J), w = 1/6.
    ///
    /// Exact for the constant-strain tetrahedron.
    pub fn stiffness(&self) -> SolverResult<Mat12> {
        let det_j = self.jacobian().determinant();
        let b = self.b_matrix()?;
        let d = self.material.constitutive_matrix();
        Ok(b.transpose() * d * b * (GAUSS_WEIGHT * det_j))
    }

    /// Equivalent nodal force vector for the gravity body force.
    ///
    /// Zero when no gravity vector is set. Surface tractions are not
    /// supported by this element; such loads must arrive as pre-distributed
    /// nodal forces.
    pub fn body_force_vector(&self) -> Vec12 {
        let Some(g) = self.gravity else {
            return Vec12::zeros();
        };

        let det_j = self.jacobian().determinant();
        let b = self.material.rho * g;

        // Shape values at the centroid: N1 = 1 - a - b - c, N2 = a, N3 = b,
        // N4 = c, all equal to 1/4 at (1/4, 1/4, 1/4).
        let n1 = 1.0 - 3.0 * GAUSS_POINT;
        let mut n = NMat::zeros();
        for (i, value) in [n1, GAUSS_POINT, GAUSS_POINT, GAUSS_POINT]
            .iter()
            .enumerate()
        {
            for c in 0..3 {
                n[(c, 3 * i + c)] = *value;
            }
        }
        n.transpose() * b * (GAUSS_WEIGHT * det_j)
    }

    /// Recover the element stress from the 12-component element displacement
    /// vector (3 per node, in element node order): ε = B·u, σ = D·ε, plus the
    /// von Mises equivalent stress.
    pub fn stress(&self, u: &Vec12) -> SolverResult<ElementStress> {
        let b = self.b_matrix()?;
        let d = self.material.constitutive_matrix();
        let strain = b * u;
        let sigma = d * strain;
        Ok(ElementStress::from_vector(self.id, &sigma))
    }
}
