//! Boundary conditions: prescribed displacements, nodal forces and
//! multi-point constraint equations

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::math::{Mat, Vec as FEVec};

/// Translational degrees of freedom per node
pub const NODE_DOF: usize = 3;

/// One linear multi-point constraint row: coefficients · u = rhs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintEquation {
    /// One coefficient per global dof (length 3 * node count)
    pub coefficients: Vec<f64>,
    /// Right-hand side of the constraint
    pub rhs: f64,
}

/// Boundary conditions for a model with a fixed node count.
///
/// Storage is per-dof: a prescribed displacement may be set on any subset of
/// a node's three axes, even though the common call pattern prescribes all
/// three together. Forces accumulate across calls; constraint equations
/// append to a growing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConditions {
    node_count: usize,
    prescribed: Vec<Option<f64>>,
    forces: Vec<f64>,
    constraints: Vec<ConstraintEquation>,
}

impl BoundaryConditions {
    /// Create empty boundary conditions for `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            prescribed: vec![None; node_count * NODE_DOF],
            forces: vec![0.0; node_count * NODE_DOF],
            constraints: Vec::new(),
        }
    }

    /// Number of nodes this boundary is sized for
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Total number of degrees of freedom
    pub fn dof_count(&self) -> usize {
        self.node_count * NODE_DOF
    }

    /// Global dof index for a 1-based node id and component (0 = x, 1 = y, 2 = z)
    pub fn dof_index(&self, node_id: usize, component: usize) -> SolverResult<usize> {
        if node_id == 0 || node_id > self.node_count {
            return Err(SolverError::NodeNotFound(node_id));
        }
        if component >= NODE_DOF {
            return Err(SolverError::InvalidInput(format!(
                "dof component must be 0..3, got {component}"
            )));
        }
        Ok(NODE_DOF * (node_id - 1) + component)
    }

    /// Prescribe the displacement on all three axes of a node, overwriting
    /// any previous values.
    pub fn set_prescribed_displacement(
        &mut self,
        node_id: usize,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> SolverResult<()> {
        let base = self.dof_index(node_id, 0)?;
        self.prescribed[base] = Some(dx);
        self.prescribed[base + 1] = Some(dy);
        self.prescribed[base + 2] = Some(dz);
        Ok(())
    }

    /// Prescribe (or release, with `None`) a single dof of a node
    pub fn set_prescribed_dof(
        &mut self,
        node_id: usize,
        component: usize,
        value: Option<f64>,
    ) -> SolverResult<()> {
        let idx = self.dof_index(node_id, component)?;
        self.prescribed[idx] = value;
        Ok(())
    }

    /// Add a nodal force. Repeated calls for the same node accumulate.
    pub fn add_force(&mut self, node_id: usize, fx: f64, fy: f64, fz: f64) -> SolverResult<()> {
        let base = self.dof_index(node_id, 0)?;
        self.forces[base] += fx;
        self.forces[base + 1] += fy;
        self.forces[base + 2] += fz;
        Ok(())
    }

    /// Append one multi-point constraint equation coefficients · u = rhs.
    ///
    /// The coefficient slice must cover every global dof.
    pub fn add_constraint_equation(&mut self, coefficients: &[f64], rhs: f64) -> SolverResult<()> {
        if coefficients.len() != self.dof_count() {
            return Err(SolverError::SizeMismatch {
                expected: self.dof_count(),
                found: coefficients.len(),
            });
        }
        self.constraints.push(ConstraintEquation {
            coefficients: coefficients.to_vec(),
            rhs,
        });
        Ok(())
    }

    /// Per-dof prescribed displacements (`None` = free)
    pub fn prescribed_displacements(&self) -> &[Option<f64>] {
        &self.prescribed
    }

    /// Accumulated nodal force vector
    pub fn force_vector(&self) -> FEVec {
        FEVec::from_column_slice(&self.forces)
    }

    /// Constraint matrix C and right-hand side d with one row per equation
    pub fn constraint_system(&self) -> (Mat, FEVec) {
        let m = self.constraints.len();
        let n = self.dof_count();
        let mut c = Mat::zeros(m, n);
        let mut d = FEVec::zeros(m);
        for (row, eq) in self.constraints.iter().enumerate() {
            for (col, &coeff) in eq.coefficients.iter().enumerate() {
                c[(row, col)] = coeff;
            }
            d[row] = eq.rhs;
        }
        (c, d)
    }

    /// Whether any multi-point constraint rows have been added
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// The stored constraint equations
    pub fn constraints(&self) -> &[ConstraintEquation] {
        &self.constraints
    }

    /// Number of dofs with a prescribed displacement
    pub fn constrained_dof_count(&self) -> usize {
        self.prescribed.iter().filter(|p| p.is_some()).count()
    }
}
