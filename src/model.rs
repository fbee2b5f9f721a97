//! Solid model - mesh container and global linear static solver

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::boundary::{BoundaryConditions, NODE_DOF};
use crate::elements::{Material, Node, Tet4};
use crate::error::{SolverError, SolverResult};
use crate::math::{self, Mat, Vec as FEVec, Vec12, Vec3};
use crate::results::{AnalysisSummary, ElementStress, NodeDisplacement, Reaction};

/// Snapshot of the most recent successful solve
#[derive(Debug, Clone)]
struct Solution {
    displacements: FEVec,
    reactions: FEVec,
    element_stresses: Vec<ElementStress>,
    max_von_mises: f64,
    max_stress_element: usize,
}

/// A 3D solid finite element model built from 4-node tetrahedra.
///
/// Nodes and elements are read-only once added; boundary conditions are
/// built incrementally between solves. Every call to [`SolidModel::analysis`]
/// recomputes all matrices and vectors from scratch, so a solve is
/// idempotent for identical inputs. Any mutation invalidates the stored
/// result snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidModel {
    nodes: Vec<Node>,
    elements: Vec<Tet4>,
    boundary: BoundaryConditions,
    #[serde(skip)]
    solution: Option<Solution>,
}

impl SolidModel {
    /// Create a model from an ordered node list.
    ///
    /// Node ids must be contiguous and 1-based.
    pub fn new(nodes: Vec<Node>) -> SolverResult<Self> {
        for (i, node) in nodes.iter().enumerate() {
            if node.id != i + 1 {
                return Err(SolverError::InvalidInput(format!(
                    "node ids must be contiguous and 1-based: expected {}, found {}",
                    i + 1,
                    node.id
                )));
            }
        }
        let node_count = nodes.len();
        Ok(Self {
            nodes,
            elements: Vec::new(),
            boundary: BoundaryConditions::new(node_count),
            solution: None,
        })
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a tetrahedral element referencing 4 existing nodes.
    ///
    /// The element geometry is validated here: a non-positive Jacobian
    /// determinant fails with [`SolverError::InvalidGeometry`].
    pub fn add_element(
        &mut self,
        id: usize,
        node_ids: [usize; 4],
        material: Material,
        gravity: Option<Vec3>,
    ) -> SolverResult<()> {
        if self.elements.iter().any(|e| e.id == id) {
            return Err(SolverError::DuplicateElement(id));
        }
        let element = Tet4::from_nodes(
            id,
            [
                self.node_ref(node_ids[0])?,
                self.node_ref(node_ids[1])?,
                self.node_ref(node_ids[2])?,
                self.node_ref(node_ids[3])?,
            ],
            material,
            gravity,
        )?;
        self.elements.push(element);
        self.solution = None;
        Ok(())
    }

    fn node_ref(&self, node_id: usize) -> SolverResult<&Node> {
        if node_id == 0 || node_id > self.nodes.len() {
            return Err(SolverError::NodeNotFound(node_id));
        }
        Ok(&self.nodes[node_id - 1])
    }

    /// Prescribe the displacement on all three axes of a node
    pub fn set_prescribed_displacement(
        &mut self,
        node_id: usize,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> SolverResult<()> {
        self.boundary
            .set_prescribed_displacement(node_id, dx, dy, dz)?;
        self.solution = None;
        Ok(())
    }

    /// Prescribe (or release) a single dof of a node
    pub fn set_prescribed_dof(
        &mut self,
        node_id: usize,
        component: usize,
        value: Option<f64>,
    ) -> SolverResult<()> {
        self.boundary.set_prescribed_dof(node_id, component, value)?;
        self.solution = None;
        Ok(())
    }

    /// Add a nodal force (accumulates across calls)
    pub fn add_force(&mut self, node_id: usize, fx: f64, fy: f64, fz: f64) -> SolverResult<()> {
        self.boundary.add_force(node_id, fx, fy, fz)?;
        self.solution = None;
        Ok(())
    }

    /// Append a multi-point constraint equation coefficients · u = rhs
    pub fn add_constraint_equation(&mut self, coefficients: &[f64], rhs: f64) -> SolverResult<()> {
        self.boundary.add_constraint_equation(coefficients, rhs)?;
        self.solution = None;
        Ok(())
    }

    /// Nodes in the model
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Elements in the model
    pub fn elements(&self) -> &[Tet4] {
        &self.elements
    }

    /// The boundary conditions
    pub fn boundary(&self) -> &BoundaryConditions {
        &self.boundary
    }

    /// Total number of degrees of freedom
    pub fn dof_count(&self) -> usize {
        self.nodes.len() * NODE_DOF
    }

    // ========================
    // Analysis
    // ========================

    /// Run the linear static analysis.
    ///
    /// Assembles the global stiffness matrix and force vector, applies the
    /// boundary conditions, solves the constrained system, and computes
    /// reactions and element stresses. Recomputes everything from scratch on
    /// every call; on error no partial results are kept.
    pub fn analysis(&mut self) -> SolverResult<()> {
        self.solution = None;

        if self.nodes.is_empty() {
            return Err(SolverError::InvalidInput("model has no nodes".to_string()));
        }
        if self.elements.is_empty() {
            return Err(SolverError::InvalidInput(
                "model has no elements".to_string(),
            ));
        }

        let n_dofs = self.dof_count();
        debug!(
            "assembling {} dofs from {} elements",
            n_dofs,
            self.elements.len()
        );

        let k = self.assemble_stiffness()?;
        let f = self.external_force_vector();

        // A model without a single prescribed dof or constraint equation
        // retains its rigid-body modes and cannot be solved.
        if self.boundary.constrained_dof_count() == 0 && !self.boundary.has_constraints() {
            return Err(SolverError::SingularMatrix);
        }

        let (kc, fc) = self.apply_boundary_conditions(&k, &f);
        let u = self.solve_constrained(&kc, &fc)?;

        // Reactions from the unconstrained system: r = K·u − f
        let reactions = &k * &u - &f;

        let mut element_stresses = Vec::with_capacity(self.elements.len());
        let mut max_von_mises = 0.0_f64;
        // Strict > below: the first element wins a tie, including the
        // all-zero-stress case
        let mut max_stress_element = self.elements[0].id;
        for element in &self.elements {
            let ue = self.gather_element_displacements(element, &u);
            let stress = element.stress(&ue)?;
            if stress.von_mises > max_von_mises {
                max_von_mises = stress.von_mises;
                max_stress_element = element.id;
            }
            element_stresses.push(stress);
        }

        info!(
            "analysis complete: {} dofs, max von Mises {:.6e} in element {}",
            n_dofs, max_von_mises, max_stress_element
        );

        self.solution = Some(Solution {
            displacements: u,
            reactions,
            element_stresses,
            max_von_mises,
            max_stress_element,
        });
        Ok(())
    }

    /// Assemble the global stiffness matrix without boundary conditions.
    ///
    /// Scatter-add of each 12x12 element matrix at the global dof indices
    /// 3·(nodeId−1)+component; element processing order only affects
    /// floating-point summation noise.
    fn assemble_stiffness(&self) -> SolverResult<Mat> {
        let n_dofs = self.dof_count();
        let mut k = Mat::zeros(n_dofs, n_dofs);
        for element in &self.elements {
            let ke = element.stiffness()?;
            for (i, &ni) in element.node_ids.iter().enumerate() {
                let gi = NODE_DOF * (ni - 1);
                for (j, &nj) in element.node_ids.iter().enumerate() {
                    let gj = NODE_DOF * (nj - 1);
                    for a in 0..NODE_DOF {
                        for b in 0..NODE_DOF {
                            k[(gi + a, gj + b)] += ke[(NODE_DOF * i + a, NODE_DOF * j + b)];
                        }
                    }
                }
            }
        }
        Ok(k)
    }

    /// Assembled external force vector: the boundary's accumulated nodal
    /// forces plus every element's equivalent body force.
    pub fn external_force_vector(&self) -> FEVec {
        let mut f = self.boundary.force_vector();
        for element in &self.elements {
            let fe = element.body_force_vector();
            for (i, &nid) in element.node_ids.iter().enumerate() {
                let base = NODE_DOF * (nid - 1);
                for c in 0..NODE_DOF {
                    f[base + c] += fe[NODE_DOF * i + c];
                }
            }
        }
        f
    }

    /// Apply prescribed displacements by elimination with unit pivots.
    ///
    /// The right-hand side correction for every constrained dof uses the
    /// original, unmodified stiffness columns; only afterwards are rows and
    /// columns zeroed. Doing the correction after any zeroing would corrupt
    /// cross terms between two constrained dofs.
    fn apply_boundary_conditions(&self, k: &Mat, f: &FEVec) -> (Mat, FEVec) {
        let mut kc = k.clone();
        let mut fc = f.clone();
        let prescribed = self.boundary.prescribed_displacements();

        for (i, p) in prescribed.iter().enumerate() {
            if let Some(value) = p {
                for r in 0..kc.nrows() {
                    fc[r] -= value * k[(r, i)];
                }
                kc.column_mut(i).fill(0.0);
                kc.row_mut(i).fill(0.0);
                kc[(i, i)] = 1.0;
            }
        }
        for (i, p) in prescribed.iter().enumerate() {
            if let Some(value) = p {
                fc[i] = *value;
            }
        }
        (kc, fc)
    }

    /// Solve the constrained system, appending Lagrange multipliers for any
    /// multi-point constraint equations:
    ///
    /// ```text
    /// [ K_c  Cᵀ ] [u]   [f_c]
    /// [ C    0  ] [λ] = [d]
    /// ```
    fn solve_constrained(&self, kc: &Mat, fc: &FEVec) -> SolverResult<FEVec> {
        if !self.boundary.has_constraints() {
            return math::solve_linear_system(kc, fc).ok_or(SolverError::SingularMatrix);
        }

        let n = fc.len();
        let (c, d) = self.boundary.constraint_system();
        let m = c.nrows();

        let mut a = Mat::zeros(n + m, n + m);
        a.view_mut((0, 0), (n, n)).copy_from(kc);
        a.view_mut((0, n), (n, m)).copy_from(&c.transpose());
        a.view_mut((n, 0), (m, n)).copy_from(&c);

        let mut rhs = FEVec::zeros(n + m);
        rhs.rows_mut(0, n).copy_from(fc);
        rhs.rows_mut(n, m).copy_from(&d);

        let solution =
            math::solve_linear_system(&a, &rhs).ok_or(SolverError::SingularMatrix)?;
        Ok(solution.rows(0, n).into_owned())
    }

    /// Gather the 12-component element displacement vector in element node
    /// order (3 components per node)
    fn gather_element_displacements(&self, element: &Tet4, u: &FEVec) -> Vec12 {
        let mut ue = Vec12::zeros();
        for (i, &nid) in element.node_ids.iter().enumerate() {
            let base = NODE_DOF * (nid - 1);
            for c in 0..NODE_DOF {
                ue[NODE_DOF * i + c] = u[base + c];
            }
        }
        ue
    }

    // ========================
    // Result Access Methods
    // ========================

    fn solution(&self) -> SolverResult<&Solution> {
        self.solution.as_ref().ok_or(SolverError::NotAnalyzed)
    }

    /// Check if the model has been analyzed
    pub fn is_analyzed(&self) -> bool {
        self.solution.is_some()
    }

    /// Full displacement vector (3 entries per node)
    pub fn displacements(&self) -> SolverResult<&FEVec> {
        Ok(&self.solution()?.displacements)
    }

    /// Full reaction-force vector (3 entries per node)
    pub fn reactions(&self) -> SolverResult<&FEVec> {
        Ok(&self.solution()?.reactions)
    }

    /// Displacement at one node
    pub fn node_displacement(&self, node_id: usize) -> SolverResult<NodeDisplacement> {
        let base = self.boundary.dof_index(node_id, 0)?;
        let u = &self.solution()?.displacements;
        Ok(NodeDisplacement::from_array([
            u[base],
            u[base + 1],
            u[base + 2],
        ]))
    }

    /// Reaction forces at one node
    pub fn node_reaction(&self, node_id: usize) -> SolverResult<Reaction> {
        let base = self.boundary.dof_index(node_id, 0)?;
        let r = &self.solution()?.reactions;
        Ok(Reaction::from_array([r[base], r[base + 1], r[base + 2]]))
    }

    /// Stresses for all elements, in element insertion order
    pub fn element_stresses(&self) -> SolverResult<&[ElementStress]> {
        Ok(&self.solution()?.element_stresses)
    }

    /// Stress for one element
    pub fn element_stress(&self, element_id: usize) -> SolverResult<&ElementStress> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == element_id)
            .ok_or(SolverError::ElementNotFound(element_id))?;
        Ok(&self.solution()?.element_stresses[index])
    }

    /// Maximum von Mises stress and its owning element id
    pub fn max_von_mises(&self) -> SolverResult<(f64, usize)> {
        let solution = self.solution()?;
        Ok((solution.max_von_mises, solution.max_stress_element))
    }

    /// Summary of the analysis results.
    ///
    /// Maxima are located by strict comparison, so on ties (including an
    /// all-zero solution) the lowest node or element id is reported.
    pub fn summary(&self) -> SolverResult<AnalysisSummary> {
        let solution = self.solution()?;

        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.len(),
            total_dofs: self.dof_count(),
            constrained_dofs: self.boundary.constrained_dof_count(),
            max_von_mises: solution.max_von_mises,
            max_stress_element: solution.max_stress_element,
            max_disp_node: 1,
            max_reaction_node: 1,
            ..Default::default()
        };

        for node in &self.nodes {
            let base = NODE_DOF * (node.id - 1);
            let u = &solution.displacements;
            let disp =
                (u[base].powi(2) + u[base + 1].powi(2) + u[base + 2].powi(2)).sqrt();
            if disp > summary.max_displacement {
                summary.max_displacement = disp;
                summary.max_disp_node = node.id;
            }

            let r = &solution.reactions;
            let reaction =
                (r[base].powi(2) + r[base + 1].powi(2) + r[base + 2].powi(2)).sqrt();
            if reaction > summary.max_reaction {
                summary.max_reaction = reaction;
                summary.max_reaction_node = node.id;
            }
        }

        Ok(summary)
    }

    // ========================
    // Serialization
    // ========================

    /// Serialize the model (without results) to JSON
    pub fn to_json(&self) -> SolverResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a model from JSON.
    ///
    /// Element geometry is re-validated: serialized input bypasses the
    /// [`Tet4::from_nodes`] factory, so an inverted element would otherwise
    /// slip through and produce a sign-flipped stiffness.
    pub fn from_json(json: &str) -> SolverResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        for element in &model.elements {
            element.validate_geometry()?;
        }
        Ok(model)
    }
}
