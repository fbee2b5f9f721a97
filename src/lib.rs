//! Solid Solver - A native Rust finite element library for 3D solids
//!
//! This library computes the static linear-elastic response of a solid
//! discretized into 4-node tetrahedra:
//! - Nodal displacements and reaction forces
//! - Per-element stresses and von Mises equivalent stress
//! - Prescribed displacements, accumulated nodal forces, gravity body forces
//! - Multi-point constraint equations via Lagrange multipliers
//!
//! ## Example
//! ```rust
//! use solid_solver::prelude::*;
//!
//! // A single tetrahedron
//! let nodes = vec![
//!     Node::new(1, 0.0, 0.0, 0.0),
//!     Node::new(2, 1.0, 0.0, 0.0),
//!     Node::new(3, 0.0, 1.0, 0.0),
//!     Node::new(4, 0.0, 0.0, 1.0),
//! ];
//! let mut model = SolidModel::new(nodes).unwrap();
//!
//! // Attach a material and build the element
//! let steel = Material::new(210e9, 0.3, 7850.0).unwrap();
//! model.add_element(1, [1, 2, 3, 4], steel, None).unwrap();
//!
//! // Fix the base triangle, load the apex
//! model.set_prescribed_displacement(1, 0.0, 0.0, 0.0).unwrap();
//! model.set_prescribed_displacement(2, 0.0, 0.0, 0.0).unwrap();
//! model.set_prescribed_displacement(3, 0.0, 0.0, 0.0).unwrap();
//! model.add_force(4, 0.0, 0.0, 1000.0).unwrap();
//!
//! // Analyze
//! model.analysis().unwrap();
//!
//! // Get results
//! let disp = model.node_displacement(4).unwrap();
//! assert!(disp.dz > 0.0);
//! let (max_vm, element_id) = model.max_von_mises().unwrap();
//! assert!(max_vm > 0.0 && element_id == 1);
//! ```

pub mod boundary;
pub mod elements;
pub mod error;
pub mod math;
pub mod model;
pub mod report;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::boundary::{BoundaryConditions, ConstraintEquation, NODE_DOF};
    pub use crate::elements::{Material, Node, Tet4};
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::math::Vec3;
    pub use crate::model::SolidModel;
    pub use crate::report::write_report;
    pub use crate::results::{AnalysisSummary, ElementStress, NodeDisplacement, Reaction};
}
