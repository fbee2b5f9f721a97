//! Mathematical utilities and type aliases for the solid solver

use nalgebra::{DMatrix, DVector, Matrix3, Matrix6, SMatrix, SVector, Vector3, Vector6};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

/// 12x12 matrix for tetrahedral element stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for element displacements/forces
pub type Vec12 = SVector<f64, 12>;
/// 6x12 strain-displacement matrix
pub type BMat = SMatrix<f64, 6, 12>;
/// 3x12 shape function matrix
pub type NMat = SMatrix<f64, 3, 12>;

/// Solve the dense linear system K * x = f via LU decomposition.
///
/// Returns `None` when the factorization fails or the solution contains
/// non-finite values.
pub fn solve_linear_system(k: &Mat, f: &Vec) -> Option<Vec> {
    let lu = k.clone().lu();
    let x = lu.solve(f)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
