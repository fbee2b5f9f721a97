//! Error types for the solid solver

use thiserror::Error;

/// Main error type for solver operations
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Element {0} not found in model")]
    ElementNotFound(usize),

    #[error("Duplicate element id {0} already exists")]
    DuplicateElement(usize),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Element {element} has non-positive Jacobian determinant ({det_j:e}) - degenerate or inverted tetrahedron")]
    InvalidGeometry { element: usize, det_j: f64 },

    #[error("Singular stiffness matrix - model may be under-constrained or disconnected")]
    SingularMatrix,

    #[error("Model not analyzed - run analysis() first")]
    NotAnalyzed,

    #[error("Size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
