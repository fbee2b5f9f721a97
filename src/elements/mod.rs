//! Element types for the solid model

pub mod material;
pub mod node;
pub mod tet4;

pub use material::Material;
pub use node::Node;
pub use tet4::Tet4;
