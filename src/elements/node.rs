//! Node - a point in 3D space with an integer identity

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// A 3D node in the finite element mesh.
///
/// Node ids are 1-based and must be contiguous within a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Node {
    /// 1-based node id
    pub id: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(id: usize, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Get the position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.position() - other.position()).norm()
    }
}
