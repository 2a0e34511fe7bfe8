/// Geom — a drawable chunk of geometry with its own bounding volume.
///
/// The traversal never looks at the vertices; it only consults the bounds
/// and forwards the geom to the cull handler. Vertices are carried so a
/// downstream renderer (or the bounds visualizer) has something to draw.

use glam::Vec3;

use crate::bounds::{BoundingSphere, BoundingVolume};

#[derive(Debug, Clone)]
pub struct Geom {
    vertices: Vec<Vec3>,
    bounds: BoundingVolume,
}

impl Geom {
    /// Create a geom with explicit bounds, in the owning node's local space.
    pub fn new(vertices: Vec<Vec3>, bounds: BoundingVolume) -> Self {
        Self { vertices, bounds }
    }

    /// Create a geom with a bounding sphere fitted around its vertices.
    /// No vertices yields empty bounds.
    pub fn with_fitted_bounds(vertices: Vec<Vec3>) -> Self {
        let bounds = BoundingSphere::around_points(&vertices)
            .map(BoundingVolume::Sphere)
            .unwrap_or(BoundingVolume::Empty);
        Self { vertices, bounds }
    }

    // ===== GETTERS =====

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
