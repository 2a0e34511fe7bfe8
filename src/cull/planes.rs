/// CullPlanes — ad hoc half-space clip planes active during a traversal.
///
/// Immutable and `Arc`-shared down the recursion, like render state:
/// entering a node with clip planes builds a new extended set rather than
/// mutating the parent's. Planes are outward-facing; a volume fully in
/// front of any plane is rejected.

use std::sync::Arc;

use glam::Mat4;

use crate::bounds::{BoundingVolume, Containment, Plane};

#[derive(Debug, Default)]
pub struct CullPlanes {
    planes: Vec<Plane>,
}

impl CullPlanes {
    /// The empty set, shared as the traversal's starting point.
    pub fn empty() -> Arc<CullPlanes> {
        Arc::new(CullPlanes::default())
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// New set with additional planes appended.
    pub fn extended(&self, more: &[Plane]) -> Arc<CullPlanes> {
        let mut planes = self.planes.clone();
        planes.extend_from_slice(more);
        Arc::new(CullPlanes { planes })
    }

    /// New set with every plane moved into another coordinate frame.
    pub fn xform(&self, mat: &Mat4) -> Arc<CullPlanes> {
        Arc::new(CullPlanes {
            planes: self.planes.iter().map(|p| p.xform(mat)).collect(),
        })
    }

    /// Test a volume against every plane. Any single plane that fully
    /// excludes the volume rejects it; the ALL bit survives only when the
    /// volume is fully behind every plane.
    pub fn do_cull(&self, volume: &BoundingVolume) -> Containment {
        let mut result = Containment::FULL;
        for plane in &self.planes {
            let c = volume.classify_plane(plane);
            if c.is_no_intersection() {
                return Containment::NO_INTERSECTION;
            }
            result &= c;
        }
        result
    }
}

#[cfg(test)]
#[path = "planes_tests.rs"]
mod tests;
