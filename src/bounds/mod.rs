//! Bounding volumes for visibility culling
//!
//! Every containment query answers with a tri-state [`Containment`]
//! bitmask instead of a plain bool, so callers can distinguish "definitely
//! outside", "maybe intersecting", "partially inside", and "entirely
//! inside". The traversal uses the "entirely inside" answer to stop
//! testing a whole subtree.

mod bounding_box;
mod hexahedron;
mod plane;
mod sphere;
mod volume;

pub use bounding_box::BoundingBox;
pub use hexahedron::BoundingHexahedron;
pub use plane::Plane;
pub use sphere::BoundingSphere;
pub use volume::{BoundingVolume, Containment};
