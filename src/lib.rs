/*!
# Cullgraph

Scene-graph cull traversal with frustum and portal culling.

This crate implements the visibility half of a real-time renderer: a
recursive scene-graph traversal that accumulates transforms and render
state, tests bounding volumes against the camera frustum and any active
clip planes, narrows the frustum through portal quads, sequences decal
geometry, and hands the surviving drawables to a downstream handler.

## Architecture

- **bounds**: tri-state bounding volumes (sphere, box, hexahedron)
- **lens**: the projection collaborator (project / extrude)
- **scene**: node graph, geoms, immutable shared render state
- **cull**: the traversal engine, portal clipper, and cull handler sink

GPU command submission, shader and texture management, and window/context
handling are deliberately out of scope; the cull handler trait is the
boundary to the rest of a renderer.
*/

// Internal modules
mod error;
pub mod log;

pub mod bounds;
pub mod cull;
pub mod lens;
pub mod scene;

pub use error::{Error, Result};
pub use bounds::{
    BoundingBox, BoundingHexahedron, BoundingSphere, BoundingVolume, Containment, Plane,
};
pub use cull::{
    CollectingCullHandler, CullConfig, CullHandler, CullPlanes, CullStats, CullTraverser,
    CullableObject, GsgCapabilities, PortalClipper, SceneSetup, TraverserData,
};
pub use lens::{Lens, PerspectiveLens};
pub use scene::{
    DrawMask, Fog, Geom, GeomEntry, Node, NodeEffects, NodeKey, PortalQuad, RenderMode,
    RenderState, SceneGraph, SelectiveVisibility, StateCache,
};

// Re-export math library at crate root
pub use glam;
