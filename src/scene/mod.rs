//! Scene-graph collaborators for the cull traversal
//!
//! The graph is a slotmap of nodes; parents hold child keys. Render state
//! values are immutable and `Arc`-shared; composing two states builds a
//! new shared value rather than mutating either input.

mod geom;
mod node;
mod render_state;
mod scene_graph;

pub use geom::Geom;
pub use node::{
    CullCallback, DrawMask, GeomEntry, Node, NodeEffects, NodeKey, PortalQuad,
    SelectiveVisibility,
};
pub use render_state::{Fog, RenderMode, RenderState, StateCache};
pub use scene_graph::SceneGraph;
