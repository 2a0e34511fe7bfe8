/// Scene-graph node.
///
/// A node is "plain" when it carries nothing the traversal has to look
/// at: no local transform, no state delta, no effects, no tags, default
/// draw mask, no portal, no callback, no clip planes. The traverser
/// passes plain nodes straight through to their children without
/// composing anything.

use std::sync::Arc;

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::new_key_type;

use crate::bounds::{BoundingVolume, Plane};

use super::geom::Geom;
use super::render_state::RenderState;

new_key_type! {
    /// Stable key for a node within a [`SceneGraph`](super::SceneGraph).
    pub struct NodeKey;
}

/// Per-camera visibility bitmask. A node is visible to a camera when the
/// two masks share at least one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawMask(pub u32);

impl DrawMask {
    pub const ALL: DrawMask = DrawMask(u32::MAX);
    pub const NONE: DrawMask = DrawMask(0);

    /// Mask with a single bit set.
    pub fn bit(i: u32) -> DrawMask {
        debug_assert!(i < 32, "draw mask bit out of range");
        DrawMask(1 << i)
    }

    pub fn intersects(self, other: DrawMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for DrawMask {
    fn default() -> Self {
        DrawMask::ALL
    }
}

bitflags! {
    /// Render effects that alter how the traversal handles a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeEffects: u32 {
        /// Geometry below this node renders flush on top of the node's
        /// own geometry, immediately after it.
        const DECAL = 1 << 0;
        /// Emit a wireframe visualization of the node's bounding volume.
        const SHOW_BOUNDS = 1 << 1;
    }
}

/// A planar doorway into another scene cell. When portal culling is on,
/// crossing it narrows the view frustum for everything in the destination
/// cell. Vertices are in the portal node's local space, wound
/// counter-clockwise as seen from the side the camera approaches.
#[derive(Debug, Clone)]
pub struct PortalQuad {
    pub vertices: [Vec3; 4],
    pub cell: NodeKey,
}

/// LOD-style child selection. When present, the traversal iterates
/// visible children through the first/next protocol instead of a plain
/// 0..n loop.
#[derive(Debug, Clone, Default)]
pub struct SelectiveVisibility {
    visible: Vec<usize>,
}

impl SelectiveVisibility {
    pub fn new(mut visible: Vec<usize>) -> Self {
        visible.sort_unstable();
        visible.dedup();
        Self { visible }
    }

    /// Index of the first visible child, or `num_children` when none is.
    pub fn first_visible_child(&self, num_children: usize) -> usize {
        match self.visible.first() {
            Some(&i) if i < num_children => i,
            _ => num_children,
        }
    }

    /// Index of the next visible child after `index`, or `num_children`.
    pub fn next_visible_child(&self, index: usize, num_children: usize) -> usize {
        for &i in &self.visible {
            if i > index {
                return if i < num_children { i } else { num_children };
            }
        }
        num_children
    }
}

/// Node-level cull callback. Receives the node's net transform and
/// composed state; returning false aborts processing of the node and its
/// subtree for this pass.
pub type CullCallback = Arc<dyn Fn(&Mat4, &Arc<RenderState>) -> bool + Send + Sync>;

/// A geom plus its per-geom state delta within a node.
#[derive(Clone)]
pub struct GeomEntry {
    pub geom: Arc<Geom>,
    pub state: Arc<RenderState>,
}

pub struct Node {
    name: String,
    children: Vec<NodeKey>,
    transform: Option<Mat4>,
    state: Option<Arc<RenderState>>,
    effects: NodeEffects,
    bounds: BoundingVolume,
    draw_mask: DrawMask,
    tags: FxHashMap<String, String>,
    geoms: Vec<GeomEntry>,
    selective: Option<SelectiveVisibility>,
    portal: Option<PortalQuad>,
    cull_callback: Option<CullCallback>,
    clip_planes: Vec<Plane>,
}

impl Node {
    /// Create a plain node. Bounds default to infinite (never pruned)
    /// until the caller sets something tighter.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            transform: None,
            state: None,
            effects: NodeEffects::empty(),
            bounds: BoundingVolume::Infinite,
            draw_mask: DrawMask::ALL,
            tags: FxHashMap::default(),
            geoms: Vec::new(),
            selective: None,
            portal: None,
            cull_callback: None,
            clip_planes: Vec::new(),
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Local transform relative to the parent. `None` means identity.
    pub fn transform(&self) -> Option<&Mat4> {
        self.transform.as_ref()
    }

    /// Render state delta applied at this node.
    pub fn state(&self) -> Option<&Arc<RenderState>> {
        self.state.as_ref()
    }

    pub fn effects(&self) -> NodeEffects {
        self.effects
    }

    /// Bounding volume in the parent's coordinate space.
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    pub fn draw_mask(&self) -> DrawMask {
        self.draw_mask
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn geoms(&self) -> &[GeomEntry] {
        &self.geoms
    }

    pub fn selective_visibility(&self) -> Option<&SelectiveVisibility> {
        self.selective.as_ref()
    }

    pub fn portal(&self) -> Option<&PortalQuad> {
        self.portal.as_ref()
    }

    pub fn cull_callback(&self) -> Option<&CullCallback> {
        self.cull_callback.as_ref()
    }

    /// Ad hoc clip planes introduced at this node, in its local space,
    /// outward-facing.
    pub fn clip_planes(&self) -> &[Plane] {
        &self.clip_planes
    }

    /// True when the traversal can pass this node through unchanged.
    pub(crate) fn is_plain(&self) -> bool {
        self.transform.is_none()
            && self.state.is_none()
            && self.effects.is_empty()
            && self.tags.is_empty()
            && self.portal.is_none()
            && self.cull_callback.is_none()
            && self.clip_planes.is_empty()
    }

    // ===== SETTERS =====

    pub fn set_transform(&mut self, transform: Option<Mat4>) {
        self.transform = transform;
    }

    pub fn set_state(&mut self, state: Option<Arc<RenderState>>) {
        self.state = state;
    }

    pub fn set_effects(&mut self, effects: NodeEffects) {
        self.effects = effects;
    }

    pub fn set_bounds(&mut self, bounds: BoundingVolume) {
        self.bounds = bounds;
    }

    pub fn set_draw_mask(&mut self, mask: DrawMask) {
        self.draw_mask = mask;
    }

    pub fn set_tag(&mut self, key: &str, value: &str) {
        self.tags.insert(key.to_string(), value.to_string());
    }

    pub fn add_geom(&mut self, geom: Arc<Geom>, state: Arc<RenderState>) {
        self.geoms.push(GeomEntry { geom, state });
    }

    pub fn set_selective_visibility(&mut self, selective: Option<SelectiveVisibility>) {
        self.selective = selective;
    }

    pub fn set_portal(&mut self, portal: Option<PortalQuad>) {
        self.portal = portal;
    }

    pub fn set_cull_callback(&mut self, callback: Option<CullCallback>) {
        self.cull_callback = callback;
    }

    pub fn add_clip_plane(&mut self, plane: Plane) {
        self.clip_planes.push(plane);
    }

    pub(crate) fn add_child_key(&mut self, child: NodeKey) {
        self.children.push(child);
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
