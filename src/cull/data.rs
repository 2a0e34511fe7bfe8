/// TraverserData — one frame of the cull recursion.
///
/// Each recursion level gets its own value: the node under consideration
/// plus the transform, state, view frustum, and cull planes accumulated
/// from the root. Cloning is cheap; the heavy parts are `Arc`-shared.
///
/// Spaces: a node's bounds live in its parent's coordinate space, so
/// `view_frustum` and `cull_planes` are kept in that same space when
/// `is_in_view` runs, and move into the node's local space afterward via
/// `apply_transform_and_state`.

use std::sync::Arc;

use crate::bounds::BoundingHexahedron;
use crate::scene::{DrawMask, Node, NodeKey, RenderState, StateCache};

use super::planes::CullPlanes;

#[derive(Clone)]
pub struct TraverserData {
    /// Key of the node this frame is about to process.
    pub node: NodeKey,

    /// Accumulated node-to-world transform (the node's parent space).
    pub net_transform: glam::Mat4,

    /// Accumulated render state.
    pub state: Arc<RenderState>,

    /// View frustum in the node's parent space. `None` once an ancestor
    /// tested fully inside; nothing below needs another frustum test.
    pub view_frustum: Option<Arc<BoundingHexahedron>>,

    /// Active ad hoc clip planes, in the node's parent space.
    pub cull_planes: Arc<CullPlanes>,
}

impl TraverserData {
    pub fn new(
        node: NodeKey,
        net_transform: glam::Mat4,
        state: Arc<RenderState>,
        view_frustum: Option<Arc<BoundingHexahedron>>,
        cull_planes: Arc<CullPlanes>,
    ) -> Self {
        Self {
            node,
            net_transform,
            state,
            view_frustum,
            cull_planes,
        }
    }

    /// The same accumulated values, aimed at a child node.
    pub fn for_child(&self, child: NodeKey) -> TraverserData {
        let mut data = self.clone();
        data.node = child;
        data
    }

    /// Visibility test for the node's bounds against the camera mask, the
    /// accumulated frustum, and the cull planes.
    ///
    /// A fully-inside answer drops the frustum (or the planes) for the
    /// rest of this subtree, so descendants skip those tests entirely.
    pub fn is_in_view(&mut self, node: &Node, camera_mask: DrawMask) -> bool {
        if !node.draw_mask().intersects(camera_mask) {
            return false;
        }
        if let Some(frustum) = &self.view_frustum {
            let result = frustum.contains_volume(node.bounds());
            if result.is_no_intersection() {
                return false;
            }
            if result.is_all() {
                self.view_frustum = None;
            }
        }
        if !self.cull_planes.is_empty() {
            let result = self.cull_planes.do_cull(node.bounds());
            if result.is_no_intersection() {
                return false;
            }
            if result.is_all() {
                self.cull_planes = CullPlanes::empty();
            }
        }
        true
    }

    /// Fold the node's transform and state into the accumulated values,
    /// and move the frustum and cull planes into the node's local space.
    /// `tag_state` is the camera's per-tag override, composed after the
    /// node's own state.
    pub(crate) fn apply_transform_and_state(
        &mut self,
        node: &Node,
        tag_state: Option<&Arc<RenderState>>,
        cache: &mut StateCache,
    ) {
        if let Some(local) = node.transform() {
            self.net_transform *= *local;
            let inverse = local.inverse();
            if let Some(frustum) = self.view_frustum.take() {
                self.view_frustum = Some(Arc::new(frustum.xform(&inverse)));
            }
            if !self.cull_planes.is_empty() {
                self.cull_planes = self.cull_planes.xform(&inverse);
            }
        }
        if let Some(delta) = node.state() {
            self.state = RenderState::compose(&self.state, delta, cache);
        }
        if let Some(tag_state) = tag_state {
            self.state = RenderState::compose(&self.state, tag_state, cache);
        }
        if !node.clip_planes().is_empty() {
            self.cull_planes = self.cull_planes.extended(node.clip_planes());
        }
    }
}
