/// CullTraverser — recursive scene-graph cull traversal.
///
/// One pass walks the graph depth-first, accumulating transforms, render
/// state, the view frustum, and clip planes in a [`TraverserData`] per
/// recursion level, and hands every surviving drawable to the
/// [`CullHandler`]. Plain nodes (no transform, state, or effects) pass
/// their data through untouched; a node whose bounds test fully inside
/// the frustum drops the frustum for its whole subtree.

use std::sync::{Arc, OnceLock};

use glam::{Mat4, Vec3, Vec4};

use crate::bounds::{BoundingBox, BoundingSphere, BoundingVolume};
use crate::error::{Error, Result};
use crate::scene::{
    Geom, Node, NodeEffects, NodeKey, PortalQuad, RenderMode, RenderState, SceneGraph,
    StateCache,
};
use crate::{cull_debug, cull_error, cull_warn};

use super::config::CullConfig;
use super::cullable::CullableObject;
use super::data::TraverserData;
use super::handler::CullHandler;
use super::planes::CullPlanes;
use super::portal::PortalClipper;
use super::setup::{GsgCapabilities, SceneSetup};

const LOG_SRC: &str = "cullgraph::CullTraverser";

/// Counters for one traversal pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Nodes that survived the visibility test.
    pub nodes: u32,
    /// Nodes that contributed at least one geom.
    pub geom_nodes: u32,
    /// Geoms handed to the cull handler.
    pub geoms: u32,
    /// Geoms dropped by the per-geom visibility test.
    pub geoms_occluded: u32,
}

pub struct CullTraverser {
    config: CullConfig,
    scene_setup: Option<SceneSetup>,
    camera_mask: crate::scene::DrawMask,
    initial_state: Arc<RenderState>,
    depth_offset_decals: bool,
    effective_incomplete_render: bool,
    camera_transform: Mat4,
    cull_center_transform: Mat4,
    world_to_camera: Mat4,
    world_to_cull_center: Mat4,
    view_frustum_world: Option<Arc<crate::bounds::BoundingHexahedron>>,
    state_cache: StateCache,
    stats: CullStats,
}

impl CullTraverser {
    pub fn new(config: CullConfig) -> Self {
        Self {
            config,
            scene_setup: None,
            camera_mask: crate::scene::DrawMask::ALL,
            initial_state: RenderState::empty(),
            depth_offset_decals: false,
            effective_incomplete_render: true,
            camera_transform: Mat4::IDENTITY,
            cull_center_transform: Mat4::IDENTITY,
            world_to_camera: Mat4::IDENTITY,
            world_to_cull_center: Mat4::IDENTITY,
            view_frustum_world: None,
            state_cache: StateCache::new(),
            stats: CullStats::default(),
        }
    }

    /// Bind the traverser to a camera for the coming pass(es).
    ///
    /// Derives the world-space view frustum, the inverse camera and cull
    /// center transforms, and the effective capability switches from the
    /// backend capabilities and the display region's incomplete-render
    /// flag.
    pub fn set_scene(
        &mut self,
        setup: SceneSetup,
        gsg: &GsgCapabilities,
        dr_incomplete_render: bool,
    ) {
        self.camera_mask = setup.camera_mask;
        self.initial_state = Arc::clone(&setup.initial_state);
        self.depth_offset_decals = gsg.depth_offset_decals && self.config.depth_offset_decals;
        self.effective_incomplete_render = gsg.incomplete_render && dr_incomplete_render;
        self.camera_transform = setup.camera_transform;
        self.cull_center_transform = setup.cull_center_transform;
        self.world_to_camera = setup.camera_transform.inverse();
        self.world_to_cull_center = setup.cull_center_transform.inverse();
        let frustum = setup.lens.make_bounds().xform(&setup.camera_transform);
        self.view_frustum_world = Some(Arc::new(frustum));
        self.scene_setup = Some(setup);
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &CullConfig {
        &self.config
    }

    pub fn scene_setup(&self) -> Option<&SceneSetup> {
        self.scene_setup.as_ref()
    }

    pub fn camera_mask(&self) -> crate::scene::DrawMask {
        self.camera_mask
    }

    /// World-space view frustum derived at `set_scene`.
    pub fn view_frustum(&self) -> Option<&Arc<crate::bounds::BoundingHexahedron>> {
        self.view_frustum_world.as_ref()
    }

    /// World-to-camera transform.
    pub fn world_to_camera(&self) -> &Mat4 {
        &self.world_to_camera
    }

    /// True when the backend and display region both allow rendering with
    /// assets still loading.
    pub fn effective_incomplete_render(&self) -> bool {
        self.effective_incomplete_render
    }

    /// Counters from the most recent pass.
    pub fn stats(&self) -> CullStats {
        self.stats
    }

    // ===== TRAVERSAL =====

    /// Run one pass from `root`, feeding the handler. The handler's
    /// `end_traverse` fires before this returns.
    pub fn traverse(
        &mut self,
        scene: &SceneGraph,
        root: NodeKey,
        handler: &mut dyn CullHandler,
    ) -> Result<()> {
        let lens = match self.scene_setup.as_ref() {
            Some(setup) => Arc::clone(&setup.lens),
            None => return Err(Error::SceneNotSet),
        };
        if scene.node(root).is_none() {
            return Err(Error::InvalidNode(
                "traversal root not in graph".to_string(),
            ));
        }
        self.state_cache.clear();
        self.stats = CullStats::default();

        let data = TraverserData::new(
            root,
            Mat4::IDENTITY,
            Arc::clone(&self.initial_state),
            self.view_frustum_world.clone(),
            CullPlanes::empty(),
        );

        // The clipper works in cull-center camera space for the whole pass.
        let mut clipper = if self.config.allow_portal_cull {
            let mut c = PortalClipper::new(lens.make_bounds(), self.config.debug_portal_cull);
            if self.config.debug_portal_cull {
                c.draw_camera_frustum();
            }
            Some(c)
        } else {
            None
        };

        self.r_traverse(scene, data, handler, &mut clipper);

        if let Some(c) = clipper.as_mut() {
            if let Some(geom) = c.take_debug_geom() {
                let net = self.cull_center_transform;
                let modelview = self.world_to_camera * net;
                self.stats.geoms += 1;
                let object =
                    CullableObject::new(Arc::new(geom), Self::debug_lines_state(), net, modelview);
                handler.record_object(object, self);
            }
        }

        handler.end_traverse();
        cull_debug!(
            LOG_SRC,
            "pass complete: {} nodes, {} geom nodes, {} geoms ({} occluded)",
            self.stats.nodes,
            self.stats.geom_nodes,
            self.stats.geoms,
            self.stats.geoms_occluded
        );
        Ok(())
    }

    fn r_traverse(
        &mut self,
        scene: &SceneGraph,
        mut data: TraverserData,
        handler: &mut dyn CullHandler,
        clipper: &mut Option<PortalClipper>,
    ) {
        let Some(node) = scene.node(data.node) else {
            cull_warn!(LOG_SRC, "dangling node key skipped");
            return;
        };
        if !data.is_in_view(node, self.camera_mask) {
            return;
        }

        if node.is_plain() {
            // Nothing to compose; pass the data straight through.
            self.traverse_below(scene, data, handler, clipper);
            return;
        }

        if node.effects().contains(NodeEffects::SHOW_BOUNDS) {
            // Visualize in the parent's space, before composing, so the
            // viz matches the bounds that were just tested.
            let net = data.net_transform;
            let modelview = self.world_to_camera * net;
            self.show_bounds(node, &net, &modelview, handler);
        }

        let tag_state = self.resolve_tag_state(node);
        data.apply_transform_and_state(node, tag_state.as_ref(), &mut self.state_cache);

        // A fog attribute introduced right here gets its camera distances
        // refreshed exactly once per pass.
        let introduced_fog = node.state().is_some_and(|s| s.fog().is_some())
            || tag_state.as_ref().is_some_and(|s| s.fog().is_some());
        if introduced_fog {
            if let Some(fog) = data.state.fog() {
                fog.adjust_to_camera(&self.camera_transform);
            }
        }

        if let Some(callback) = node.cull_callback() {
            // The callback owns visibility semantics for this node; false
            // aborts the whole subtree for this pass.
            if !callback(&data.net_transform, &data.state) {
                return;
            }
        }

        if self.config.allow_portal_cull {
            if let Some(portal) = node.portal() {
                self.traverse_portal(scene, &data, portal, handler, clipper);
            }
        }

        self.traverse_below(scene, data, handler, clipper);
    }

    fn traverse_below(
        &mut self,
        scene: &SceneGraph,
        mut data: TraverserData,
        handler: &mut dyn CullHandler,
        clipper: &mut Option<PortalClipper>,
    ) {
        let Some(node) = scene.node(data.node) else {
            return;
        };
        self.stats.nodes += 1;

        let has_decal = node.effects().contains(NodeEffects::DECAL);
        if has_decal && !self.depth_offset_decals {
            // Three-pass decal sequencing consumes the children itself.
            self.start_decal(scene, &data, handler);
            return;
        }

        self.add_for_draw(node, &data, handler);

        if has_decal {
            // Depth-offset decals: children draw nudged toward the camera
            // instead of through the three-pass sequence.
            if node.geoms().is_empty() {
                cull_error!(
                    LOG_SRC,
                    "decal effect applied to '{}', which has no geometry",
                    node.name()
                );
            }
            data.state =
                RenderState::compose(&data.state, &Self::depth_offset_state(), &mut self.state_cache);
        }

        let children = node.children();
        let num_children = children.len();
        if let Some(selective) = node.selective_visibility() {
            let mut i = selective.first_visible_child(num_children);
            while i < num_children {
                self.r_traverse(scene, data.for_child(children[i]), handler, clipper);
                i = selective.next_visible_child(i, num_children);
            }
        } else {
            for &child in children {
                self.r_traverse(scene, data.for_child(child), handler, clipper);
            }
        }
    }

    /// Emit the node's geoms. With more than one geom, each is tested
    /// against the frustum and cull planes on its own; a single geom is
    /// assumed to share the node's (already tested) bounds.
    fn add_for_draw(&mut self, node: &Node, data: &TraverserData, handler: &mut dyn CullHandler) {
        if node.geoms().is_empty() {
            return;
        }
        self.stats.geom_nodes += 1;
        let net = data.net_transform;
        let modelview = self.world_to_camera * net;
        let num_geoms = node.geoms().len();
        for entry in node.geoms() {
            if entry.geom.is_empty() {
                continue;
            }
            if num_geoms > 1 && !self.geom_in_view(&entry.geom, data) {
                self.stats.geoms_occluded += 1;
                continue;
            }
            let state = RenderState::compose(&data.state, &entry.state, &mut self.state_cache);
            self.stats.geoms += 1;
            handler.record_object(
                CullableObject::new(Arc::clone(&entry.geom), state, net, modelview),
                self,
            );
        }
    }

    fn geom_in_view(&self, geom: &Geom, data: &TraverserData) -> bool {
        if let Some(frustum) = &data.view_frustum {
            if frustum.contains_volume(geom.bounds()).is_no_intersection() {
                return false;
            }
        }
        if !data.cull_planes.is_empty()
            && data.cull_planes.do_cull(geom.bounds()).is_no_intersection()
        {
            return false;
        }
        true
    }

    // ===== PORTALS =====

    fn traverse_portal(
        &mut self,
        scene: &SceneGraph,
        data: &TraverserData,
        portal: &PortalQuad,
        handler: &mut dyn CullHandler,
        clipper: &mut Option<PortalClipper>,
    ) {
        if scene.node(portal.cell).is_none() {
            cull_warn!(LOG_SRC, "portal cell key does not resolve; skipped");
            return;
        }
        let lens = match self.scene_setup.as_ref() {
            Some(setup) => Arc::clone(&setup.lens),
            None => return,
        };
        // Portal vertices live in the node's local space; net_transform
        // already includes the node's own transform here.
        let to_camera = self.world_to_cull_center * data.net_transform;

        let (saved, cell_frustum) = match clipper.as_mut() {
            Some(c) => {
                let saved = c.save_state();
                if c.prepare_portal(&portal.vertices, &to_camera, lens.as_ref()) {
                    // The reduced frustum is in cull-center space; the
                    // destination cell hangs in world space.
                    let frustum = c.reduced_frustum().xform(&self.cull_center_transform);
                    (saved, Some(frustum))
                } else {
                    (saved, None)
                }
            }
            None => return,
        };

        if let Some(frustum) = cell_frustum {
            let cell_data = TraverserData::new(
                portal.cell,
                Mat4::IDENTITY,
                Arc::clone(&data.state),
                Some(Arc::new(frustum)),
                CullPlanes::empty(),
            );
            self.r_traverse(scene, cell_data, handler, clipper);
        }

        if let Some(c) = clipper.as_mut() {
            c.restore_state(saved);
        }
    }

    // ===== DECALS =====

    /// Three-pass decal sequencing: emit one linked chain holding the
    /// node's own geoms, an empty separator, and every descendant geom in
    /// traversal order. The handler draws the chain as a unit (base with
    /// depth write, decals, base again into depth only).
    fn start_decal(
        &mut self,
        scene: &SceneGraph,
        data: &TraverserData,
        handler: &mut dyn CullHandler,
    ) {
        let Some(node) = scene.node(data.node) else {
            return;
        };
        if node.geoms().is_empty() {
            cull_error!(
                LOG_SRC,
                "decal effect applied to '{}', which has no geometry",
                node.name()
            );
            return;
        }

        // Built back to front: descendants first, prepending, so the
        // finished chain reads base geoms, separator, decals in order.
        let mut decals: Option<Box<CullableObject>> = None;
        let children = node.children();
        let num_children = children.len();
        if let Some(selective) = node.selective_visibility() {
            let mut i = selective.first_visible_child(num_children);
            while i < num_children {
                decals = self.r_get_decals(scene, data.for_child(children[i]), decals);
                i = selective.next_visible_child(i, num_children);
            }
        } else {
            for &child in children.iter().rev() {
                decals = self.r_get_decals(scene, data.for_child(child), decals);
            }
        }

        let mut separator = CullableObject::empty();
        separator.set_next(decals);
        let mut chain = Box::new(separator);

        let net = data.net_transform;
        let modelview = self.world_to_camera * net;
        let num_geoms = node.geoms().len();
        let mut has_base = false;
        for entry in node.geoms().iter().rev() {
            if entry.geom.is_empty() {
                continue;
            }
            if num_geoms > 1 && !self.geom_in_view(&entry.geom, data) {
                self.stats.geoms_occluded += 1;
                continue;
            }
            let state = RenderState::compose(&data.state, &entry.state, &mut self.state_cache);
            self.stats.geoms += 1;
            let mut object = CullableObject::new(Arc::clone(&entry.geom), state, net, modelview);
            object.set_next(Some(chain));
            chain = Box::new(object);
            has_base = true;
        }
        self.stats.geom_nodes += 1;

        if has_base {
            handler.record_object(*chain, self);
        }
        // No visible base geometry drops the whole chain, decals included.
    }

    /// Collect decal geoms below a decal base, prepending onto `decals`.
    fn r_get_decals(
        &mut self,
        scene: &SceneGraph,
        mut data: TraverserData,
        decals: Option<Box<CullableObject>>,
    ) -> Option<Box<CullableObject>> {
        let Some(node) = scene.node(data.node) else {
            return decals;
        };
        if !data.is_in_view(node, self.camera_mask) {
            return decals;
        }

        let tag_state = self.resolve_tag_state(node);
        data.apply_transform_and_state(node, tag_state.as_ref(), &mut self.state_cache);

        // Children first; prepending this node's geoms afterward puts them
        // ahead of their descendants, yielding pre-order in the chain.
        let mut decals = decals;
        let children = node.children();
        let num_children = children.len();
        if let Some(selective) = node.selective_visibility() {
            let mut i = selective.first_visible_child(num_children);
            while i < num_children {
                decals = self.r_get_decals(scene, data.for_child(children[i]), decals);
                i = selective.next_visible_child(i, num_children);
            }
        } else {
            for &child in children.iter().rev() {
                decals = self.r_get_decals(scene, data.for_child(child), decals);
            }
        }

        if !node.geoms().is_empty() {
            let net = data.net_transform;
            let modelview = self.world_to_camera * net;
            let num_geoms = node.geoms().len();
            for entry in node.geoms().iter().rev() {
                if entry.geom.is_empty() {
                    continue;
                }
                if num_geoms > 1 && !self.geom_in_view(&entry.geom, &data) {
                    self.stats.geoms_occluded += 1;
                    continue;
                }
                let state =
                    RenderState::compose(&data.state, &entry.state, &mut self.state_cache);
                self.stats.geoms += 1;
                let mut object =
                    CullableObject::new(Arc::clone(&entry.geom), state, net, modelview);
                object.set_next(decals.take());
                decals = Some(Box::new(object));
            }
        }

        decals
    }

    // ===== STATE HELPERS =====

    fn resolve_tag_state(&self, node: &Node) -> Option<Arc<RenderState>> {
        let setup = self.scene_setup.as_ref()?;
        let key = setup.tag_state_key.as_ref()?;
        let value = node.tag(key)?;
        setup.tag_states.get(value).cloned()
    }

    fn depth_offset_state() -> Arc<RenderState> {
        static STATE: OnceLock<Arc<RenderState>> = OnceLock::new();
        Arc::clone(STATE.get_or_init(|| RenderState::with_depth_offset(1)))
    }

    fn debug_lines_state() -> Arc<RenderState> {
        static STATE: OnceLock<Arc<RenderState>> = OnceLock::new();
        Arc::clone(STATE.get_or_init(|| {
            RenderState::make(
                Some(Vec4::new(1.0, 1.0, 1.0, 1.0)),
                Some(RenderMode::Wireframe),
                0,
                None,
            )
        }))
    }

    fn bounds_outer_viz_state() -> Arc<RenderState> {
        static STATE: OnceLock<Arc<RenderState>> = OnceLock::new();
        Arc::clone(STATE.get_or_init(|| {
            RenderState::make(
                Some(Vec4::new(0.3, 1.0, 0.5, 1.0)),
                Some(RenderMode::Wireframe),
                0,
                None,
            )
        }))
    }

    fn bounds_inner_viz_state() -> Arc<RenderState> {
        static STATE: OnceLock<Arc<RenderState>> = OnceLock::new();
        Arc::clone(STATE.get_or_init(|| {
            RenderState::make(
                Some(Vec4::new(0.15, 0.5, 0.25, 1.0)),
                Some(RenderMode::Wireframe),
                0,
                None,
            )
        }))
    }

    // ===== BOUNDS VISUALIZATION =====

    fn show_bounds(
        &mut self,
        node: &Node,
        net_transform: &Mat4,
        modelview_transform: &Mat4,
        handler: &mut dyn CullHandler,
    ) {
        self.draw_bounding_volume(node.bounds(), net_transform, modelview_transform, handler);
        if !node.geoms().is_empty() {
            // Per-geom bounds live in the node's local frame.
            let (net, modelview) = match node.transform() {
                Some(t) => (*net_transform * *t, *modelview_transform * *t),
                None => (*net_transform, *modelview_transform),
            };
            for entry in node.geoms() {
                self.draw_bounding_volume(entry.geom.bounds(), &net, &modelview, handler);
            }
        }
    }

    /// Emit a two-sided wireframe visualization of a bounding volume.
    pub fn draw_bounding_volume(
        &mut self,
        bounds: &BoundingVolume,
        net_transform: &Mat4,
        modelview_transform: &Mat4,
        handler: &mut dyn CullHandler,
    ) {
        let Some(viz) = Self::make_bounds_viz(bounds) else {
            return;
        };
        let viz = Arc::new(viz);
        self.stats.geoms += 2;
        let outer = CullableObject::new(
            Arc::clone(&viz),
            Self::bounds_outer_viz_state(),
            *net_transform,
            *modelview_transform,
        );
        handler.record_object(outer, self);
        let inner = CullableObject::new(
            viz,
            Self::bounds_inner_viz_state(),
            *net_transform,
            *modelview_transform,
        );
        handler.record_object(inner, self);
    }

    fn make_bounds_viz(bounds: &BoundingVolume) -> Option<Geom> {
        let vertices = match bounds {
            // Nothing sensible to draw.
            BoundingVolume::Empty | BoundingVolume::Infinite => return None,
            BoundingVolume::Sphere(s) => Self::sphere_viz(s),
            BoundingVolume::Box(b) => Self::box_viz(b),
            BoundingVolume::Hexahedron(h) => {
                Self::box_viz(&BoundingBox::new(h.min(), h.max()))
            }
        };
        Some(Geom::new(vertices, *bounds))
    }

    fn sphere_viz(sphere: &BoundingSphere) -> Vec<Vec3> {
        const NUM_SLICES: usize = 16;
        const NUM_STACKS: usize = 8;
        let mut vertices = Vec::with_capacity(NUM_SLICES * (NUM_STACKS + 1));
        for slice in 0..NUM_SLICES {
            let longitude = slice as f32 / NUM_SLICES as f32;
            for stack in 0..=NUM_STACKS {
                let latitude = stack as f32 / NUM_STACKS as f32;
                vertices.push(Self::sphere_point(sphere, latitude, longitude));
            }
        }
        vertices
    }

    fn sphere_point(sphere: &BoundingSphere, latitude: f32, longitude: f32) -> Vec3 {
        let (sin_lat, cos_lat) = (latitude * std::f32::consts::PI).sin_cos();
        let (sin_lon, cos_lon) = (longitude * std::f32::consts::TAU).sin_cos();
        sphere.center()
            + Vec3::new(sin_lat * cos_lon, sin_lat * sin_lon, cos_lat) * sphere.radius()
    }

    /// Single strip visiting all 12 box edges (some twice).
    fn box_viz(b: &BoundingBox) -> Vec<Vec3> {
        const STRIP: [usize; 16] = [0, 1, 3, 2, 0, 4, 5, 7, 6, 4, 6, 2, 3, 7, 5, 1];
        STRIP.iter().map(|&i| b.point(i)).collect()
    }
}

#[cfg(test)]
#[path = "traverser_tests.rs"]
mod tests;
