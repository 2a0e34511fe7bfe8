/// SceneSetup — per-pass camera parameters handed to the traverser.

use std::sync::Arc;

use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::lens::Lens;
use crate::scene::{DrawMask, RenderState};

pub struct SceneSetup {
    /// Projection for the camera and the portal clipper.
    pub lens: Arc<dyn Lens>,

    /// Camera-to-world transform.
    pub camera_transform: Mat4,

    /// Cull-center-to-world transform. Usually the camera transform; a
    /// separate cull center lets a debug camera watch culling from
    /// outside the frustum being culled against.
    pub cull_center_transform: Mat4,

    /// Camera's visibility mask, intersected with each node's draw mask.
    pub camera_mask: DrawMask,

    /// When set, a node tagged with this key gets the matching state from
    /// `tag_states` composed in after its own state.
    pub tag_state_key: Option<String>,

    /// Tag value to state override map.
    pub tag_states: FxHashMap<String, Arc<RenderState>>,

    /// State composed onto the root before anything else.
    pub initial_state: Arc<RenderState>,
}

impl SceneSetup {
    pub fn new(lens: Arc<dyn Lens>, camera_transform: Mat4) -> Self {
        Self {
            lens,
            camera_transform,
            cull_center_transform: camera_transform,
            camera_mask: DrawMask::ALL,
            tag_state_key: None,
            tag_states: FxHashMap::default(),
            initial_state: RenderState::empty(),
        }
    }
}

/// The capability bits this subsystem reads from the graphics backend.
#[derive(Debug, Clone, Copy)]
pub struct GsgCapabilities {
    /// Backend can render decals with a polygon depth offset.
    pub depth_offset_decals: bool,

    /// Backend tolerates drawing while some assets are still loading.
    pub incomplete_render: bool,
}

impl Default for GsgCapabilities {
    fn default() -> Self {
        Self {
            depth_offset_decals: true,
            incomplete_render: true,
        }
    }
}
