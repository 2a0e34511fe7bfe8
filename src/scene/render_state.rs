/// RenderState — immutable, shared, uniquely-identified render attributes.
///
/// States never mutate after construction. Composing a delta over a parent
/// builds (or reuses) a new shared value; the traversal carries a
/// traversal-scoped [`StateCache`] keyed on (parent id, delta id) so the
/// same composition performed at thousands of nodes allocates once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Filled,
    Wireframe,
}

/// Linear fog whose onset/opaque distances are re-derived from the camera
/// position once per introduction during a traversal.
///
/// The fog is authored around `center`: it begins `onset` units before the
/// center and saturates `opaque` units past it, measured along the line of
/// sight. [`adjust_to_camera`](Fog::adjust_to_camera) converts those to
/// absolute eye distances.
#[derive(Debug)]
pub struct Fog {
    center: Vec3,
    onset: f32,
    opaque: f32,
    adjusted: RwLock<(f32, f32)>,
}

impl Fog {
    pub fn new(center: Vec3, onset: f32, opaque: f32) -> Self {
        debug_assert!(opaque >= 0.0 && onset >= 0.0, "negative fog distances");
        Self {
            center,
            onset,
            opaque,
            adjusted: RwLock::new((onset, opaque)),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Re-derive the camera-relative fog distances. The traverser calls
    /// this exactly once per fog introduction.
    pub fn adjust_to_camera(&self, camera_transform: &Mat4) {
        let eye = camera_transform.w_axis.truncate();
        let dist = (eye - self.center).length();
        if let Ok(mut guard) = self.adjusted.write() {
            *guard = ((dist - self.onset).max(0.0), dist + self.opaque);
        }
    }

    /// Current (onset, opaque) eye distances.
    pub fn adjusted(&self) -> (f32, f32) {
        self.adjusted.read().map(|g| *g).unwrap_or((self.onset, self.opaque))
    }
}

/// A composed, immutable set of render attributes.
#[derive(Debug)]
pub struct RenderState {
    id: u64,
    color: Option<Vec4>,
    render_mode: Option<RenderMode>,
    depth_offset: i32,
    fog: Option<Arc<Fog>>,
}

impl RenderState {
    fn alloc_id() -> u64 {
        NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed)
    }

    /// The empty state; composes as the identity.
    pub fn empty() -> Arc<RenderState> {
        Arc::new(RenderState {
            id: Self::alloc_id(),
            color: None,
            render_mode: None,
            depth_offset: 0,
            fog: None,
        })
    }

    /// A state with every attribute given explicitly.
    pub fn make(
        color: Option<Vec4>,
        render_mode: Option<RenderMode>,
        depth_offset: i32,
        fog: Option<Arc<Fog>>,
    ) -> Arc<RenderState> {
        Arc::new(RenderState {
            id: Self::alloc_id(),
            color,
            render_mode,
            depth_offset,
            fog,
        })
    }

    /// A state carrying only a flat color.
    pub fn with_color(color: Vec4) -> Arc<RenderState> {
        Self::make(Some(color), None, 0, None)
    }

    /// A state carrying only a render mode.
    pub fn with_render_mode(mode: RenderMode) -> Arc<RenderState> {
        Self::make(None, Some(mode), 0, None)
    }

    /// A state carrying only a depth offset.
    pub fn with_depth_offset(offset: i32) -> Arc<RenderState> {
        Self::make(None, None, offset, None)
    }

    /// A state carrying only a fog attribute.
    pub fn with_fog(fog: Arc<Fog>) -> Arc<RenderState> {
        Self::make(None, None, 0, Some(fog))
    }

    // ===== GETTERS =====

    /// Unique id; equal ids mean the same composed value.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn color(&self) -> Option<Vec4> {
        self.color
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    pub fn depth_offset(&self) -> i32 {
        self.depth_offset
    }

    pub fn fog(&self) -> Option<&Arc<Fog>> {
        self.fog.as_ref()
    }

    /// True when composing this state over anything is a no-op.
    pub fn is_identity(&self) -> bool {
        self.color.is_none()
            && self.render_mode.is_none()
            && self.depth_offset == 0
            && self.fog.is_none()
    }

    // ===== COMPOSITION =====

    /// Compose `delta` over `parent`. Attributes set in the delta win;
    /// depth offsets accumulate. The result is cached in `cache` so
    /// repeating the same composition returns the same shared value.
    pub fn compose(
        parent: &Arc<RenderState>,
        delta: &Arc<RenderState>,
        cache: &mut StateCache,
    ) -> Arc<RenderState> {
        if delta.is_identity() {
            return Arc::clone(parent);
        }
        if parent.is_identity() {
            return Arc::clone(delta);
        }
        let key = (parent.id, delta.id);
        if let Some(hit) = cache.map.get(&key) {
            return Arc::clone(hit);
        }
        let composed = Arc::new(RenderState {
            id: Self::alloc_id(),
            color: delta.color.or(parent.color),
            render_mode: delta.render_mode.or(parent.render_mode),
            depth_offset: parent.depth_offset + delta.depth_offset,
            fog: delta.fog.clone().or_else(|| parent.fog.clone()),
        });
        cache.map.insert(key, Arc::clone(&composed));
        composed
    }
}

/// Compose cache scoped to one traversal pass.
#[derive(Debug, Default)]
pub struct StateCache {
    map: FxHashMap<(u64, u64), Arc<RenderState>>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
#[path = "render_state_tests.rs"]
mod tests;
