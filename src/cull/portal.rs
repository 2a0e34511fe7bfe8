/// PortalClipper — narrows the view frustum through portal quads.
///
/// Works in the cull center's camera space throughout: portal vertices
/// are transformed in, projected to NDC, clipped as a 2D rectangle
/// against the current reduced viewport, then the surviving rectangle is
/// extruded back out to a new, smaller frustum for the destination cell.
/// All clipping state is saved and restored around each portal so sibling
/// portals never see each other's reductions.
///
/// With debug drawing on, the clipper accumulates colored polylines
/// (reduced frustum blue, clipped portal quad yellow, original portal
/// cyan, camera frustum white) that the traverser emits as one drawable
/// at the end of the pass.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::bounds::{BoundingHexahedron, Plane};
use crate::cull_debug;
use crate::lens::Lens;
use crate::scene::Geom;

const COLOR_WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
const COLOR_BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
const COLOR_YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
const COLOR_CYAN: Vec4 = Vec4::new(0.0, 1.0, 1.0, 1.0);

/// A single colored point in the debug polyline buffer.
#[derive(Debug, Clone, Copy)]
pub struct DebugPoint {
    pub point: Vec3,
    pub color: Vec4,
}

pub struct PortalClipper {
    reduced_viewport_min: Vec2,
    reduced_viewport_max: Vec2,
    view_frustum: Arc<BoundingHexahedron>,
    reduced_frustum: Arc<BoundingHexahedron>,
    segments: Vec<Vec<DebugPoint>>,
    color: Vec4,
    debug: bool,
}

/// Clipper state snapshot, restored after each portal's subtree.
pub(crate) struct ClipperState {
    reduced_viewport_min: Vec2,
    reduced_viewport_max: Vec2,
    reduced_frustum: Arc<BoundingHexahedron>,
}

impl PortalClipper {
    /// Create a clipper for one pass. `view_frustum` is the camera-space
    /// frustum of the cull center's lens.
    pub fn new(view_frustum: BoundingHexahedron, debug: bool) -> Self {
        let frustum = Arc::new(view_frustum);
        Self {
            reduced_viewport_min: Vec2::new(-1.0, -1.0),
            reduced_viewport_max: Vec2::new(1.0, 1.0),
            view_frustum: Arc::clone(&frustum),
            reduced_frustum: frustum,
            segments: Vec::new(),
            color: COLOR_WHITE,
            debug,
        }
    }

    // ===== GETTERS =====

    /// The current (possibly portal-reduced) frustum, in camera space.
    pub fn reduced_frustum(&self) -> &Arc<BoundingHexahedron> {
        &self.reduced_frustum
    }

    /// The current reduced viewport rectangle in NDC.
    pub fn reduced_viewport(&self) -> (Vec2, Vec2) {
        (self.reduced_viewport_min, self.reduced_viewport_max)
    }

    /// Accumulated debug polylines.
    pub fn segments(&self) -> &[Vec<DebugPoint>] {
        &self.segments
    }

    pub(crate) fn save_state(&self) -> ClipperState {
        ClipperState {
            reduced_viewport_min: self.reduced_viewport_min,
            reduced_viewport_max: self.reduced_viewport_max,
            reduced_frustum: Arc::clone(&self.reduced_frustum),
        }
    }

    pub(crate) fn restore_state(&mut self, state: ClipperState) {
        self.reduced_viewport_min = state.reduced_viewport_min;
        self.reduced_viewport_max = state.reduced_viewport_max;
        self.reduced_frustum = state.reduced_frustum;
    }

    // ===== PORTAL CLIPPING =====

    /// Attempt to narrow the frustum through a portal. `to_camera` maps
    /// the portal's local space into the cull center's camera space.
    ///
    /// Returns false when the destination cell is not visible at all
    /// (back-facing portal, or the projected quad misses the current
    /// reduced viewport). Returns true with the frustum unchanged when
    /// the portal straddles the camera plane and cannot safely narrow.
    pub fn prepare_portal(
        &mut self,
        quad: &[Vec3; 4],
        to_camera: &Mat4,
        lens: &dyn Lens,
    ) -> bool {
        let verts = (*quad).map(|v| to_camera.transform_point3(v));

        // Back-face test: the camera origin must be strictly in front of
        // the portal's plane.
        let portal_plane = Plane::from_points(verts[0], verts[1], verts[2]);
        if portal_plane.distance(Vec3::ZERO) <= 0.0 {
            cull_debug!("cullgraph::PortalClipper", "portal is not facing the camera");
            return false;
        }

        // A vertex at or behind the center of projection has no sensible
        // image; the cell is visible but the frustum cannot narrow.
        if verts.iter().any(|v| v.z >= 0.0) {
            cull_debug!(
                "cullgraph::PortalClipper",
                "portal straddles the camera plane; not reducing"
            );
            return true;
        }

        let mut projected = [Vec3::ZERO; 4];
        for (i, v) in verts.iter().enumerate() {
            match lens.project(*v) {
                Some(p) => projected[i] = p,
                None => return true,
            }
        }

        // 2D bounding rectangle of the projected quad, clipped against
        // the current reduced viewport.
        let mut min_x = projected[0].x;
        let mut max_x = projected[0].x;
        let mut min_y = projected[0].y;
        let mut max_y = projected[0].y;
        for p in &projected[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        min_x = min_x.max(self.reduced_viewport_min.x);
        min_y = min_y.max(self.reduced_viewport_min.y);
        max_x = max_x.min(self.reduced_viewport_max.x);
        max_y = max_y.min(self.reduced_viewport_max.y);

        if min_x >= max_x || min_y >= max_y {
            cull_debug!("cullgraph::PortalClipper", "portal got clipped away");
            return false;
        }

        self.reduced_viewport_min = Vec2::new(min_x, min_y);
        self.reduced_viewport_max = Vec2::new(max_x, max_y);

        // Extrude the surviving rectangle to the near and far planes and
        // assemble the reduced frustum (far face first, then near).
        let corners = [
            Vec2::new(min_x, min_y),
            Vec2::new(max_x, min_y),
            Vec2::new(max_x, max_y),
            Vec2::new(min_x, max_y),
        ];
        let mut near_points = [Vec3::ZERO; 4];
        let mut far_points = [Vec3::ZERO; 4];
        for (i, c) in corners.iter().enumerate() {
            let (near, far) = lens.extrude(*c);
            near_points[i] = near;
            far_points[i] = far;
        }
        self.reduced_frustum = Arc::new(BoundingHexahedron::new([
            far_points[0],
            far_points[1],
            far_points[2],
            far_points[3],
            near_points[0],
            near_points[1],
            near_points[2],
            near_points[3],
        ]));

        if self.debug {
            let reduced = Arc::clone(&self.reduced_frustum);
            self.color = COLOR_BLUE;
            self.draw_hexahedron(&reduced);

            self.color = COLOR_YELLOW;
            self.move_to((near_points[0] + far_points[0]) * 0.5);
            for i in 1..4 {
                self.draw_to((near_points[i] + far_points[i]) * 0.5);
            }
            self.draw_to((near_points[0] + far_points[0]) * 0.5);

            self.color = COLOR_CYAN;
            self.move_to(verts[0]);
            for v in &verts[1..] {
                self.draw_to(*v);
            }
            self.draw_to(verts[0]);
        }

        true
    }

    // ===== DEBUG DRAWING =====

    /// Start a new polyline at the point, in the current color.
    pub fn move_to(&mut self, point: Vec3) {
        self.segments.push(vec![DebugPoint {
            point,
            color: self.color,
        }]);
    }

    /// Continue the current polyline to the point.
    pub fn draw_to(&mut self, point: Vec3) {
        match self.segments.last_mut() {
            Some(segment) => segment.push(DebugPoint {
                point,
                color: self.color,
            }),
            None => self.move_to(point),
        }
    }

    /// Trace the 12 edges of a hexahedron as four polylines.
    pub fn draw_hexahedron(&mut self, hex: &BoundingHexahedron) {
        // Far face, near face, then the four connecting edges.
        self.move_to(hex.point(0));
        self.draw_to(hex.point(1));
        self.draw_to(hex.point(2));
        self.draw_to(hex.point(3));
        self.draw_to(hex.point(0));

        self.move_to(hex.point(4));
        self.draw_to(hex.point(5));
        self.draw_to(hex.point(6));
        self.draw_to(hex.point(7));
        self.draw_to(hex.point(4));

        for i in 0..4 {
            self.move_to(hex.point(i));
            self.draw_to(hex.point(i + 4));
        }
    }

    /// Trace the full camera frustum in white.
    pub fn draw_camera_frustum(&mut self) {
        self.color = COLOR_WHITE;
        let frustum = Arc::clone(&self.view_frustum);
        self.draw_hexahedron(&frustum);
    }

    /// Drain the debug buffer into one geom (polyline structure flattened,
    /// bounds fitted). `None` when nothing was drawn.
    pub fn take_debug_geom(&mut self) -> Option<Geom> {
        if self.segments.is_empty() {
            return None;
        }
        let vertices: Vec<Vec3> = self
            .segments
            .drain(..)
            .flatten()
            .map(|dp| dp.point)
            .collect();
        Some(Geom::with_fitted_bounds(vertices))
    }
}

#[cfg(test)]
#[path = "portal_tests.rs"]
mod tests;
