/// Lens — projection collaborator for the portal clipper.
///
/// The clipper only needs three operations: project a camera-space point
/// to normalized device coordinates, extrude an NDC point back out to the
/// near and far planes, and produce the camera-space frustum volume.
/// Cameras look down -Z; NDC spans [-1, 1] on both axes.

use glam::{Vec2, Vec3};

use crate::bounds::BoundingHexahedron;

pub trait Lens: Send + Sync {
    /// Project a camera-space point to NDC. `None` when the point is at or
    /// behind the center of projection and has no sensible image.
    fn project(&self, point: Vec3) -> Option<Vec3>;

    /// Extrude an NDC point to camera space, returning the corresponding
    /// points on the near and far planes.
    fn extrude(&self, ndc: Vec2) -> (Vec3, Vec3);

    /// The camera-space frustum volume for this lens.
    fn make_bounds(&self) -> BoundingHexahedron;
}

/// Standard perspective lens with a symmetric frustum.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveLens {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl PerspectiveLens {
    /// Create a lens from vertical field of view (radians), aspect ratio
    /// (width / height), and near/far distances.
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(fov_y > 0.0 && fov_y < std::f32::consts::PI, "bad fov");
        debug_assert!(aspect > 0.0, "bad aspect ratio");
        debug_assert!(near > 0.0 && far > near, "bad near/far planes");
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    // ===== GETTERS =====

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    fn tan_half(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }
}

impl Lens for PerspectiveLens {
    fn project(&self, point: Vec3) -> Option<Vec3> {
        let depth = -point.z;
        if depth <= 0.0 {
            return None;
        }
        let th = self.tan_half();
        Some(Vec3::new(
            point.x / (depth * th * self.aspect),
            point.y / (depth * th),
            // Linear depth in [-1, 1] between near and far.
            ((depth - self.near) / (self.far - self.near)) * 2.0 - 1.0,
        ))
    }

    fn extrude(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let th = self.tan_half();
        let near = Vec3::new(
            ndc.x * th * self.aspect * self.near,
            ndc.y * th * self.near,
            -self.near,
        );
        let far = Vec3::new(
            ndc.x * th * self.aspect * self.far,
            ndc.y * th * self.far,
            -self.far,
        );
        (near, far)
    }

    fn make_bounds(&self) -> BoundingHexahedron {
        let top = self.tan_half() * self.near;
        let right = top * self.aspect;
        BoundingHexahedron::from_frustum(-right, right, -top, top, self.near, self.far, false)
    }
}

#[cfg(test)]
#[path = "lens_tests.rs"]
mod tests;
