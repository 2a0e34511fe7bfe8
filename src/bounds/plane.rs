/// Plane — oriented half-space boundary.
///
/// Stored as (normal, d) with `normal . p + d = 0`. `distance()` is
/// positive on the side the normal points toward. Frustum and clip planes
/// keep their normals pointing OUT of the volume, so a contained point has
/// non-positive distance to every plane.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    d: f32,
}

impl Plane {
    /// Create a plane from a (not necessarily normalized) normal and offset.
    pub fn new(normal: Vec3, d: f32) -> Self {
        let len = normal.length();
        if len > 1e-12 {
            Self {
                normal: normal / len,
                d: d / len,
            }
        } else {
            Self { normal, d }
        }
    }

    /// Plane through three points, normal given by the right-hand winding
    /// (a, b, c). Degenerate triples yield a zero normal.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(a),
        }
    }

    // ===== GETTERS =====

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane offset: `normal . p + d = 0` for points on the plane.
    pub fn d(&self) -> f32 {
        self.d
    }

    /// Signed distance from the point to the plane. Positive in front.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// A point lying on the plane.
    pub fn point_on_plane(&self) -> Vec3 {
        self.normal * -self.d
    }

    // ===== TRANSFORM =====

    /// Transform the plane by an affine matrix.
    ///
    /// Re-derives the plane from three transformed points so non-uniform
    /// scales and reflections come out right without an inverse-transpose.
    pub fn xform(&self, mat: &Mat4) -> Plane {
        let origin = self.point_on_plane();
        // Pick a tangent not parallel to the normal.
        let t = if self.normal.x.abs() < 0.9 {
            Vec3::X
        } else {
            Vec3::Y
        };
        let u = self.normal.cross(t).normalize_or_zero();
        let v = self.normal.cross(u);
        let mut plane = Plane::from_points(
            mat.transform_point3(origin),
            mat.transform_point3(origin + u),
            mat.transform_point3(origin + v),
        );
        // A reflecting transform reverses the winding of the three points,
        // which would swap the plane's sides; flip back.
        if mat.determinant() < 0.0 {
            plane.normal = -plane.normal;
            plane.d = -plane.d;
        }
        plane
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
