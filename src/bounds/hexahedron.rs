/// BoundingHexahedron — an 8-cornered convex volume, usually a view
/// frustum or a portal-reduced frustum.
///
/// Corner order: far-lower-left, far-lower-right, far-upper-right,
/// far-upper-left, then the same four on the near face. Six outward-facing
/// planes and the centroid are derived from the corners and recomputed on
/// every transform, so a reflecting transform cannot flip the volume
/// inside out.

use glam::{Mat4, Vec3};

use super::bounding_box::BoundingBox;
use super::plane::Plane;
use super::sphere::BoundingSphere;
use super::volume::Containment;

/// Number of corner points.
pub const NUM_POINTS: usize = 8;

/// Number of face planes.
pub const NUM_PLANES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingHexahedron {
    points: [Vec3; NUM_POINTS],
    planes: [Plane; NUM_PLANES],
    centroid: Vec3,
}

impl BoundingHexahedron {
    /// Create a hexahedron from its 8 corners, in the documented order.
    pub fn new(points: [Vec3; NUM_POINTS]) -> Self {
        let centroid = points.iter().copied().sum::<Vec3>() / NUM_POINTS as f32;
        let planes = Self::derive_planes(&points, centroid);
        Self {
            points,
            planes,
            centroid,
        }
    }

    /// Build a camera-space frustum. The camera looks down -Z; `left`,
    /// `right`, `bottom`, `top` are the extents of the near face. A
    /// perspective frustum scales the far face by `far / near`.
    pub fn from_frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        is_ortho: bool,
    ) -> Self {
        debug_assert!(near > 0.0 && far > near, "bad near/far planes");
        let fs = if is_ortho { 1.0 } else { far / near };
        Self::new([
            Vec3::new(left * fs, bottom * fs, -far),
            Vec3::new(right * fs, bottom * fs, -far),
            Vec3::new(right * fs, top * fs, -far),
            Vec3::new(left * fs, top * fs, -far),
            Vec3::new(left, bottom, -near),
            Vec3::new(right, bottom, -near),
            Vec3::new(right, top, -near),
            Vec3::new(left, top, -near),
        ])
    }

    // ===== GETTERS =====

    pub fn point(&self, i: usize) -> Vec3 {
        self.points[i]
    }

    pub fn points(&self) -> &[Vec3; NUM_POINTS] {
        &self.points
    }

    pub fn plane(&self, i: usize) -> &Plane {
        &self.planes[i]
    }

    pub fn planes(&self) -> &[Plane; NUM_PLANES] {
        &self.planes
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Minimum corner of the enclosing axis-aligned box.
    pub fn min(&self) -> Vec3 {
        self.points.iter().fold(self.points[0], |m, p| m.min(*p))
    }

    /// Maximum corner of the enclosing axis-aligned box.
    pub fn max(&self) -> Vec3 {
        self.points.iter().fold(self.points[0], |m, p| m.max(*p))
    }

    // ===== TRANSFORM =====

    /// Transform by an affine matrix. Planes and centroid are re-derived
    /// from the transformed corners.
    pub fn xform(&self, mat: &Mat4) -> BoundingHexahedron {
        let mut points = self.points;
        for p in &mut points {
            *p = mat.transform_point3(*p);
        }
        Self::new(points)
    }

    /// Derive the six face planes with outward normals.
    ///
    /// The first plane's winding is checked against the centroid: the
    /// centroid must be behind every face. A positive distance means the
    /// corner ordering arrived mirrored (an odd number of reflections in
    /// the accumulated transform), and all six planes are rebuilt with the
    /// opposite winding.
    fn derive_planes(points: &[Vec3; NUM_POINTS], centroid: Vec3) -> [Plane; NUM_PLANES] {
        let first = Plane::from_points(points[0], points[3], points[2]);
        if first.distance(centroid) > 0.0 {
            [
                Plane::from_points(points[0], points[2], points[3]),
                Plane::from_points(points[0], points[5], points[1]),
                Plane::from_points(points[1], points[6], points[2]),
                Plane::from_points(points[2], points[7], points[3]),
                Plane::from_points(points[3], points[4], points[0]),
                Plane::from_points(points[4], points[7], points[6]),
            ]
        } else {
            [
                first,
                Plane::from_points(points[0], points[1], points[5]),
                Plane::from_points(points[1], points[2], points[6]),
                Plane::from_points(points[2], points[3], points[7]),
                Plane::from_points(points[3], points[0], points[4]),
                Plane::from_points(points[4], points[6], points[7]),
            ]
        }
    }

    // ===== CONTAINMENT =====

    pub(crate) fn contains_point(&self, point: Vec3) -> Containment {
        for plane in &self.planes {
            if plane.distance(point) > 0.0 {
                return Containment::NO_INTERSECTION;
            }
        }
        Containment::FULL
    }

    pub(crate) fn contains_lineseg(&self, a: Vec3, b: Vec3) -> Containment {
        let a_in = self.contains_point(a) != Containment::NO_INTERSECTION;
        let b_in = self.contains_point(b) != Containment::NO_INTERSECTION;
        if a_in && b_in {
            return Containment::FULL;
        }
        // Reject only when one plane excludes both endpoints; anything
        // else stays a conservative maybe.
        for plane in &self.planes {
            if plane.distance(a) > 0.0 && plane.distance(b) > 0.0 {
                return Containment::NO_INTERSECTION;
            }
        }
        Containment::PARTIAL
    }

    pub(crate) fn contains_sphere(&self, other: &BoundingSphere) -> Containment {
        let center = other.center();
        let radius = other.radius();
        let mut result = Containment::FULL;
        for plane in &self.planes {
            let dist = plane.distance(center);
            if dist > radius {
                return Containment::NO_INTERSECTION;
            } else if dist > -radius {
                // Straddles this face.
                result &= !Containment::ALL;
            }
        }
        result
    }

    /// Two-tier box test: a cheap sphere-vs-plane check first, then exact
    /// corner classification only for planes the enclosing sphere straddles.
    pub(crate) fn contains_box(&self, other: &BoundingBox) -> Containment {
        let center = other.center();
        let radius_sq = (other.max() - center).length_squared();
        let mut result = Containment::FULL;
        for plane in &self.planes {
            let dist = plane.distance(center);
            let dist_sq = dist * dist;
            if dist_sq <= radius_sq {
                // The enclosing sphere straddles; classify the corners.
                let mut all_in = true;
                let mut all_out = true;
                for i in 0..8 {
                    if plane.distance(other.point(i)) < 0.0 {
                        all_out = false;
                    } else {
                        all_in = false;
                    }
                    if !all_in && !all_out {
                        break;
                    }
                }
                if all_out {
                    return Containment::NO_INTERSECTION;
                } else if !all_in {
                    result &= !Containment::ALL;
                }
            } else if dist >= 0.0 {
                // Fully in front of this face.
                return Containment::NO_INTERSECTION;
            }
        }
        result
    }

    pub(crate) fn contains_hexahedron(&self, other: &BoundingHexahedron) -> Containment {
        let min = other.min();
        let max = other.max();
        let center = (min + max) * 0.5;
        let radius_sq = (max - center).length_squared();
        let mut result = Containment::FULL;
        for plane in &self.planes {
            let dist = plane.distance(center);
            if dist >= 0.0 && dist * dist > radius_sq {
                return Containment::NO_INTERSECTION;
            }
            let mut points_out = 0;
            for p in other.points() {
                if plane.distance(*p) > 0.0 {
                    points_out += 1;
                }
            }
            if points_out != 0 {
                if points_out == NUM_POINTS {
                    return Containment::NO_INTERSECTION;
                }
                result &= !Containment::ALL;
            }
        }
        result
    }

    /// Classify against an outward-facing half-space boundary, by corners.
    pub(crate) fn classify_plane(&self, plane: &Plane) -> Containment {
        let mut any_in = false;
        let mut any_out = false;
        for p in &self.points {
            if plane.distance(*p) > 0.0 {
                any_out = true;
            } else {
                any_in = true;
            }
            if any_in && any_out {
                return Containment::PARTIAL;
            }
        }
        if any_out {
            Containment::NO_INTERSECTION
        } else {
            Containment::FULL
        }
    }
}

#[cfg(test)]
#[path = "hexahedron_tests.rs"]
mod tests;
