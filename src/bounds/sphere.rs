/// BoundingSphere — center plus radius.
///
/// Radius zero is a degenerate point-sphere, still a valid volume. The
/// "no volume at all" state is `BoundingVolume::Empty`, not a sphere.

use glam::{Mat4, Vec3};

use super::bounding_box::BoundingBox;
use super::hexahedron::BoundingHexahedron;
use super::plane::Plane;
use super::volume::Containment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f32,
}

impl BoundingSphere {
    /// Create a sphere from center and radius. Radius must be non-negative.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative sphere radius");
        Self { center, radius }
    }

    /// Sphere around all of the given points, centered on their AABB
    /// midpoint. Cheap, not minimal. `None` when the slice is empty.
    pub fn around_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .fold(0.0f32, |r, p| r.max((*p - center).length()));
        Some(Self { center, radius })
    }

    // ===== GETTERS =====

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Minimum corner of the enclosing axis-aligned box.
    pub fn min(&self) -> Vec3 {
        self.center - Vec3::splat(self.radius)
    }

    /// Maximum corner of the enclosing axis-aligned box.
    pub fn max(&self) -> Vec3 {
        self.center + Vec3::splat(self.radius)
    }

    // ===== TRANSFORM =====

    /// Transform by an affine matrix. Under non-uniform scale the radius
    /// grows to the largest axis scale so the result still encloses the
    /// transformed sphere.
    pub fn xform(&self, mat: &Mat4) -> BoundingSphere {
        let center = mat.transform_point3(self.center);
        let scale = mat
            .x_axis
            .truncate()
            .length()
            .max(mat.y_axis.truncate().length())
            .max(mat.z_axis.truncate().length());
        BoundingSphere {
            center,
            radius: self.radius * scale,
        }
    }

    // ===== EXTENSION =====

    /// Grow to enclose the point.
    pub fn extend_by_point(&mut self, point: Vec3) {
        let dist = (point - self.center).length();
        if dist > self.radius {
            // Keep the near side of the old sphere fixed.
            let new_radius = (dist + self.radius) * 0.5;
            self.center += (point - self.center) * ((new_radius - self.radius) / dist);
            self.radius = new_radius;
        }
    }

    /// Grow to enclose the other sphere.
    pub fn extend_by_sphere(&mut self, other: &BoundingSphere) {
        let dist = (other.center - self.center).length();
        if dist + other.radius > self.radius {
            if dist < 1e-12 {
                self.radius = self.radius.max(other.radius);
            } else {
                let far = dist + other.radius;
                let new_radius = (far + self.radius) * 0.5;
                self.center +=
                    (other.center - self.center) * ((new_radius - self.radius) / dist);
                self.radius = new_radius.max(other.radius);
            }
        }
    }

    /// Grow to enclose the box.
    pub fn extend_by_box(&mut self, other: &BoundingBox) {
        for i in 0..8 {
            self.extend_by_point(other.point(i));
        }
    }

    // ===== CONTAINMENT =====

    pub(crate) fn contains_point(&self, point: Vec3) -> Containment {
        if (point - self.center).length_squared() <= self.radius * self.radius {
            Containment::FULL
        } else {
            Containment::NO_INTERSECTION
        }
    }

    pub(crate) fn contains_lineseg(&self, a: Vec3, b: Vec3) -> Containment {
        let a_in = self.contains_point(a) != Containment::NO_INTERSECTION;
        let b_in = self.contains_point(b) != Containment::NO_INTERSECTION;
        if a_in && b_in {
            return Containment::FULL;
        }
        if a_in || b_in {
            return Containment::PARTIAL;
        }
        // Both endpoints outside; check the closest point on the segment.
        let ab = b - a;
        let len_sq = ab.length_squared();
        let closest = if len_sq < 1e-12 {
            a
        } else {
            let t = ((self.center - a).dot(ab) / len_sq).clamp(0.0, 1.0);
            a + ab * t
        };
        if (closest - self.center).length_squared() <= self.radius * self.radius {
            Containment::PARTIAL
        } else {
            Containment::NO_INTERSECTION
        }
    }

    pub(crate) fn contains_sphere(&self, other: &BoundingSphere) -> Containment {
        let dist = (other.center - self.center).length();
        if dist > self.radius + other.radius {
            Containment::NO_INTERSECTION
        } else if self.radius >= dist + other.radius {
            Containment::FULL
        } else {
            Containment::PARTIAL
        }
    }

    pub(crate) fn contains_box(&self, other: &BoundingBox) -> Containment {
        let r_sq = self.radius * self.radius;
        // Closest point on the box to the sphere center.
        let closest = self.center.clamp(other.min(), other.max());
        if (closest - self.center).length_squared() > r_sq {
            return Containment::NO_INTERSECTION;
        }
        let all_in = (0..8)
            .all(|i| (other.point(i) - self.center).length_squared() <= r_sq);
        if all_in {
            Containment::FULL
        } else {
            Containment::PARTIAL
        }
    }

    pub(crate) fn contains_hexahedron(&self, other: &BoundingHexahedron) -> Containment {
        // Test against the hexahedron's enclosing sphere. Disjoint from the
        // enclosing sphere implies disjoint; enclosing the enclosing sphere
        // implies full containment. The middle band stays conservative.
        let min = other.min();
        let max = other.max();
        let center = (min + max) * 0.5;
        let radius = (max - center).length();
        let dist = (center - self.center).length();
        if dist > self.radius + radius {
            Containment::NO_INTERSECTION
        } else if self.radius >= dist + radius {
            Containment::FULL
        } else {
            Containment::PARTIAL
        }
    }

    /// Classify against an outward-facing half-space boundary. In front of
    /// the plane counts as excluded.
    pub(crate) fn classify_plane(&self, plane: &Plane) -> Containment {
        let dist = plane.distance(self.center);
        if dist > self.radius {
            Containment::NO_INTERSECTION
        } else if dist < -self.radius {
            Containment::FULL
        } else {
            Containment::PARTIAL
        }
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
