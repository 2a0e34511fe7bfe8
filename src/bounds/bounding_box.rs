/// BoundingBox — axis-aligned box given by min/max corners.

use glam::{Mat4, Vec3};

use super::hexahedron::BoundingHexahedron;
use super::plane::Plane;
use super::sphere::BoundingSphere;
use super::volume::Containment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    /// Create a box from corners. Requires `min <= max` on every axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "inverted box corners"
        );
        Self { min, max }
    }

    /// Tightest box around all of the given points. `None` when the slice
    /// is empty.
    pub fn around_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });
        Some(Self { min, max })
    }

    // ===== GETTERS =====

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Corner by octant bits: bit 0 selects max X, bit 1 max Y, bit 2 max Z.
    pub fn point(&self, i: usize) -> Vec3 {
        debug_assert!(i < 8, "box corner index out of range");
        Vec3::new(
            if i & 1 != 0 { self.max.x } else { self.min.x },
            if i & 2 != 0 { self.max.y } else { self.min.y },
            if i & 4 != 0 { self.max.z } else { self.min.z },
        )
    }

    // ===== TRANSFORM =====

    /// Transform by an affine matrix, returning the tightest axis-aligned
    /// box around the transformed corners (Arvo's method).
    pub fn xform(&self, mat: &Mat4) -> BoundingBox {
        let translation = mat.w_axis.truncate();
        let mut new_min = translation;
        let mut new_max = translation;
        for col in 0..3 {
            let axis = match col {
                0 => mat.x_axis.truncate(),
                1 => mat.y_axis.truncate(),
                _ => mat.z_axis.truncate(),
            };
            let lo = self.min[col];
            let hi = self.max[col];
            let a = axis * lo;
            let b = axis * hi;
            new_min += a.min(b);
            new_max += a.max(b);
        }
        BoundingBox {
            min: new_min,
            max: new_max,
        }
    }

    // ===== EXTENSION =====

    /// Grow to enclose the point.
    pub fn extend_by_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to enclose the other box.
    pub fn extend_by_box(&mut self, other: &BoundingBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Grow to enclose the sphere.
    pub fn extend_by_sphere(&mut self, other: &BoundingSphere) {
        self.min = self.min.min(other.min());
        self.max = self.max.max(other.max());
    }

    // ===== CONTAINMENT =====

    pub(crate) fn contains_point(&self, point: Vec3) -> Containment {
        if point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
        {
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
        // Slab reject: both endpoints beyond the same face.
        for axis in 0..3 {
            if a[axis] < self.min[axis] && b[axis] < self.min[axis] {
                return Containment::NO_INTERSECTION;
            }
            if a[axis] > self.max[axis] && b[axis] > self.max[axis] {
                return Containment::NO_INTERSECTION;
            }
        }
        Containment::PARTIAL
    }

    pub(crate) fn contains_sphere(&self, other: &BoundingSphere) -> Containment {
        let s_min = other.min();
        let s_max = other.max();
        if s_min.x >= self.min.x
            && s_max.x <= self.max.x
            && s_min.y >= self.min.y
            && s_max.y <= self.max.y
            && s_min.z >= self.min.z
            && s_max.z <= self.max.z
        {
            return Containment::FULL;
        }
        let closest = other.center().clamp(self.min, self.max);
        if (closest - other.center()).length_squared() <= other.radius() * other.radius() {
            Containment::PARTIAL
        } else {
            Containment::NO_INTERSECTION
        }
    }

    pub(crate) fn contains_box(&self, other: &BoundingBox) -> Containment {
        if other.min.x > self.max.x
            || other.max.x < self.min.x
            || other.min.y > self.max.y
            || other.max.y < self.min.y
            || other.min.z > self.max.z
            || other.max.z < self.min.z
        {
            Containment::NO_INTERSECTION
        } else if other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
            && other.min.z >= self.min.z
            && other.max.z <= self.max.z
        {
            Containment::FULL
        } else {
            Containment::PARTIAL
        }
    }

    pub(crate) fn contains_hexahedron(&self, other: &BoundingHexahedron) -> Containment {
        // Compare against the hexahedron's enclosing box. Full containment
        // of the enclosing box implies full containment; disjoint from it
        // implies disjoint. The middle band stays conservative.
        let enclosing = BoundingBox {
            min: other.min(),
            max: other.max(),
        };
        match self.contains_box(&enclosing) {
            c if c == Containment::FULL => Containment::FULL,
            c if c == Containment::NO_INTERSECTION => Containment::NO_INTERSECTION,
            _ => Containment::PARTIAL,
        }
    }

    /// Classify against an outward-facing half-space boundary.
    pub(crate) fn classify_plane(&self, plane: &Plane) -> Containment {
        let mut any_in = false;
        let mut any_out = false;
        for i in 0..8 {
            if plane.distance(self.point(i)) > 0.0 {
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
#[path = "bounding_box_tests.rs"]
mod tests;
