/// BoundingVolume — the closed set of volume shapes, with tri-state
/// containment between any pair.
///
/// Containment is a closed matrix over a small enum rather than an open
/// class hierarchy: every (tester, tested) pair is handled in one
/// exhaustive match, so adding a shape is a compile error until every
/// combination answers.

use bitflags::bitflags;
use glam::{Mat4, Vec3};

use super::bounding_box::BoundingBox;
use super::hexahedron::BoundingHexahedron;
use super::plane::Plane;
use super::sphere::BoundingSphere;

bitflags! {
    /// Tri-state containment answer.
    ///
    /// The empty set means definitely no intersection. `POSSIBLE` alone is
    /// a conservative maybe. `SOME` adds "at least part of the tested
    /// volume is inside", and `ALL` adds "the tested volume is entirely
    /// inside". Stronger answers always include the weaker bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Containment: u8 {
        const POSSIBLE = 1;
        const SOME = 2;
        const ALL = 4;
    }
}

impl Containment {
    /// Definitely outside.
    pub const NO_INTERSECTION: Containment = Containment::empty();

    /// Partially inside: POSSIBLE | SOME.
    pub const PARTIAL: Containment =
        Containment::POSSIBLE.union(Containment::SOME);

    /// Entirely inside: POSSIBLE | SOME | ALL.
    pub const FULL: Containment = Containment::PARTIAL.union(Containment::ALL);

    /// True when the volumes definitely do not intersect.
    ///
    /// The entirely-inside answer is the generated [`is_all`](Self::is_all):
    /// results only ever weaken from [`FULL`](Self::FULL) by clearing bits,
    /// so all-bits-set and the `ALL` bit coincide.
    pub fn is_no_intersection(self) -> bool {
        self.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    /// No volume at all; contains nothing.
    Empty,
    /// Unbounded volume; contains everything.
    Infinite,
    Sphere(BoundingSphere),
    Box(BoundingBox),
    Hexahedron(BoundingHexahedron),
}

impl BoundingVolume {
    pub fn is_empty(&self) -> bool {
        matches!(self, BoundingVolume::Empty)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, BoundingVolume::Infinite)
    }

    /// Minimum corner of the enclosing axis-aligned box.
    ///
    /// Meaningless for empty or infinite volumes; those answer `Vec3::ZERO`
    /// (with a debug assertion) so release builds degrade instead of
    /// aborting.
    pub fn min(&self) -> Vec3 {
        match self {
            BoundingVolume::Empty | BoundingVolume::Infinite => {
                debug_assert!(false, "min() on empty or infinite volume");
                Vec3::ZERO
            }
            BoundingVolume::Sphere(s) => s.min(),
            BoundingVolume::Box(b) => b.min(),
            BoundingVolume::Hexahedron(h) => h.min(),
        }
    }

    /// Maximum corner of the enclosing axis-aligned box. Same degenerate
    /// behavior as [`min`](Self::min).
    pub fn max(&self) -> Vec3 {
        match self {
            BoundingVolume::Empty | BoundingVolume::Infinite => {
                debug_assert!(false, "max() on empty or infinite volume");
                Vec3::ZERO
            }
            BoundingVolume::Sphere(s) => s.max(),
            BoundingVolume::Box(b) => b.max(),
            BoundingVolume::Hexahedron(h) => h.max(),
        }
    }

    /// A representative center point. `Vec3::ZERO` for empty and infinite.
    pub fn approx_center(&self) -> Vec3 {
        match self {
            BoundingVolume::Empty | BoundingVolume::Infinite => Vec3::ZERO,
            BoundingVolume::Sphere(s) => s.center(),
            BoundingVolume::Box(b) => b.center(),
            BoundingVolume::Hexahedron(h) => h.centroid(),
        }
    }

    // ===== TRANSFORM =====

    /// Transform by an affine matrix, returning a new volume. Empty and
    /// infinite are fixed points.
    pub fn xform(&self, mat: &Mat4) -> BoundingVolume {
        match self {
            BoundingVolume::Empty | BoundingVolume::Infinite => *self,
            BoundingVolume::Sphere(s) => BoundingVolume::Sphere(s.xform(mat)),
            BoundingVolume::Box(b) => BoundingVolume::Box(b.xform(mat)),
            BoundingVolume::Hexahedron(h) => BoundingVolume::Hexahedron(h.xform(mat)),
        }
    }

    // ===== EXTENSION =====

    /// Grow to enclose the point. Empty becomes a point-sphere; infinite
    /// stays infinite.
    pub fn extend_by_point(&mut self, point: Vec3) {
        match self {
            BoundingVolume::Empty => {
                *self = BoundingVolume::Sphere(BoundingSphere::new(point, 0.0));
            }
            BoundingVolume::Infinite => {}
            BoundingVolume::Sphere(s) => s.extend_by_point(point),
            BoundingVolume::Box(b) => b.extend_by_point(point),
            BoundingVolume::Hexahedron(h) => {
                // Hexahedra are derived (frustum) volumes; grow via the
                // enclosing box.
                let mut b = BoundingBox::new(h.min(), h.max());
                b.extend_by_point(point);
                *self = BoundingVolume::Box(b);
            }
        }
    }

    /// Grow to enclose the other volume.
    pub fn extend_by(&mut self, other: &BoundingVolume) {
        match other {
            BoundingVolume::Empty => return,
            BoundingVolume::Infinite => {
                *self = BoundingVolume::Infinite;
                return;
            }
            _ => {}
        }
        match self {
            BoundingVolume::Empty => *self = *other,
            BoundingVolume::Infinite => {}
            BoundingVolume::Sphere(s) => match other {
                BoundingVolume::Sphere(o) => s.extend_by_sphere(o),
                BoundingVolume::Box(o) => s.extend_by_box(o),
                BoundingVolume::Hexahedron(o) => {
                    s.extend_by_box(&BoundingBox::new(o.min(), o.max()))
                }
                _ => {}
            },
            BoundingVolume::Box(b) => Self::extend_box(b, other),
            BoundingVolume::Hexahedron(h) => {
                let mut b = BoundingBox::new(h.min(), h.max());
                Self::extend_box(&mut b, other);
                *self = BoundingVolume::Box(b);
            }
        }
    }

    fn extend_box(b: &mut BoundingBox, other: &BoundingVolume) {
        match other {
            BoundingVolume::Sphere(o) => b.extend_by_sphere(o),
            BoundingVolume::Box(o) => b.extend_by_box(o),
            BoundingVolume::Hexahedron(o) => {
                b.extend_by_box(&BoundingBox::new(o.min(), o.max()))
            }
            _ => {}
        }
    }

    // ===== CONTAINMENT =====

    pub fn contains_point(&self, point: Vec3) -> Containment {
        match self {
            BoundingVolume::Empty => Containment::NO_INTERSECTION,
            BoundingVolume::Infinite => Containment::FULL,
            BoundingVolume::Sphere(s) => s.contains_point(point),
            BoundingVolume::Box(b) => b.contains_point(point),
            BoundingVolume::Hexahedron(h) => h.contains_point(point),
        }
    }

    pub fn contains_lineseg(&self, a: Vec3, b: Vec3) -> Containment {
        match self {
            BoundingVolume::Empty => Containment::NO_INTERSECTION,
            BoundingVolume::Infinite => Containment::FULL,
            BoundingVolume::Sphere(s) => s.contains_lineseg(a, b),
            BoundingVolume::Box(bx) => bx.contains_lineseg(a, b),
            BoundingVolume::Hexahedron(h) => h.contains_lineseg(a, b),
        }
    }

    /// Classify against an outward-facing half-space boundary. The empty
    /// volume is never inside; the infinite volume is treated as fully
    /// behind (it can never be rejected by a plane).
    pub fn classify_plane(&self, plane: &Plane) -> Containment {
        match self {
            BoundingVolume::Empty => Containment::NO_INTERSECTION,
            BoundingVolume::Infinite => Containment::PARTIAL,
            BoundingVolume::Sphere(s) => s.classify_plane(plane),
            BoundingVolume::Box(b) => b.classify_plane(plane),
            BoundingVolume::Hexahedron(h) => h.classify_plane(plane),
        }
    }

    /// How much of `other` lies inside `self`.
    pub fn contains(&self, other: &BoundingVolume) -> Containment {
        match (self, other) {
            (BoundingVolume::Empty, _) | (_, BoundingVolume::Empty) => {
                Containment::NO_INTERSECTION
            }
            (BoundingVolume::Infinite, _) => Containment::FULL,
            // A finite volume intersects an infinite one, but never
            // contains all of it.
            (_, BoundingVolume::Infinite) => Containment::PARTIAL,
            (BoundingVolume::Sphere(a), BoundingVolume::Sphere(b)) => a.contains_sphere(b),
            (BoundingVolume::Sphere(a), BoundingVolume::Box(b)) => a.contains_box(b),
            (BoundingVolume::Sphere(a), BoundingVolume::Hexahedron(b)) => {
                a.contains_hexahedron(b)
            }
            (BoundingVolume::Box(a), BoundingVolume::Sphere(b)) => a.contains_sphere(b),
            (BoundingVolume::Box(a), BoundingVolume::Box(b)) => a.contains_box(b),
            (BoundingVolume::Box(a), BoundingVolume::Hexahedron(b)) => {
                a.contains_hexahedron(b)
            }
            (BoundingVolume::Hexahedron(a), BoundingVolume::Sphere(b)) => {
                a.contains_sphere(b)
            }
            (BoundingVolume::Hexahedron(a), BoundingVolume::Box(b)) => a.contains_box(b),
            (BoundingVolume::Hexahedron(a), BoundingVolume::Hexahedron(b)) => {
                a.contains_hexahedron(b)
            }
        }
    }
}

impl BoundingHexahedron {
    /// Containment of an arbitrary volume within this hexahedron. The hot
    /// path of the traversal; avoids wrapping the frustum in an enum just
    /// to dispatch.
    pub fn contains_volume(&self, other: &BoundingVolume) -> Containment {
        match other {
            BoundingVolume::Empty => Containment::NO_INTERSECTION,
            BoundingVolume::Infinite => Containment::PARTIAL,
            BoundingVolume::Sphere(s) => self.contains_sphere(s),
            BoundingVolume::Box(b) => self.contains_box(b),
            BoundingVolume::Hexahedron(h) => self.contains_hexahedron(h),
        }
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
