use glam::{Mat4, Vec3};
use super::*;
use crate::bounds::{BoundingBox, BoundingHexahedron, BoundingSphere};

// ============================================================================
// Containment bitmask
// ============================================================================

#[test]
fn test_containment_bit_structure() {
    assert!(Containment::NO_INTERSECTION.is_no_intersection());
    assert!(!Containment::PARTIAL.is_no_intersection());
    assert!(!Containment::PARTIAL.is_all());
    assert!(Containment::FULL.is_all());
    // Stronger answers include the weaker bits
    assert!(Containment::FULL.contains(Containment::PARTIAL));
    assert!(Containment::PARTIAL.contains(Containment::POSSIBLE));
}

#[test]
fn test_containment_intersection_weakens() {
    // Accumulating plane results: one partial answer clears ALL
    let mut result = Containment::FULL;
    result &= Containment::PARTIAL;
    assert!(!result.is_all());
    assert!(!result.is_no_intersection());
}

// ============================================================================
// Empty and Infinite
// ============================================================================

#[test]
fn test_empty_contains_nothing() {
    let empty = BoundingVolume::Empty;
    let sphere = BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, 1.0));
    assert_eq!(empty.contains(&sphere), Containment::NO_INTERSECTION);
    assert_eq!(sphere.contains(&empty), Containment::NO_INTERSECTION);
    assert_eq!(empty.contains_point(Vec3::ZERO), Containment::NO_INTERSECTION);
}

#[test]
fn test_infinite_contains_everything() {
    let infinite = BoundingVolume::Infinite;
    let sphere = BoundingVolume::Sphere(BoundingSphere::new(Vec3::splat(1000.0), 1.0));
    assert_eq!(infinite.contains(&sphere), Containment::FULL);
    assert_eq!(infinite.contains_point(Vec3::splat(-1e6)), Containment::FULL);
    // A finite volume never claims all of an infinite one
    assert_eq!(sphere.contains(&infinite), Containment::PARTIAL);
}

#[test]
fn test_empty_and_infinite_are_xform_fixed_points() {
    let mat = Mat4::from_translation(Vec3::splat(5.0));
    assert!(BoundingVolume::Empty.xform(&mat).is_empty());
    assert!(BoundingVolume::Infinite.xform(&mat).is_infinite());
}

#[test]
fn test_degenerate_min_max() {
    // Release-mode behavior: empty/infinite answer zero instead of panicking
    if cfg!(not(debug_assertions)) {
        assert_eq!(BoundingVolume::Empty.min(), Vec3::ZERO);
        assert_eq!(BoundingVolume::Infinite.max(), Vec3::ZERO);
    }
    assert_eq!(BoundingVolume::Empty.approx_center(), Vec3::ZERO);
}

// ============================================================================
// Cross-shape containment matrix
// ============================================================================

#[test]
fn test_sphere_box_symmetric_pairs() {
    let sphere = BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, 10.0));
    let small_box =
        BoundingVolume::Box(BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
    assert_eq!(sphere.contains(&small_box), Containment::FULL);
    // The small box only partially contains the big sphere
    assert_eq!(small_box.contains(&sphere), Containment::PARTIAL);
}

#[test]
fn test_hexahedron_in_enum_dispatch() {
    let frustum = BoundingVolume::Hexahedron(BoundingHexahedron::from_frustum(
        -1.0, 1.0, -1.0, 1.0, 1.0, 100.0, false,
    ));
    let inside = BoundingVolume::Sphere(BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 1.0));
    let outside = BoundingVolume::Sphere(BoundingSphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0));
    assert_eq!(frustum.contains(&inside), Containment::FULL);
    assert_eq!(frustum.contains(&outside), Containment::NO_INTERSECTION);
}

// ============================================================================
// Extension
// ============================================================================

#[test]
fn test_extend_empty_by_point_becomes_point_sphere() {
    let mut v = BoundingVolume::Empty;
    v.extend_by_point(Vec3::new(1.0, 2.0, 3.0));
    assert!(!v.is_empty());
    assert_eq!(v.contains_point(Vec3::new(1.0, 2.0, 3.0)), Containment::FULL);
}

#[test]
fn test_extend_by_infinite_saturates() {
    let mut v = BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, 1.0));
    v.extend_by(&BoundingVolume::Infinite);
    assert!(v.is_infinite());
}

#[test]
fn test_extend_sphere_by_box() {
    let mut v = BoundingVolume::Sphere(BoundingSphere::new(Vec3::ZERO, 1.0));
    let b = BoundingVolume::Box(BoundingBox::new(Vec3::splat(4.0), Vec3::splat(6.0)));
    v.extend_by(&b);
    assert!(v.contains(&b).is_all());
}

// ============================================================================
// Containment monotonicity across shapes
// ============================================================================

#[test]
fn test_full_answer_implies_sampled_points_inside() {
    let outer = BoundingVolume::Box(BoundingBox::new(Vec3::splat(-10.0), Vec3::splat(10.0)));
    let inner_sphere = BoundingSphere::new(Vec3::new(2.0, 1.0, -3.0), 2.0);
    let inner = BoundingVolume::Sphere(inner_sphere);
    assert!(outer.contains(&inner).is_all());

    for i in 0..12 {
        let angle = i as f32 / 12.0 * std::f32::consts::TAU;
        let p = inner_sphere.center()
            + Vec3::new(angle.cos(), 0.0, angle.sin()) * inner_sphere.radius();
        assert_eq!(outer.contains_point(p), Containment::FULL, "sample {}", i);
    }
}
