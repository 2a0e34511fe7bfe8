use glam::{Mat4, Vec3};
use super::*;
use crate::bounds::{BoundingSphere, Containment, Plane};

// ============================================================================
// Construction and corners
// ============================================================================

#[test]
fn test_around_points() {
    let points = [
        Vec3::new(-1.0, 2.0, 0.0),
        Vec3::new(3.0, -4.0, 5.0),
        Vec3::new(0.0, 0.0, -2.0),
    ];
    let b = BoundingBox::around_points(&points).unwrap();
    assert_eq!(b.min(), Vec3::new(-1.0, -4.0, -2.0));
    assert_eq!(b.max(), Vec3::new(3.0, 2.0, 5.0));
}

#[test]
fn test_corner_octant_bits() {
    let b = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    assert_eq!(b.point(0), Vec3::ZERO);
    assert_eq!(b.point(1), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(b.point(2), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(b.point(4), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(b.point(7), Vec3::ONE);
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_box_contains_box() {
    let big = BoundingBox::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let inside = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let outside = BoundingBox::new(Vec3::splat(20.0), Vec3::splat(21.0));
    let straddling = BoundingBox::new(Vec3::splat(5.0), Vec3::splat(15.0));

    assert_eq!(big.contains_box(&inside), Containment::FULL);
    assert_eq!(big.contains_box(&outside), Containment::NO_INTERSECTION);
    assert_eq!(big.contains_box(&straddling), Containment::PARTIAL);
}

#[test]
fn test_box_contains_sphere() {
    let b = BoundingBox::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let inside = BoundingSphere::new(Vec3::ZERO, 5.0);
    let outside = BoundingSphere::new(Vec3::new(30.0, 0.0, 0.0), 5.0);
    let straddling = BoundingSphere::new(Vec3::new(10.0, 0.0, 0.0), 2.0);

    assert_eq!(b.contains_sphere(&inside), Containment::FULL);
    assert_eq!(b.contains_sphere(&outside), Containment::NO_INTERSECTION);
    assert_eq!(b.contains_sphere(&straddling), Containment::PARTIAL);
}

#[test]
fn test_box_contains_lineseg() {
    let b = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert_eq!(
        b.contains_lineseg(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)),
        Containment::FULL
    );
    // Both endpoints beyond the same face
    assert_eq!(
        b.contains_lineseg(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 0.0)),
        Containment::NO_INTERSECTION
    );
    // Crossing through
    assert_eq!(
        b.contains_lineseg(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
        Containment::PARTIAL
    );
}

// ============================================================================
// classify_plane
// ============================================================================

#[test]
fn test_box_classify_plane() {
    let plane = Plane::new(Vec3::X, 0.0); // outward = +X
    let behind = BoundingBox::new(Vec3::new(-5.0, -1.0, -1.0), Vec3::new(-2.0, 1.0, 1.0));
    let in_front = BoundingBox::new(Vec3::new(2.0, -1.0, -1.0), Vec3::new(5.0, 1.0, 1.0));
    let straddling = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));

    assert_eq!(behind.classify_plane(&plane), Containment::FULL);
    assert_eq!(in_front.classify_plane(&plane), Containment::NO_INTERSECTION);
    assert_eq!(straddling.classify_plane(&plane), Containment::PARTIAL);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_box_xform_translation() {
    let b = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let moved = b.xform(&Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    assert!((moved.min() - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    assert!((moved.max() - Vec3::new(6.0, 1.0, 1.0)).length() < 1e-5);
}

#[test]
fn test_box_xform_rotation_encloses_corners() {
    let b = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let mat = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);
    let rotated = b.xform(&mat);
    // Every transformed corner must land inside the new box
    for i in 0..8 {
        let p = mat.transform_point3(b.point(i));
        assert_ne!(
            rotated.contains_point(p),
            Containment::NO_INTERSECTION,
            "corner {} escaped",
            i
        );
    }
}

#[test]
fn test_box_xform_reflection_keeps_corners_ordered() {
    let b = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let mirrored = b.xform(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    assert!(mirrored.min().x <= mirrored.max().x);
    assert!((mirrored.min().x + 1.0).abs() < 1e-5);
    assert!(mirrored.max().x.abs() < 1e-5);
}
