use glam::{Mat4, Vec3};
use super::*;
use crate::bounds::{BoundingBox, BoundingSphere, Containment};

fn test_frustum() -> BoundingHexahedron {
    // 90° symmetric perspective frustum, near 1, far 100
    BoundingHexahedron::from_frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 100.0, false)
}

// ============================================================================
// Plane orientation invariant
// ============================================================================

#[test]
fn test_planes_face_outward() {
    let hex = test_frustum();
    for (i, plane) in hex.planes().iter().enumerate() {
        assert!(
            plane.distance(hex.centroid()) <= 1e-4,
            "plane {} does not face outward",
            i
        );
    }
}

#[test]
fn test_planes_face_outward_after_rotation() {
    let hex = test_frustum().xform(&Mat4::from_rotation_y(1.2));
    for (i, plane) in hex.planes().iter().enumerate() {
        assert!(
            plane.distance(hex.centroid()) <= 1e-3,
            "plane {} flipped under rotation",
            i
        );
    }
}

#[test]
fn test_planes_face_outward_after_reflection() {
    // A mirror transform reverses the corner winding; plane derivation
    // must detect it and rebuild with the opposite winding.
    let hex = test_frustum().xform(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    for (i, plane) in hex.planes().iter().enumerate() {
        assert!(
            plane.distance(hex.centroid()) <= 1e-3,
            "plane {} flipped under reflection",
            i
        );
    }
    // Containment still behaves: the centroid is inside
    assert_eq!(hex.contains_point(hex.centroid()), Containment::FULL);
}

// ============================================================================
// contains_point
// ============================================================================

#[test]
fn test_contains_point() {
    let hex = test_frustum();
    assert_eq!(
        hex.contains_point(Vec3::new(0.0, 0.0, -10.0)),
        Containment::FULL
    );
    // Behind the near plane
    assert_eq!(
        hex.contains_point(Vec3::new(0.0, 0.0, -0.5)),
        Containment::NO_INTERSECTION
    );
    // Beyond the far plane
    assert_eq!(
        hex.contains_point(Vec3::new(0.0, 0.0, -200.0)),
        Containment::NO_INTERSECTION
    );
    // Outside the side planes
    assert_eq!(
        hex.contains_point(Vec3::new(50.0, 0.0, -10.0)),
        Containment::NO_INTERSECTION
    );
}

// ============================================================================
// contains_sphere
// ============================================================================

#[test]
fn test_contains_sphere() {
    let hex = test_frustum();
    let inside = BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 1.0);
    let outside = BoundingSphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0);
    let straddling = BoundingSphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

    assert_eq!(hex.contains_sphere(&inside), Containment::FULL);
    assert_eq!(hex.contains_sphere(&outside), Containment::NO_INTERSECTION);
    assert_eq!(hex.contains_sphere(&straddling), Containment::PARTIAL);
}

// ============================================================================
// contains_box (two-tier test)
// ============================================================================

#[test]
fn test_contains_box_inside() {
    let hex = test_frustum();
    let b = BoundingBox::new(Vec3::new(-1.0, -1.0, -51.0), Vec3::new(1.0, 1.0, -49.0));
    assert_eq!(hex.contains_box(&b), Containment::FULL);
}

#[test]
fn test_contains_box_outside() {
    let hex = test_frustum();
    let b = BoundingBox::new(Vec3::new(200.0, 200.0, -51.0), Vec3::new(201.0, 201.0, -49.0));
    assert_eq!(hex.contains_box(&b), Containment::NO_INTERSECTION);
}

#[test]
fn test_contains_box_straddling() {
    let hex = test_frustum();
    // Straddles the near plane
    let b = BoundingBox::new(Vec3::new(-0.1, -0.1, -2.0), Vec3::new(0.1, 0.1, 0.0));
    assert_eq!(hex.contains_box(&b), Containment::PARTIAL);
}

#[test]
fn test_contains_box_exact_tier_catches_diagonal_miss() {
    let hex = test_frustum();
    // A tall thin box just past the right side plane: its enclosing
    // sphere straddles the plane, but every corner is outside, so the
    // exact second tier must reject.
    let b = BoundingBox::new(Vec3::new(31.0, -20.0, -30.0), Vec3::new(33.0, 20.0, -28.0));
    assert_eq!(hex.contains_box(&b), Containment::NO_INTERSECTION);
}

// ============================================================================
// contains_hexahedron
// ============================================================================

#[test]
fn test_contains_hexahedron() {
    let hex = test_frustum();
    let inner = BoundingHexahedron::from_frustum(-0.5, 0.5, -0.5, 0.5, 2.0, 50.0, false);
    assert_eq!(hex.contains_hexahedron(&inner), Containment::FULL);

    let shifted = inner.xform(&Mat4::from_translation(Vec3::new(500.0, 0.0, 0.0)));
    assert_eq!(
        hex.contains_hexahedron(&shifted),
        Containment::NO_INTERSECTION
    );
}

// ============================================================================
// Transform round trips
// ============================================================================

#[test]
fn test_xform_recomputes_centroid() {
    let hex = test_frustum();
    let offset = Vec3::new(10.0, -5.0, 3.0);
    let moved = hex.xform(&Mat4::from_translation(offset));
    assert!((moved.centroid() - (hex.centroid() + offset)).length() < 1e-3);
}

#[test]
fn test_min_max_enclose_points() {
    let hex = test_frustum().xform(&Mat4::from_rotation_x(0.7));
    let (min, max) = (hex.min(), hex.max());
    for p in hex.points() {
        assert!(p.x >= min.x - 1e-4 && p.x <= max.x + 1e-4);
        assert!(p.y >= min.y - 1e-4 && p.y <= max.y + 1e-4);
        assert!(p.z >= min.z - 1e-4 && p.z <= max.z + 1e-4);
    }
}

// ============================================================================
// Containment monotonicity
// ============================================================================

#[test]
fn test_full_containment_implies_points_inside() {
    let hex = test_frustum();
    let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 3.0);
    assert!(hex.contains_sphere(&sphere).is_all());

    // Sample points on the sphere surface; all must test inside
    for i in 0..16 {
        let angle = i as f32 / 16.0 * std::f32::consts::TAU;
        let p = sphere.center() + Vec3::new(angle.cos(), angle.sin(), 0.0) * sphere.radius();
        assert_eq!(hex.contains_point(p), Containment::FULL, "sample {}", i);
    }
}
