use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// Plane::from_points
// ============================================================================

#[test]
fn test_plane_from_points_normal_direction() {
    // XY plane, CCW winding seen from +Z → normal points toward +Z
    let plane = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert!((plane.normal() - Vec3::Z).length() < 1e-5);
    assert!(plane.d().abs() < 1e-5);
}

#[test]
fn test_plane_from_points_opposite_winding_flips_normal() {
    let a = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::Y);
    let b = Plane::from_points(Vec3::ZERO, Vec3::Y, Vec3::X);
    assert!((a.normal() + b.normal()).length() < 1e-5);
}

#[test]
fn test_plane_from_degenerate_points() {
    // Collinear points have no well-defined plane; normal collapses to zero
    let plane = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert_eq!(plane.normal(), Vec3::ZERO);
}

// ============================================================================
// Plane::distance
// ============================================================================

#[test]
fn test_plane_signed_distance() {
    let plane = Plane::new(Vec3::Z, -3.0); // z = 3 plane
    assert!((plane.distance(Vec3::new(0.0, 0.0, 5.0)) - 2.0).abs() < 1e-5);
    assert!((plane.distance(Vec3::new(0.0, 0.0, 1.0)) + 2.0).abs() < 1e-5);
    assert!(plane.distance(Vec3::new(7.0, -2.0, 3.0)).abs() < 1e-5);
}

#[test]
fn test_plane_new_normalizes() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, 10.0), -30.0);
    assert!((plane.normal().length() - 1.0).abs() < 1e-5);
    assert!(plane.distance(Vec3::new(0.0, 0.0, 3.0)).abs() < 1e-5);
}

// ============================================================================
// Plane::xform
// ============================================================================

#[test]
fn test_plane_xform_translation() {
    let plane = Plane::new(Vec3::Z, 0.0); // z = 0
    let moved = plane.xform(&Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)));
    // Now the z = 4 plane
    assert!(moved.distance(Vec3::new(1.0, 2.0, 4.0)).abs() < 1e-4);
    assert!(moved.distance(Vec3::new(0.0, 0.0, 6.0)) > 0.0);
}

#[test]
fn test_plane_xform_rotation() {
    let plane = Plane::new(Vec3::Z, 0.0);
    let rotated = plane.xform(&Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));
    // Rotating about X by 90°: Y goes to Z, Z goes to -Y
    assert!((rotated.normal() + Vec3::Y).length() < 1e-4);
}

#[test]
fn test_plane_xform_reflection_keeps_normal_orientation() {
    // The z = 0 plane is invariant under a mirror across the YZ plane;
    // its normal must come out unchanged, not flipped by the reversed
    // winding of the re-derivation points.
    let plane = Plane::new(Vec3::Z, 0.0);
    let mirrored = plane.xform(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    assert!((mirrored.normal() - Vec3::Z).length() < 1e-5);

    // An offset plane keeps its offset sign as well
    let offset = Plane::new(Vec3::Z, -3.0); // z = 3
    let mirrored = offset.xform(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    assert!(mirrored.distance(Vec3::new(0.0, 0.0, 3.0)).abs() < 1e-4);
    assert!(mirrored.distance(Vec3::new(0.0, 0.0, 5.0)) > 0.0);
}

#[test]
fn test_plane_xform_preserves_sidedness_under_reflection() {
    let plane = Plane::new(Vec3::Z, 0.0);
    let point = Vec3::new(1.0, 1.0, 2.0);
    let side = plane.distance(point) > 0.0;

    // Mirror across the YZ plane; the point's image must stay on the
    // image of its side.
    let mirror = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
    let mirrored_plane = plane.xform(&mirror);
    let mirrored_point = mirror.transform_point3(point);
    assert_eq!(mirrored_plane.distance(mirrored_point) > 0.0, side);
}
