use std::sync::Arc;
use glam::{Mat4, Vec4};
use super::*;
use crate::scene::RenderState;

// ============================================================================
// DrawMask
// ============================================================================

#[test]
fn test_draw_mask_intersection() {
    assert!(DrawMask::ALL.intersects(DrawMask::bit(5)));
    assert!(!DrawMask::NONE.intersects(DrawMask::ALL));
    assert!(DrawMask::bit(3).intersects(DrawMask::bit(3)));
    assert!(!DrawMask::bit(3).intersects(DrawMask::bit(4)));
}

// ============================================================================
// Plain nodes
// ============================================================================

#[test]
fn test_new_node_is_plain() {
    let node = Node::new("boring");
    assert!(node.is_plain());
    assert!(node.bounds().is_infinite());
}

#[test]
fn test_transform_makes_node_fancy() {
    let mut node = Node::new("moved");
    node.set_transform(Some(Mat4::from_translation(glam::Vec3::X)));
    assert!(!node.is_plain());
    node.set_transform(None);
    assert!(node.is_plain());
}

#[test]
fn test_state_and_tags_make_node_fancy() {
    let mut node = Node::new("styled");
    node.set_state(Some(RenderState::with_color(Vec4::ONE)));
    assert!(!node.is_plain());

    let mut tagged = Node::new("tagged");
    tagged.set_tag("team", "red");
    assert!(!tagged.is_plain());
    assert_eq!(tagged.tag("team"), Some("red"));
    assert_eq!(tagged.tag("missing"), None);
}

#[test]
fn test_geoms_do_not_make_node_fancy() {
    // Geometry is handled in traverse_below, not in the fancy-bits path
    let mut node = Node::new("geometry");
    node.add_geom(
        Arc::new(crate::scene::Geom::with_fitted_bounds(vec![glam::Vec3::ZERO])),
        RenderState::empty(),
    );
    assert!(node.is_plain());
}

// ============================================================================
// SelectiveVisibility
// ============================================================================

#[test]
fn test_selective_visibility_protocol() {
    let sel = SelectiveVisibility::new(vec![4, 1, 1, 7]);
    assert_eq!(sel.first_visible_child(10), 1);
    assert_eq!(sel.next_visible_child(1, 10), 4);
    assert_eq!(sel.next_visible_child(4, 10), 7);
    assert_eq!(sel.next_visible_child(7, 10), 10);
}

#[test]
fn test_selective_visibility_clamps_to_child_count() {
    let sel = SelectiveVisibility::new(vec![5]);
    assert_eq!(sel.first_visible_child(3), 3);
    assert_eq!(sel.next_visible_child(0, 3), 3);
}

#[test]
fn test_selective_visibility_empty() {
    let sel = SelectiveVisibility::new(vec![]);
    assert_eq!(sel.first_visible_child(4), 4);
}
