use std::sync::Arc;
use glam::{Mat4, Vec3};
use super::*;
use crate::scene::{Geom, RenderState};

fn geom() -> Arc<Geom> {
    Arc::new(Geom::with_fitted_bounds(vec![Vec3::ZERO, Vec3::ONE]))
}

fn object() -> CullableObject {
    CullableObject::new(geom(), RenderState::empty(), Mat4::IDENTITY, Mat4::IDENTITY)
}

// ============================================================================
// Single objects
// ============================================================================

#[test]
fn test_object_carries_geom_and_state() {
    let obj = object();
    assert!(obj.geom().is_some());
    assert!(obj.state().is_identity());
    assert_eq!(obj.chain_len(), 1);
}

#[test]
fn test_empty_object_has_no_geom() {
    let obj = CullableObject::empty();
    assert!(obj.geom().is_none());
    assert_eq!(obj.chain_len(), 1);
}

// ============================================================================
// Chains
// ============================================================================

#[test]
fn test_chain_links_and_iterates_in_order() {
    let mut tail = object();
    tail.set_next(None);
    let mut separator = CullableObject::empty();
    separator.set_next(Some(Box::new(tail)));
    let mut head = object();
    head.set_next(Some(Box::new(separator)));

    assert_eq!(head.chain_len(), 3);
    let kinds: Vec<bool> = head.iter().map(|o| o.geom().is_some()).collect();
    assert_eq!(kinds, vec![true, false, true]);
}

#[test]
fn test_take_next_detaches_tail() {
    let mut head = object();
    head.set_next(Some(Box::new(object())));
    let tail = head.take_next();
    assert!(tail.is_some());
    assert_eq!(head.chain_len(), 1);
    assert_eq!(tail.unwrap().chain_len(), 1);
}
