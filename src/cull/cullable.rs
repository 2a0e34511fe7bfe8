/// CullableObject — a drawable emitted by the traversal.
///
/// Usually a single geom plus its composed state and transforms. Decal
/// sequencing links several objects into a chain: base geoms first, then
/// an empty separator, then the decal geoms; the handler draws the chain
/// as one unit.

use std::sync::Arc;

use glam::Mat4;

use crate::scene::{Geom, RenderState};

pub struct CullableObject {
    geom: Option<Arc<Geom>>,
    state: Arc<RenderState>,
    net_transform: Mat4,
    modelview_transform: Mat4,
    next: Option<Box<CullableObject>>,
}

impl CullableObject {
    pub fn new(
        geom: Arc<Geom>,
        state: Arc<RenderState>,
        net_transform: Mat4,
        modelview_transform: Mat4,
    ) -> Self {
        Self {
            geom: Some(geom),
            state,
            net_transform,
            modelview_transform,
            next: None,
        }
    }

    /// An empty marker object; used as the decal separator.
    pub fn empty() -> Self {
        Self {
            geom: None,
            state: RenderState::empty(),
            net_transform: Mat4::IDENTITY,
            modelview_transform: Mat4::IDENTITY,
            next: None,
        }
    }

    // ===== GETTERS =====

    pub fn geom(&self) -> Option<&Arc<Geom>> {
        self.geom.as_ref()
    }

    pub fn state(&self) -> &Arc<RenderState> {
        &self.state
    }

    /// Object-to-world transform.
    pub fn net_transform(&self) -> &Mat4 {
        &self.net_transform
    }

    /// Object-to-camera transform.
    pub fn modelview_transform(&self) -> &Mat4 {
        &self.modelview_transform
    }

    // ===== CHAIN =====

    pub fn next(&self) -> Option<&CullableObject> {
        self.next.as_deref()
    }

    pub fn set_next(&mut self, next: Option<Box<CullableObject>>) {
        self.next = next;
    }

    pub fn take_next(&mut self) -> Option<Box<CullableObject>> {
        self.next.take()
    }

    /// Number of objects in this chain, including self.
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate the chain head to tail.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            current: Some(self),
        }
    }
}

pub struct ChainIter<'a> {
    current: Option<&'a CullableObject>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a CullableObject;

    fn next(&mut self) -> Option<Self::Item> {
        let obj = self.current?;
        self.current = obj.next();
        Some(obj)
    }
}

#[cfg(test)]
#[path = "cullable_tests.rs"]
mod tests;
