/// CullHandler — downstream sink for drawable objects.
///
/// The boundary between culling and the rest of a renderer: a real
/// implementation would bin objects for state-sorted drawing; tests use
/// [`CollectingCullHandler`] to inspect exactly what survived.

use super::cullable::CullableObject;
use super::traverser::CullTraverser;

pub trait CullHandler {
    /// Receive one drawable (or chain of drawables) in traversal order.
    fn record_object(&mut self, object: CullableObject, traverser: &CullTraverser);

    /// Called once when the whole pass completes.
    fn end_traverse(&mut self) {}
}

/// Handler that buffers everything it receives.
#[derive(Default)]
pub struct CollectingCullHandler {
    pub objects: Vec<CullableObject>,
    pub traverse_ended: bool,
}

impl CollectingCullHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total drawables across all recorded chains, separators included.
    pub fn total_len(&self) -> usize {
        self.objects.iter().map(|o| o.chain_len()).sum()
    }
}

impl CullHandler for CollectingCullHandler {
    fn record_object(&mut self, object: CullableObject, _traverser: &CullTraverser) {
        self.objects.push(object);
    }

    fn end_traverse(&mut self) {
        self.traverse_ended = true;
    }
}
