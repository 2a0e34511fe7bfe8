/// Traversal configuration.
///
/// Passed explicitly to the traverser so a pass is a pure function of
/// (scene, setup, config) rather than ambient globals.

#[derive(Debug, Clone)]
pub struct CullConfig {
    /// Narrow the view frustum through portal quads during traversal.
    pub allow_portal_cull: bool,

    /// Record portal-clipping wireframes and emit them as a drawable at
    /// the end of the pass.
    pub debug_portal_cull: bool,

    /// Prefer a depth-offset state over three-pass decal sequencing, when
    /// the graphics backend supports it.
    pub depth_offset_decals: bool,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            allow_portal_cull: false,
            debug_portal_cull: false,
            depth_offset_decals: false,
        }
    }
}
