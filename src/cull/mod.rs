//! Cull traversal engine
//!
//! [`CullTraverser`] walks the scene graph once per camera per frame,
//! accumulating transforms, state, the view frustum, and any clip planes,
//! and hands every surviving drawable to a [`CullHandler`]. Portal quads
//! narrow the frustum through [`PortalClipper`]; decal effects are
//! sequenced into linked [`CullableObject`] chains.

mod config;
mod cullable;
mod data;
mod handler;
mod planes;
mod portal;
mod setup;
mod traverser;

pub use config::CullConfig;
pub use cullable::CullableObject;
pub use data::TraverserData;
pub use handler::{CollectingCullHandler, CullHandler};
pub use planes::CullPlanes;
pub use portal::{DebugPoint, PortalClipper};
pub use setup::{GsgCapabilities, SceneSetup};
pub use traverser::{CullStats, CullTraverser};
