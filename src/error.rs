/// Error types for the cullgraph crate.
///
/// Errors cover API misuse only: traversing before the scene is set,
/// or handing the traverser a key that does not resolve. Geometric edge
/// cases (back-facing portals, degenerate clip rectangles, empty bounding
/// volumes) are ordinary return values, never errors.

use std::fmt;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cullgraph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A traversal was started before `set_scene` was called.
    SceneNotSet,
    /// A node key did not resolve in the scene graph.
    InvalidNode(String),
    /// A scene-graph edit was malformed (bad parent/child link).
    InvalidScene(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SceneNotSet => {
                write!(f, "Traversal started before set_scene")
            }
            Error::InvalidNode(msg) => {
                write!(f, "Invalid node: {}", msg)
            }
            Error::InvalidScene(msg) => {
                write!(f, "Invalid scene edit: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
