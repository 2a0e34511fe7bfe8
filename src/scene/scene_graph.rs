/// SceneGraph — slotmap-backed node storage.
///
/// The graph owns the nodes; the cull traverser borrows it immutably for
/// the duration of one pass. Keys stay stable across removals of other
/// nodes.

use slotmap::SlotMap;

use crate::error::{Error, Result};

use super::node::{Node, NodeKey};

#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its key.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Link `child` under `parent`. Both keys must resolve.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if parent == child {
            return Err(Error::InvalidScene("node linked under itself".to_string()));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::InvalidNode("child key not in graph".to_string()));
        }
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| Error::InvalidNode("parent key not in graph".to_string()))?;
        if parent_node.children().contains(&child) {
            return Err(Error::InvalidScene("duplicate child link".to_string()));
        }
        parent_node.add_child_key(child);
        Ok(())
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Remove a node. Links from parents are left dangling; the traversal
    /// skips keys that no longer resolve.
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        self.nodes.remove(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
