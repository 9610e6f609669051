use crate::node::NodeKey;
use std::collections::BTreeMap;

/// Snapshot of an editor's document, reduced to the node-key to node-type map
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    node_map: BTreeMap<NodeKey, &'static str>,
    read_only: bool,
}

impl EditorState {
    pub const ROOT_KEY: &'static str = "root";

    /// State holding nothing but the root node
    pub fn empty() -> Self {
        let mut node_map = BTreeMap::new();
        node_map.insert(Self::ROOT_KEY.to_string(), "root");
        Self {
            node_map,
            read_only: false,
        }
    }

    pub fn with_node(mut self, key: impl Into<NodeKey>, node_type: &'static str) -> Self {
        self.node_map.insert(key.into(), node_type);
        self
    }

    pub fn node_type(&self, key: &str) -> Option<&'static str> {
        self.node_map.get(key).copied()
    }

    pub fn node_count(&self) -> usize {
        self.node_map.len()
    }

    /// True when only the root node is present
    pub fn is_empty(&self) -> bool {
        self.node_map.len() == 1
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Freeze the state once it has been committed
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::empty()
    }
}
