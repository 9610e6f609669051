//! # Node Registry
//!
//! Maps each node type tag to its registration record. Built once when an
//! editor is created and never mutated afterwards; child editors may share
//! their parent's registry through an `Rc`.
//!
//! ## Construction
//!
//! Entries are processed in order: built-in classes first, then whatever the
//! host supplied. An entry is either a bare class or a [`NodeReplacement`]
//! describing how instances of an already known class get substituted.
//!
//! - Two different classes declaring the same tag is an error
//! - The same class listed again merges into its existing record
//! - A replacement attaches to the record of the class it replaces
//! - A replacement scoped with `with_klass` only fires for that exact class,
//!   which must declare the same tag

use crate::html::{ExportDomFn, HtmlExportMap};
use crate::node::{Klass, Node, NodeClass, Transform, TransformSet};
use crate::EditorError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Produces the substitute for a node being replaced
pub type ReplaceFn = Rc<dyn Fn(Box<dyn Node>) -> Box<dyn Node>>;

/// Caller request to substitute instances of `replace`
#[derive(Clone)]
pub struct NodeReplacement {
    pub replace: Klass,
    pub with: ReplaceFn,
    /// Only instances of exactly this class are substituted
    pub with_klass: Option<Klass>,
}

impl NodeReplacement {
    pub fn new<T: NodeClass>(with: impl Fn(Box<dyn Node>) -> Box<dyn Node> + 'static) -> Self {
        Self {
            replace: Klass::of::<T>(),
            with: Rc::new(with),
            with_klass: None,
        }
    }

    /// Narrow the replacement to instances of `S`
    pub fn scoped_to<S: NodeClass>(mut self) -> Self {
        self.with_klass = Some(Klass::of::<S>());
        self
    }
}

impl fmt::Debug for NodeReplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeReplacement")
            .field("replace", &self.replace)
            .field("with_klass", &self.with_klass)
            .finish()
    }
}

/// One element of the node list passed to the editor factory
#[derive(Debug, Clone)]
pub enum NodeEntry {
    Klass(Klass),
    Replacement(NodeReplacement),
}

impl NodeEntry {
    pub fn klass(&self) -> Klass {
        match self {
            NodeEntry::Klass(klass) => *klass,
            NodeEntry::Replacement(replacement) => replacement.replace,
        }
    }
}

impl From<Klass> for NodeEntry {
    fn from(klass: Klass) -> Self {
        NodeEntry::Klass(klass)
    }
}

impl From<NodeReplacement> for NodeEntry {
    fn from(replacement: NodeReplacement) -> Self {
        NodeEntry::Replacement(replacement)
    }
}

/// Registration record for one node type
#[derive(Clone)]
pub struct RegisteredNode {
    pub klass: Klass,
    pub transforms: TransformSet,
    pub replace: Option<ReplaceFn>,
    pub replace_with_klass: Option<Klass>,
    pub export_dom: Option<ExportDomFn>,
}

impl RegisteredNode {
    fn new(klass: Klass, export_dom: Option<ExportDomFn>) -> Self {
        let mut transforms = TransformSet::new();
        if let Some(transform) = klass.transform() {
            transforms.insert(transform);
        }
        Self {
            klass,
            transforms,
            replace: None,
            replace_with_klass: None,
            export_dom,
        }
    }

    /// True when `node` would be substituted by this record's replacement
    pub fn replaces(&self, node: &dyn Node) -> bool {
        self.replace.is_some()
            && self
                .replace_with_klass
                .map_or(true, |klass| klass.is_class_of(node))
    }
}

impl fmt::Debug for RegisteredNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredNode")
            .field("klass", &self.klass)
            .field("transforms", &self.transforms.len())
            .field("replace", &self.replace.is_some())
            .field("replace_with_klass", &self.replace_with_klass)
            .field("export_dom", &self.export_dom.is_some())
            .finish()
    }
}

/// Insertion-ordered mapping from type tag to [`RegisteredNode`]
#[derive(Default)]
pub struct Registry {
    nodes: Vec<RegisteredNode>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Build a registry from `entries`, attaching export hooks from `export`
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn build(
        entries: Vec<NodeEntry>,
        export: Option<&HtmlExportMap>,
    ) -> Result<Self, EditorError> {
        let mut registry = Registry::default();

        for entry in entries {
            let (klass, replacement) = match entry {
                NodeEntry::Klass(klass) => (klass, None),
                NodeEntry::Replacement(r) => (r.replace, Some((r.with, r.with_klass))),
            };

            let node_type = klass.get_type();
            validate_node_type(node_type, &klass)?;

            if let Some((_, Some(with_klass))) = &replacement {
                let with_type = with_klass.get_type();
                if with_type != node_type {
                    return Err(EditorError::ReplacementTypeMismatch {
                        node_type: node_type.to_string(),
                        with_klass: with_klass.name(),
                        with_type: with_type.to_string(),
                    });
                }
            }

            let position = match registry.index.get(node_type) {
                Some(&position) => {
                    let existing = &registry.nodes[position];
                    if existing.klass != klass {
                        return Err(EditorError::DuplicateNodeType {
                            node_type: node_type.to_string(),
                            existing: existing.klass.name(),
                            duplicate: klass.name(),
                        });
                    }
                    position
                }
                None => {
                    let export_dom = export.and_then(|map| map.get(node_type)).cloned();
                    debug!(
                        node_type,
                        klass = klass.name(),
                        export_dom = export_dom.is_some(),
                        "Registering node"
                    );
                    registry.nodes.push(RegisteredNode::new(klass, export_dom));
                    registry.index.insert(node_type, registry.nodes.len() - 1);
                    registry.nodes.len() - 1
                }
            };

            if let Some((with, with_klass)) = replacement {
                let record = &mut registry.nodes[position];
                if record.replace.is_some() {
                    return Err(EditorError::DuplicateReplacement(node_type.to_string()));
                }
                debug!(
                    node_type,
                    scoped_to = with_klass.map(|k| k.name()),
                    "Registering node replacement"
                );
                record.replace = Some(with);
                record.replace_with_klass = with_klass;
            }
        }

        if let Some(export) = export {
            for node_type in export.types() {
                if !registry.contains(node_type) {
                    warn!(node_type, "Export hook given for unregistered node type - ignoring");
                }
            }
        }

        info!(nodes = registry.len(), "Node registry built");
        Ok(registry)
    }

    pub fn get(&self, node_type: &str) -> Option<&RegisteredNode> {
        self.index.get(node_type).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.index.contains_key(node_type)
    }

    pub fn klass_of(&self, node_type: &str) -> Option<Klass> {
        self.get(node_type).map(|registered| registered.klass)
    }

    /// Registered type tags, in registration order
    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.iter().map(|registered| registered.klass.get_type())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn transforms_for(&self, node_type: &str) -> impl Iterator<Item = &Transform> {
        self.get(node_type)
            .into_iter()
            .flat_map(|registered| registered.transforms.iter())
    }

    /// Substitute `node` if its type's record carries a matching replacement
    pub fn apply_replacement(&self, node: Box<dyn Node>) -> Result<Box<dyn Node>, EditorError> {
        let node_type = node.node_type();
        let registered = self
            .get(node_type)
            .ok_or_else(|| EditorError::NodeNotRegistered(node_type.to_string()))?;

        match &registered.replace {
            Some(replace) if registered.replaces(node.as_ref()) => {
                let replacement = replace(node);
                debug!(
                    node_type,
                    replaced_by = replacement.klass().name(),
                    "Replaced node"
                );
                Ok(replacement)
            }
            _ => Ok(node),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().map(|n| (n.klass.get_type(), n)))
            .finish()
    }
}

fn validate_node_type(node_type: &str, klass: &Klass) -> Result<(), EditorError> {
    if node_type.is_empty() || node_type.chars().any(char::is_whitespace) {
        return Err(EditorError::InvalidNodeType {
            node_type: node_type.to_string(),
            klass: klass.name(),
        });
    }
    Ok(())
}
