use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// DOM node produced by export hooks and consumed by import hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomNode {
    /// HTML element
    Element {
        tag: String,
        /// Ordered so serialization is deterministic
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<DomNode>,
    },

    /// Text node
    Text { content: String },

    /// Document fragment (children are spliced into the parent on output)
    Fragment { children: Vec<DomNode> },
}

impl DomNode {
    pub fn element(tag: impl Into<String>) -> Self {
        DomNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        DomNode::Text {
            content: content.into(),
        }
    }

    pub fn fragment() -> Self {
        DomNode::Fragment {
            children: Vec::new(),
        }
    }

    /// Lowercase node name, mirroring `Node.nodeName` conventions
    pub fn node_name(&self) -> String {
        match self {
            DomNode::Element { tag, .. } => tag.to_ascii_lowercase(),
            DomNode::Text { .. } => "#text".to_string(),
            DomNode::Fragment { .. } => "#document-fragment".to_string(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            DomNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            DomNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Element { children, .. } | DomNode::Fragment { children } => children,
            DomNode::Text { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            DomNode::Text { content } => content.clone(),
            DomNode::Element { children, .. } | DomNode::Fragment { children } => {
                children.iter().map(DomNode::text_content).collect()
            }
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let DomNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let DomNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child. Text nodes have no children, so this is a no-op on them.
    pub fn with_child(mut self, child: DomNode) -> Self {
        match self {
            DomNode::Element {
                ref mut children, ..
            }
            | DomNode::Fragment { ref mut children } => children.push(child),
            DomNode::Text { .. } => {}
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<DomNode>) -> Self {
        match self {
            DomNode::Element {
                ref mut children, ..
            }
            | DomNode::Fragment { ref mut children } => children.extend(new_children),
            DomNode::Text { .. } => {}
        }
        self
    }
}
