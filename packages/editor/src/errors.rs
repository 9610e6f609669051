//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Invalid node type '{node_type}' declared by {klass}")]
    InvalidNodeType {
        node_type: String,
        klass: &'static str,
    },

    #[error("Node type '{node_type}' is declared by both {existing} and {duplicate}")]
    DuplicateNodeType {
        node_type: String,
        existing: &'static str,
        duplicate: &'static str,
    },

    #[error("Node type '{0}' already has a replacement")]
    DuplicateReplacement(String),

    #[error("Replacement for '{node_type}' is scoped to {with_klass}, which declares type '{with_type}'")]
    ReplacementTypeMismatch {
        node_type: String,
        with_klass: &'static str,
        with_type: String,
    },

    #[error("Node type '{0}' has not been registered")]
    NodeNotRegistered(String),

    #[error("Transform failed for '{node_type}': {message}")]
    Transform { node_type: String, message: String },

    #[error("DOM error: {0}")]
    Dom(#[from] richtext_dom::DomError),

    #[error("Invalid editor settings: {0}")]
    Settings(String),
}

impl EditorError {
    /// Convenience for transform hooks reporting a failure
    pub fn transform(node_type: impl Into<String>, message: impl Into<String>) -> Self {
        EditorError::Transform {
            node_type: node_type.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Settings(e.to_string())
    }
}
