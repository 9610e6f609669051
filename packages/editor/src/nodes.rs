//! Built-in node classes every editor registers

use crate::node::{Klass, NodeClass};

/// Root of every editor state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootNode;

impl NodeClass for RootNode {
    fn get_type() -> &'static str {
        "root"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextNode {
    pub text: String,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl NodeClass for TextNode {
    fn get_type() -> &'static str {
        "text"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBreakNode;

impl NodeClass for LineBreakNode {
    fn get_type() -> &'static str {
        "linebreak"
    }
}

/// Text node whose content is always a single tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabNode;

impl TabNode {
    pub fn text(&self) -> &'static str {
        "\t"
    }
}

impl NodeClass for TabNode {
    fn get_type() -> &'static str {
        "tab"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphNode;

impl NodeClass for ParagraphNode {
    fn get_type() -> &'static str {
        "paragraph"
    }
}

/// Built-in classes in registration order
pub fn builtin_klasses() -> [Klass; 5] {
    [
        Klass::of::<RootNode>(),
        Klass::of::<TextNode>(),
        Klass::of::<LineBreakNode>(),
        Klass::of::<TabNode>(),
        Klass::of::<ParagraphNode>(),
    ]
}
