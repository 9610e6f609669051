//! # Editor Configuration
//!
//! [`CreateEditorArgs`] is what a host passes to the factory; every field is
//! optional. [`EditorConfig`] is the resolved, immutable part kept by the
//! editor. [`EditorSettings`] is the declarative subset that can be loaded
//! from JSON.

use crate::html::HtmlConfig;
use crate::node::{Klass, NodeClass};
use crate::registry::{NodeEntry, NodeReplacement};
use crate::{Editor, EditorError, EditorState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Receives runtime errors raised by node hooks
pub type ErrorHandler = Rc<dyn Fn(&EditorError)>;

/// Theme value: a class name, or a map of class names for sub-variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeClass {
    Class(String),
    Nested(BTreeMap<String, String>),
}

/// Opaque mapping of style classes used when rendering nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorTheme(BTreeMap<String, ThemeClass>);

impl EditorTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, key: impl Into<String>, class: impl Into<String>) -> Self {
        self.0.insert(key.into(), ThemeClass::Class(class.into()));
        self
    }

    pub fn with_nested(mut self, key: impl Into<String>, classes: BTreeMap<String, String>) -> Self {
        self.0.insert(key.into(), ThemeClass::Nested(classes));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ThemeClass> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Arguments accepted by [`create_editor`](crate::create_editor)
#[derive(Clone, Default)]
pub struct CreateEditorArgs {
    pub disable_events: Option<bool>,
    pub editor_state: Option<EditorState>,
    pub namespace: Option<String>,
    pub nodes: Vec<NodeEntry>,
    pub on_error: Option<ErrorHandler>,
    pub parent_editor: Option<Editor>,
    pub editable: Option<bool>,
    pub theme: Option<EditorTheme>,
    pub html: Option<HtmlConfig>,
}

impl CreateEditorArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_theme(mut self, theme: EditorTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn with_disable_events(mut self, disable_events: bool) -> Self {
        self.disable_events = Some(disable_events);
        self
    }

    pub fn with_parent_editor(mut self, parent: &Editor) -> Self {
        self.parent_editor = Some(parent.clone());
        self
    }

    pub fn with_editor_state(mut self, state: EditorState) -> Self {
        self.editor_state = Some(state);
        self
    }

    /// Register an additional node class
    pub fn with_node<T: NodeClass>(mut self) -> Self {
        self.nodes.push(Klass::of::<T>().into());
        self
    }

    pub fn with_replacement(mut self, replacement: NodeReplacement) -> Self {
        self.nodes.push(replacement.into());
        self
    }

    pub fn with_nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeEntry>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn with_on_error(mut self, handler: impl Fn(&EditorError) + 'static) -> Self {
        self.on_error = Some(Rc::new(handler));
        self
    }

    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = Some(html);
        self
    }
}

impl From<EditorSettings> for CreateEditorArgs {
    fn from(settings: EditorSettings) -> Self {
        Self {
            namespace: settings.namespace,
            theme: settings.theme,
            editable: settings.editable,
            disable_events: settings.disable_events,
            ..Default::default()
        }
    }
}

/// Resolved configuration held by an editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub namespace: String,
    pub theme: EditorTheme,
    pub disable_events: bool,
}

/// Declarative editor settings, e.g. from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub namespace: Option<String>,
    pub theme: Option<EditorTheme>,
    pub editable: Option<bool>,
    pub disable_events: Option<bool>,
}

impl EditorSettings {
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
