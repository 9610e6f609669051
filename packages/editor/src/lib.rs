//! # Rich Text Editor
//!
//! Bootstrap layer of an extensible rich-text editor: the node-type registry,
//! node replacement, HTML hook wiring, and the editor factory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ CreateEditorArgs (host configuration)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ create_editor                               │
//! │  - Resolve namespace / theme / parent       │
//! │  - Share active editor's registry, or       │
//! │  - Build registry: built-ins + host nodes   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Editor: registry lookups, replacements,     │
//! │ transforms, DOM export / import hooks       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use richtext_editor::{create_editor, CreateEditorArgs, NodeReplacement, ParagraphNode};
//!
//! let editor = create_editor(Some(
//!     CreateEditorArgs::new()
//!         .with_namespace("comments")
//!         .with_node::<QuoteParagraph>()
//!         .with_replacement(
//!             NodeReplacement::new::<ParagraphNode>(|_| Box::new(QuoteParagraph::default()))
//!                 .scoped_to::<LegacyParagraph>(),
//!         ),
//! ))?;
//!
//! let node = editor.apply_replacement(Box::new(LegacyParagraph))?;
//! ```

mod config;
mod editor;
mod errors;
mod html;
mod node;
mod nodes;
mod registry;
mod scope;
mod state;
mod uid;

pub use config::{CreateEditorArgs, EditorConfig, EditorSettings, EditorTheme, ErrorHandler, ThemeClass};
pub use editor::{create_editor, Editor};
pub use errors::EditorError;
pub use html::{
    AfterExportFn, AfterImportFn, ConversionPriority, ConvertedNodes, DomChildConversion, DomConversion,
    DomConversionFn, DomConversionOutput, DomExportOutput, ExportDomFn, HtmlConfig, HtmlExportMap,
    HtmlImportMap, ImportDomFn,
};
pub use node::{Klass, Node, NodeClass, NodeKey, Transform, TransformSet};
pub use nodes::{builtin_klasses, LineBreakNode, ParagraphNode, RootNode, TabNode, TextNode};
pub use registry::{NodeEntry, NodeReplacement, RegisteredNode, Registry, ReplaceFn};
pub use scope::{active_editor, enter_update_scope, ActiveEditorGuard};
pub use state::EditorState;
pub use uid::create_uid;

// Re-export DOM types used in hook signatures
pub use richtext_dom::{DomNode, HtmlOptions};
