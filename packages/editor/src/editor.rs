//! # Editor Factory
//!
//! [`create_editor`] resolves configuration defaults, decides whether the new
//! editor shares the active editor's registry or builds its own, and returns
//! the [`Editor`] handle.
//!
//! ## Defaults
//!
//! - `theme`: empty
//! - parent: the active editor when called with `None`, otherwise
//!   `args.parent_editor`
//! - `namespace`: explicit, else the parent's, else a generated uid
//! - `disable_events`: false, `editable`: true
//! - registry: shared with the active editor when called with `None` inside
//!   an update, otherwise built from the built-ins plus `args.nodes`

use crate::config::{CreateEditorArgs, EditorConfig, EditorTheme, ErrorHandler};
use crate::html::{DomConversion, HtmlImportMap};
use crate::node::Node;
use crate::nodes::builtin_klasses;
use crate::registry::{NodeEntry, Registry};
use crate::scope::{active_editor, enter_update_scope};
use crate::uid::create_uid;
use crate::{EditorError, EditorState};
use richtext_dom::{DomNode, HtmlOptions};
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, info, instrument};

/// Create an editor
///
/// `None` means "no configuration at all": inside an update the new editor
/// becomes a child of the active editor and shares its registry. Passing
/// `Some(CreateEditorArgs::default())` never inherits from the active editor.
#[instrument(skip_all, fields(with_args = args.is_some()))]
pub fn create_editor(args: Option<CreateEditorArgs>) -> Result<Editor, EditorError> {
    let inherit_active = args.is_none();
    let args = args.unwrap_or_default();
    let active = active_editor();

    let theme = args.theme.unwrap_or_default();
    let parent = if inherit_active {
        active.clone()
    } else {
        args.parent_editor
    };
    let disable_events = args.disable_events.unwrap_or(false);
    let namespace = match args.namespace {
        Some(namespace) if !namespace.is_empty() => namespace,
        _ => parent
            .as_ref()
            .map(|p| p.namespace().to_string())
            .unwrap_or_else(create_uid),
    };
    let editable = args.editable.unwrap_or(true);

    let (export, import) = match args.html {
        Some(html) => (html.export, html.import),
        None => (None, None),
    };

    let registry = match active.filter(|_| inherit_active) {
        Some(active) => {
            debug!(parent = active.namespace(), "Sharing active editor's registry");
            Rc::clone(active.registry())
        }
        None => {
            let entries: Vec<NodeEntry> = builtin_klasses()
                .into_iter()
                .map(NodeEntry::from)
                .chain(args.nodes)
                .collect();
            Rc::new(Registry::build(entries, export.as_ref())?)
        }
    };

    info!(
        namespace = %namespace,
        nodes = registry.len(),
        editable,
        has_parent = parent.is_some(),
        "Editor created"
    );

    Ok(Editor {
        inner: Rc::new(EditorInner {
            config: EditorConfig {
                namespace,
                theme,
                disable_events,
            },
            nodes: registry,
            parent,
            editable: Cell::new(editable),
            editor_state: RefCell::new(EditorState::empty()),
            pending_editor_state: RefCell::new(args.editor_state),
            on_error: args.on_error,
            html_import: import,
        }),
    })
}

struct EditorInner {
    config: EditorConfig,
    nodes: Rc<Registry>,
    parent: Option<Editor>,
    editable: Cell<bool>,
    editor_state: RefCell<EditorState>,
    /// Initial state supplied at creation, committed by the first update
    pending_editor_state: RefCell<Option<EditorState>>,
    on_error: Option<ErrorHandler>,
    html_import: Option<HtmlImportMap>,
}

/// Handle to an editor instance; clones refer to the same editor
#[derive(Clone)]
pub struct Editor {
    inner: Rc<EditorInner>,
}

impl Editor {
    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn namespace(&self) -> &str {
        &self.inner.config.namespace
    }

    pub fn theme(&self) -> &EditorTheme {
        &self.inner.config.theme
    }

    pub fn disable_events(&self) -> bool {
        self.inner.config.disable_events
    }

    pub fn is_editable(&self) -> bool {
        self.inner.editable.get()
    }

    pub fn set_editable(&self, editable: bool) {
        if self.inner.editable.replace(editable) != editable {
            debug!(namespace = self.namespace(), editable, "Editable changed");
        }
    }

    pub fn parent_editor(&self) -> Option<&Editor> {
        self.inner.parent.as_ref()
    }

    pub fn registry(&self) -> &Rc<Registry> {
        &self.inner.nodes
    }

    /// True when both editors hold the very same registry
    pub fn shares_registry_with(&self, other: &Editor) -> bool {
        Rc::ptr_eq(&self.inner.nodes, &other.inner.nodes)
    }

    /// True when both handles refer to the same editor
    pub fn ptr_eq(&self, other: &Editor) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn editor_state(&self) -> Ref<'_, EditorState> {
        self.inner.editor_state.borrow()
    }

    pub fn pending_editor_state(&self) -> Option<EditorState> {
        self.inner.pending_editor_state.borrow().clone()
    }

    /// Run `f` with this editor as the active editor
    pub fn update<R>(&self, f: impl FnOnce(&Editor) -> R) -> R {
        let _guard = enter_update_scope(self);
        let result = f(self);
        self.commit_pending_state();
        result
    }

    /// Commit the pending state unless the current state is still borrowed,
    /// in which case it stays pending for a later update
    fn commit_pending_state(&self) {
        let Ok(mut state) = self.inner.editor_state.try_borrow_mut() else {
            debug!(namespace = self.namespace(), "Editor state in use - deferring commit");
            return;
        };
        let Ok(mut pending) = self.inner.pending_editor_state.try_borrow_mut() else {
            return;
        };
        if let Some(next) = pending.take() {
            debug!(namespace = self.namespace(), nodes = next.node_count(), "Committing editor state");
            *state = next.into_read_only();
        }
    }

    /// Deliver a runtime error to the configured handler
    pub fn handle_error(&self, err: &EditorError) {
        match &self.inner.on_error {
            Some(handler) => handler(err),
            None => error!(namespace = self.namespace(), error = %err, "Unhandled editor error"),
        }
    }

    /// Run every transform registered for `node`'s type
    ///
    /// Failures go to the error handler and stop the remaining transforms.
    /// Returns whether all transforms succeeded.
    pub fn run_transforms(&self, node: &mut dyn Node) -> bool {
        let registry = Rc::clone(&self.inner.nodes);
        for transform in registry.transforms_for(node.node_type()) {
            if let Err(err) = transform.call(node) {
                self.handle_error(&err);
                return false;
            }
        }
        true
    }

    /// Substitute `node` according to the registry's replacement rules
    pub fn apply_replacement(&self, node: Box<dyn Node>) -> Result<Box<dyn Node>, EditorError> {
        self.inner.nodes.apply_replacement(node)
    }

    /// Export `node` through its type's export hook
    ///
    /// `Ok(None)` when the type has no export hook or the hook produced nothing.
    pub fn export_dom(&self, node: &dyn Node) -> Result<Option<DomNode>, EditorError> {
        let node_type = node.node_type();
        let registered = self
            .inner
            .nodes
            .get(node_type)
            .ok_or_else(|| EditorError::NodeNotRegistered(node_type.to_string()))?;

        Ok(match &registered.export_dom {
            Some(export) => export(self, node).finish(),
            None => None,
        })
    }

    pub fn export_html(
        &self,
        node: &dyn Node,
        options: &HtmlOptions,
    ) -> Result<Option<String>, EditorError> {
        let Some(dom) = self.export_dom(node)? else {
            return Ok(None);
        };
        match dom.to_html(options) {
            Ok(html) => Ok(Some(html)),
            Err(e) => {
                let err = EditorError::from(e);
                self.handle_error(&err);
                Err(err)
            }
        }
    }

    /// Highest-priority import conversion offered for `dom`
    pub fn import_conversion(&self, dom: &DomNode) -> Option<DomConversion> {
        self.inner.html_import.as_ref()?.conversion_for(dom)
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("namespace", &self.namespace())
            .field("editable", &self.is_editable())
            .field("nodes", &self.inner.nodes.types().collect::<Vec<_>>())
            .field("parent", &self.parent_editor().map(|p| p.namespace()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ParagraphNode, TextNode};
    use crate::node::{NodeClass, Transform};
    use std::cell::RefCell;

    #[derive(Debug)]
    struct StrictText(String);

    impl NodeClass for StrictText {
        fn get_type() -> &'static str {
            "strict-text"
        }

        fn transform() -> Option<Transform> {
            Some(Transform::new(|node| {
                let text = node
                    .downcast_ref::<StrictText>()
                    .map(|t| t.0.clone())
                    .unwrap_or_default();
                if text.is_empty() {
                    return Err(EditorError::transform("strict-text", "empty text"));
                }
                Ok(())
            }))
        }
    }

    #[test]
    fn test_defaults() {
        let editor = create_editor(Some(CreateEditorArgs::default())).unwrap();

        assert!(!editor.namespace().is_empty());
        assert!(editor.theme().is_empty());
        assert!(editor.is_editable());
        assert!(!editor.disable_events());
        assert!(editor.parent_editor().is_none());
        assert!(editor.editor_state().is_empty());
        assert!(editor.pending_editor_state().is_none());
    }

    #[test]
    fn test_empty_namespace_falls_back() {
        let editor = create_editor(Some(CreateEditorArgs::new().with_namespace(""))).unwrap();
        assert!(!editor.namespace().is_empty());
    }

    #[test]
    fn test_set_editable() {
        let editor = create_editor(None).unwrap();
        editor.set_editable(false);
        assert!(!editor.is_editable());

        let clone = editor.clone();
        clone.set_editable(true);
        assert!(editor.is_editable());
    }

    #[test]
    fn test_initial_state_committed_by_first_update() {
        let initial = EditorState::empty().with_node("1", "paragraph");
        let editor =
            create_editor(Some(CreateEditorArgs::new().with_editor_state(initial.clone()))).unwrap();

        assert!(editor.editor_state().is_empty());
        assert_eq!(editor.pending_editor_state(), Some(initial));

        editor.update(|_| {});
        assert!(editor.pending_editor_state().is_none());
        assert_eq!(editor.editor_state().node_type("1"), Some("paragraph"));
        assert!(editor.editor_state().is_read_only());
    }

    #[test]
    fn test_transform_errors_reach_on_error() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let editor = create_editor(Some(
            CreateEditorArgs::new()
                .with_node::<StrictText>()
                .with_on_error(move |err| sink.borrow_mut().push(err.clone())),
        ))
        .unwrap();

        assert!(editor.run_transforms(&mut StrictText("ok".to_string())));
        assert!(!editor.run_transforms(&mut StrictText(String::new())));

        assert_eq!(
            *seen.borrow(),
            vec![EditorError::transform("strict-text", "empty text")]
        );
    }

    #[test]
    fn test_run_transforms_without_transforms() {
        let editor = create_editor(None).unwrap();
        assert!(editor.run_transforms(&mut TextNode::new("plain")));
    }

    #[test]
    fn test_export_dom_unregistered() {
        let editor = create_editor(None).unwrap();
        let err = editor.export_dom(&StrictText("x".to_string())).unwrap_err();
        assert_eq!(err, EditorError::NodeNotRegistered("strict-text".to_string()));
    }

    #[test]
    fn test_update_while_state_is_borrowed_defers_commit() {
        let initial = EditorState::empty().with_node("1", "paragraph");
        let editor =
            create_editor(Some(CreateEditorArgs::new().with_editor_state(initial.clone()))).unwrap();

        {
            let held = editor.editor_state();
            editor.update(|_| {});
            assert!(held.is_empty());
        }
        assert_eq!(editor.pending_editor_state(), Some(initial));

        editor.update(|_| {});
        assert_eq!(editor.editor_state().node_type("1"), Some("paragraph"));
    }

    #[test]
    fn test_nested_update_reading_state() {
        let initial = EditorState::empty().with_node("1", "paragraph");
        let editor =
            create_editor(Some(CreateEditorArgs::new().with_editor_state(initial))).unwrap();

        editor.update(|e| {
            let state = e.editor_state();
            e.update(|_| {});
            assert!(state.is_empty());
        });

        // Outer update commits once the inner borrow is gone
        assert!(editor.pending_editor_state().is_none());
        assert_eq!(editor.editor_state().node_type("1"), Some("paragraph"));
    }

    #[test]
    fn test_export_html_errors_reach_on_error() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let export = crate::html::HtmlExportMap::new().with::<ParagraphNode>(|_, _| {
            crate::html::DomExportOutput::element(DomNode::element("1p"))
        });
        let editor = create_editor(Some(
            CreateEditorArgs::new()
                .with_html(crate::html::HtmlConfig::default().with_export(export))
                .with_on_error(move |err| sink.borrow_mut().push(err.clone())),
        ))
        .unwrap();

        let err = editor
            .export_html(&ParagraphNode, &HtmlOptions::compact())
            .unwrap_err();
        let expected = EditorError::Dom(richtext_dom::DomError::InvalidTagName("1p".to_string()));
        assert_eq!(err, expected);
        assert_eq!(*seen.borrow(), vec![expected]);
    }

    #[test]
    fn test_export_dom_without_hook() {
        let editor = create_editor(None).unwrap();
        assert_eq!(editor.export_dom(&ParagraphNode).unwrap(), None);
    }

    #[test]
    fn test_debug_lists_node_types() {
        let editor = create_editor(Some(CreateEditorArgs::new().with_namespace("dbg"))).unwrap();
        let debug = format!("{:?}", editor);
        assert!(debug.contains("dbg"));
        assert!(debug.contains("paragraph"));
    }
}
