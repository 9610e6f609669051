//! # HTML Hooks
//!
//! Export hooks turn a node into a [`DomNode`]; they are supplied per node
//! type and attached to the registry when it is built. Import hooks are
//! supplied per DOM node name and offer a [`DomConversion`] back into nodes.

use crate::node::{Node, NodeClass};
use crate::Editor;
use richtext_dom::DomNode;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

// Export

/// Post-processes the element generated by an export hook
pub type AfterExportFn = Rc<dyn Fn(Option<DomNode>) -> Option<DomNode>>;

pub type ExportDomFn = Rc<dyn Fn(&Editor, &dyn Node) -> DomExportOutput>;

#[derive(Clone, Default)]
pub struct DomExportOutput {
    pub element: Option<DomNode>,
    pub after: Option<AfterExportFn>,
}

impl DomExportOutput {
    pub fn element(element: DomNode) -> Self {
        Self {
            element: Some(element),
            after: None,
        }
    }

    pub fn with_after(mut self, after: impl Fn(Option<DomNode>) -> Option<DomNode> + 'static) -> Self {
        self.after = Some(Rc::new(after));
        self
    }

    /// Apply `after` (if any) to the generated element
    pub fn finish(self) -> Option<DomNode> {
        match self.after {
            Some(after) => after(self.element),
            None => self.element,
        }
    }
}

impl fmt::Debug for DomExportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomExportOutput")
            .field("element", &self.element)
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Export hooks keyed by node type tag
#[derive(Clone, Default)]
pub struct HtmlExportMap {
    hooks: HashMap<&'static str, ExportDomFn>,
}

impl HtmlExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an export hook for `T`, keyed by its type tag
    pub fn insert<T: NodeClass>(
        &mut self,
        hook: impl Fn(&Editor, &dyn Node) -> DomExportOutput + 'static,
    ) -> Option<ExportDomFn> {
        self.insert_hook(T::get_type(), Rc::new(hook))
    }

    pub fn insert_hook(&mut self, node_type: &'static str, hook: ExportDomFn) -> Option<ExportDomFn> {
        self.hooks.insert(node_type, hook)
    }

    pub fn with<T: NodeClass>(
        mut self,
        hook: impl Fn(&Editor, &dyn Node) -> DomExportOutput + 'static,
    ) -> Self {
        self.insert::<T>(hook);
        self
    }

    pub fn get(&self, node_type: &str) -> Option<&ExportDomFn> {
        self.hooks.get(node_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.hooks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HtmlExportMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types().collect();
        types.sort_unstable();
        f.debug_struct("HtmlExportMap").field("types", &types).finish()
    }
}

// Import

/// Priority of an import conversion, 0 (lowest) to 4 (highest)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConversionPriority(u8);

impl ConversionPriority {
    pub const MAX: u8 = 4;

    pub fn new(priority: u8) -> Option<Self> {
        (priority <= Self::MAX).then_some(Self(priority))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Nodes produced by a conversion
#[derive(Debug, Default)]
pub enum ConvertedNodes {
    #[default]
    None,
    One(Box<dyn Node>),
    Many(Vec<Box<dyn Node>>),
}

impl ConvertedNodes {
    pub fn into_vec(self) -> Vec<Box<dyn Node>> {
        match self {
            ConvertedNodes::None => Vec::new(),
            ConvertedNodes::One(node) => vec![node],
            ConvertedNodes::Many(nodes) => nodes,
        }
    }
}

/// Adjusts each converted child, given the node produced for its parent
pub type DomChildConversion = Rc<dyn Fn(Box<dyn Node>, Option<&dyn Node>) -> Option<Box<dyn Node>>>;

pub type AfterImportFn = Rc<dyn Fn(Vec<Box<dyn Node>>) -> Vec<Box<dyn Node>>>;

#[derive(Default)]
pub struct DomConversionOutput {
    pub node: ConvertedNodes,
    pub for_child: Option<DomChildConversion>,
    pub after: Option<AfterImportFn>,
}

impl DomConversionOutput {
    pub fn node(node: impl Node) -> Self {
        Self {
            node: ConvertedNodes::One(Box::new(node)),
            ..Default::default()
        }
    }
}

pub type DomConversionFn = Rc<dyn Fn(&DomNode) -> Option<DomConversionOutput>>;

#[derive(Clone)]
pub struct DomConversion {
    pub conversion: DomConversionFn,
    pub priority: ConversionPriority,
}

impl DomConversion {
    pub fn new(conversion: impl Fn(&DomNode) -> Option<DomConversionOutput> + 'static) -> Self {
        Self {
            conversion: Rc::new(conversion),
            priority: ConversionPriority::default(),
        }
    }

    pub fn with_priority(mut self, priority: ConversionPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn convert(&self, dom: &DomNode) -> Option<DomConversionOutput> {
        (self.conversion)(dom)
    }
}

impl fmt::Debug for DomConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomConversion")
            .field("priority", &self.priority)
            .finish()
    }
}

/// Offers a conversion for a DOM node, or declines with `None`
pub type ImportDomFn = Rc<dyn Fn(&DomNode) -> Option<DomConversion>>;

/// Import hooks keyed by lowercase DOM node name (`p`, `br`, `#text`)
#[derive(Clone, Default)]
pub struct HtmlImportMap {
    hooks: HashMap<String, Vec<ImportDomFn>>,
}

impl HtmlImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_name: &str, hook: impl Fn(&DomNode) -> Option<DomConversion> + 'static) {
        self.hooks
            .entry(node_name.to_ascii_lowercase())
            .or_default()
            .push(Rc::new(hook));
    }

    pub fn with(mut self, node_name: &str, hook: impl Fn(&DomNode) -> Option<DomConversion> + 'static) -> Self {
        self.insert(node_name, hook);
        self
    }

    pub fn contains(&self, node_name: &str) -> bool {
        self.hooks.contains_key(&node_name.to_ascii_lowercase())
    }

    /// Highest-priority conversion offered for `dom`; ties go to the earliest hook
    pub fn conversion_for(&self, dom: &DomNode) -> Option<DomConversion> {
        let hooks = self.hooks.get(&dom.node_name())?;
        let mut best: Option<DomConversion> = None;
        for hook in hooks {
            if let Some(candidate) = hook(dom) {
                let better = best
                    .as_ref()
                    .map_or(true, |current| candidate.priority > current.priority);
                if better {
                    best = Some(candidate);
                }
            }
        }
        best
    }
}

impl fmt::Debug for HtmlImportMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.hooks.keys().collect();
        names.sort_unstable();
        f.debug_struct("HtmlImportMap").field("node_names", &names).finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlConfig {
    pub export: Option<HtmlExportMap>,
    pub import: Option<HtmlImportMap>,
}

impl HtmlConfig {
    pub fn with_export(mut self, export: HtmlExportMap) -> Self {
        self.export = Some(export);
        self
    }

    pub fn with_import(mut self, import: HtmlImportMap) -> Self {
        self.import = Some(import);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{LineBreakNode, ParagraphNode, TextNode};

    fn priority(p: u8) -> ConversionPriority {
        ConversionPriority::new(p).unwrap()
    }

    #[test]
    fn test_priority_range() {
        assert!(ConversionPriority::new(4).is_some());
        assert!(ConversionPriority::new(5).is_none());
        assert_eq!(ConversionPriority::default().value(), 0);
    }

    #[test]
    fn test_export_map_is_keyed_by_type_tag() {
        let map = HtmlExportMap::new()
            .with::<TextNode>(|_, _| DomExportOutput::element(DomNode::element("span")));

        assert!(map.get("text").is_some());
        assert!(map.get("paragraph").is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_export_output_after_runs_on_element() {
        let output = DomExportOutput::element(DomNode::element("p"))
            .with_after(|element| element.map(|e| e.with_attr("dir", "ltr")));

        let finished = output.finish().unwrap();
        assert_eq!(finished.attr("dir"), Some("ltr"));
    }

    #[test]
    fn test_import_picks_highest_priority() {
        let import = HtmlImportMap::new()
            .with("p", |_| {
                Some(
                    DomConversion::new(|_| Some(DomConversionOutput::node(LineBreakNode)))
                        .with_priority(priority(1)),
                )
            })
            .with("P", |_| {
                Some(
                    DomConversion::new(|_| Some(DomConversionOutput::node(ParagraphNode)))
                        .with_priority(priority(3)),
                )
            });

        let conversion = import.conversion_for(&DomNode::element("p")).unwrap();
        assert_eq!(conversion.priority, priority(3));

        let output = conversion.convert(&DomNode::element("p")).unwrap();
        let nodes = output.node.into_vec();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type(), "paragraph");
    }

    #[test]
    fn test_import_ties_go_to_first_hook() {
        let import = HtmlImportMap::new()
            .with("br", |_| {
                Some(DomConversion::new(|_| Some(DomConversionOutput::node(LineBreakNode))))
            })
            .with("br", |_| {
                Some(DomConversion::new(|_| Some(DomConversionOutput::node(TextNode::new("\n")))))
            });

        let conversion = import.conversion_for(&DomNode::element("br")).unwrap();
        let nodes = conversion
            .convert(&DomNode::element("br"))
            .unwrap()
            .node
            .into_vec();
        assert_eq!(nodes[0].node_type(), "linebreak");
    }

    #[test]
    fn test_import_declining_hooks_are_skipped() {
        let import = HtmlImportMap::new()
            .with("span", |dom| {
                dom.attr("data-mention")?;
                Some(DomConversion::new(|dom| {
                    Some(DomConversionOutput::node(TextNode::new(dom.text_content())))
                }))
            });

        assert!(import.conversion_for(&DomNode::element("span")).is_none());
        assert!(import
            .conversion_for(&DomNode::element("span").with_attr("data-mention", "1"))
            .is_some());
        assert!(import.conversion_for(&DomNode::element("div")).is_none());
    }
}
