use crate::{DomError, DomNode};

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Put block children on their own indented lines
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl HtmlOptions {
    /// Single-line output with no insignificant whitespace
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: String::new(),
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Writer<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

impl DomNode {
    /// Serialize this node (and its subtree) to HTML
    pub fn to_html(&self, options: &HtmlOptions) -> Result<String, DomError> {
        let mut writer = Writer::new(options);
        write_node(self, true, &mut writer)?;
        Ok(writer.get_output())
    }
}

/// `block` is true when the node sits on its own line in pretty output
fn write_node(node: &DomNode, block: bool, w: &mut Writer) -> Result<(), DomError> {
    match node {
        DomNode::Text { content } => {
            if w.options.pretty && block {
                w.add_indent();
                w.add(&escape_html(content));
                w.newline();
            } else {
                w.add(&escape_html(content));
            }
            Ok(())
        }
        DomNode::Fragment { children } => {
            for child in children {
                write_node(child, block, w)?;
            }
            Ok(())
        }
        DomNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => write_element(tag, attributes, styles, children, block, w),
    }
}

fn write_element(
    tag: &str,
    attributes: &std::collections::BTreeMap<String, String>,
    styles: &std::collections::BTreeMap<String, String>,
    children: &[DomNode],
    block: bool,
    w: &mut Writer,
) -> Result<(), DomError> {
    if !is_valid_tag_name(tag) {
        return Err(DomError::InvalidTagName(tag.to_string()));
    }

    if w.options.pretty && block {
        w.add_indent();
    }
    w.add(&format!("<{}", tag));

    for (name, value) in attributes {
        if !is_valid_attribute_name(name) {
            return Err(DomError::InvalidAttributeName {
                tag: tag.to_string(),
                name: name.clone(),
            });
        }
        w.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value))
            .collect();
        w.add(&format!(" style=\"{}\"", escape_html(&declarations.join(" "))));
    }

    if children.is_empty() && is_void_element(tag) {
        w.add(" />");
        if block {
            w.newline();
        }
        return Ok(());
    }

    w.add(">");

    let child_blocks = w.options.pretty && has_element_children(children);
    if child_blocks {
        w.newline();
        w.indent();
    }
    for child in children {
        write_node(child, child_blocks, w)?;
    }
    if child_blocks {
        w.dedent();
        w.add_indent();
    }

    w.add(&format!("</{}>", tag));
    if block {
        w.newline();
    }
    Ok(())
}

fn has_element_children(children: &[DomNode]) -> bool {
    children.iter().any(|child| match child {
        DomNode::Element { .. } => true,
        DomNode::Fragment { children } => has_element_children(children),
        DomNode::Text { .. } => false,
    })
}

fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<'))
}

/// Escape text for use in HTML content and double-quoted attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Elements that never have content and are written self-closing
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
