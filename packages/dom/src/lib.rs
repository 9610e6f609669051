//! # Rich Text DOM
//!
//! Lightweight stand-in for a browser DOM, used as the external document
//! representation that editor nodes are exported to and imported from.
//!
//! ```rust,ignore
//! use richtext_dom::{DomNode, HtmlOptions};
//!
//! let p = DomNode::element("p")
//!     .with_attr("dir", "ltr")
//!     .with_child(DomNode::text("Hello"));
//!
//! assert_eq!(p.to_html(&HtmlOptions::compact())?, r#"<p dir="ltr">Hello</p>"#);
//! ```

mod error;
mod node;
mod serializer;

#[cfg(test)]
mod tests;

pub use error::DomError;
pub use node::DomNode;
pub use serializer::{escape_html, is_void_element, HtmlOptions};
