use crate::{DomError, DomNode, HtmlOptions};

#[test]
fn test_compact_paragraph() {
    let p = DomNode::element("p")
        .with_attr("dir", "ltr")
        .with_child(DomNode::text("Hello"));

    let html = p.to_html(&HtmlOptions::compact()).unwrap();
    assert_eq!(html, r#"<p dir="ltr">Hello</p>"#);
}

#[test]
fn test_void_elements_self_close() {
    let br = DomNode::element("br");
    assert_eq!(br.to_html(&HtmlOptions::compact()).unwrap(), "<br />");
}

#[test]
fn test_pretty_block_children_are_indented() {
    let p = DomNode::element("p")
        .with_child(DomNode::element("br"))
        .with_child(DomNode::text("a"));

    let html = p.to_html(&HtmlOptions::default()).unwrap();
    assert_eq!(html, "<p>\n  <br />\n  a\n</p>\n");
}

#[test]
fn test_pretty_text_only_children_stay_inline() {
    let span = DomNode::element("span").with_child(DomNode::text("inline"));
    assert_eq!(
        span.to_html(&HtmlOptions::default()).unwrap(),
        "<span>inline</span>\n"
    );
}

#[test]
fn test_text_and_attributes_are_escaped() {
    let a = DomNode::element("a")
        .with_attr("title", "\"quoted\" & <tagged>")
        .with_child(DomNode::text("1 < 2"));

    let html = a.to_html(&HtmlOptions::compact()).unwrap();
    assert_eq!(
        html,
        r#"<a title="&quot;quoted&quot; &amp; &lt;tagged&gt;">1 &lt; 2</a>"#
    );
}

#[test]
fn test_styles_are_written_in_key_order() {
    let span = DomNode::element("span")
        .with_style("white-space", "pre-wrap")
        .with_style("font-weight", "bold");

    let html = span.to_html(&HtmlOptions::compact()).unwrap();
    assert_eq!(
        html,
        r#"<span style="font-weight: bold; white-space: pre-wrap;"></span>"#
    );
}

#[test]
fn test_fragment_children_are_spliced() {
    let fragment = DomNode::fragment()
        .with_child(DomNode::element("b").with_child(DomNode::text("x")))
        .with_child(DomNode::text("y"));

    assert_eq!(
        fragment.to_html(&HtmlOptions::compact()).unwrap(),
        "<b>x</b>y"
    );
    assert_eq!(fragment.text_content(), "xy");
}

#[test]
fn test_invalid_tag_name_is_rejected() {
    let bad = DomNode::element("1p");
    assert_eq!(
        bad.to_html(&HtmlOptions::compact()),
        Err(DomError::InvalidTagName("1p".to_string()))
    );
}

#[test]
fn test_invalid_attribute_name_is_rejected() {
    let bad = DomNode::element("p").with_attr("on click", "x");
    assert!(matches!(
        bad.to_html(&HtmlOptions::compact()),
        Err(DomError::InvalidAttributeName { .. })
    ));
}

#[test]
fn test_node_name_and_accessors() {
    let p = DomNode::element("P").with_attr("class", "lead");
    assert_eq!(p.node_name(), "p");
    assert_eq!(p.attr("class"), Some("lead"));
    assert_eq!(DomNode::text("t").node_name(), "#text");
    assert!(DomNode::text("t").children().is_empty());
}

#[test]
fn test_serde_shape_is_tagged() {
    let node = DomNode::text("hi");
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["type"], "Text");
    assert_eq!(json["content"], "hi");
}
