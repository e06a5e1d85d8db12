//! Owned tree back to markup.

use super::{Element, Node};
use quick_xml::escape::{escape, partial_escape};

/// Append `el` and its subtree to `out`. Childless elements are self-closed.
pub(super) fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for node in &el.children {
        match node {
            Node::Element(child) => write_element(child, out),
            Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
