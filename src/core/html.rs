//! HTML helpers: escaping, plain-text extraction and serialization

use crate::core::tree::{Element, Node, PropertyValue};
use std::borrow::Cow;

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Escape text for embedding in HTML text or a quoted attribute value
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Plain-text content of a node: every descendant text value in document order
#[allow(dead_code)]
pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

/// Plain-text content of an element
pub fn element_text(el: &Element) -> String {
    let mut out = String::new();
    for child in &el.children {
        collect_text(child, &mut out);
    }
    out
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { value } => out.push_str(value),
        Node::Root { children } => children.iter().for_each(|c| collect_text(c, out)),
        Node::Element(el) => el.children.iter().for_each(|c| collect_text(c, out)),
        Node::Raw { .. } | Node::Comment { .. } => {}
    }
}

/// Serialize a node to HTML
///
/// Output is deterministic: properties are written in sorted order.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Root { children } => children.iter().for_each(|c| write_node(c, out)),
        Node::Element(el) => write_element(el, out),
        Node::Text { value } => out.push_str(&escape_html(value)),
        Node::Raw { value } => out.push_str(value),
        Node::Comment { value } => {
            out.push_str("<!--");
            out.push_str(value);
            out.push_str("-->");
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag_name);

    for (name, value) in &el.properties {
        let name = attribute_name(name);
        match value {
            PropertyValue::Bool(false) => continue,
            PropertyValue::Bool(true) => {
                out.push(' ');
                out.push_str(&name);
            }
            other => {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                out.push_str(&escape_html(&other.to_string()));
                out.push('"');
            }
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag_name.as_str()) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS.contains(&el.tag_name.as_str());
    for child in &el.children {
        match child {
            Node::Text { value } if raw_text => out.push_str(value),
            _ => write_node(child, out),
        }
    }

    out.push_str("</");
    out.push_str(&el.tag_name);
    out.push('>');
}

/// Map hast property names to HTML attribute names
///
/// Only the DOM-style names that upstream trees commonly carry are mapped;
/// everything else is written as-is.
fn attribute_name(name: &str) -> Cow<'_, str> {
    match name {
        "className" => Cow::Borrowed("class"),
        "htmlFor" => Cow::Borrowed("for"),
        "tabIndex" => Cow::Borrowed("tabindex"),
        "acceptCharset" => Cow::Borrowed("accept-charset"),
        "httpEquiv" => Cow::Borrowed("http-equiv"),
        // ARIA attribute names are a single lowercase word after the prefix
        _ if is_camel_prefixed(name, "aria") => {
            Cow::Owned(format!("aria-{}", name["aria".len()..].to_ascii_lowercase()))
        }
        _ if is_camel_prefixed(name, "data") => {
            let mut out = String::with_capacity(name.len() + 2);
            for ch in name.chars() {
                if ch.is_ascii_uppercase() {
                    out.push('-');
                    out.push(ch.to_ascii_lowercase());
                } else {
                    out.push(ch);
                }
            }
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(name),
    }
}

fn is_camel_prefixed(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}
