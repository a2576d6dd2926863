//! Element tree model
//!
//! A hast-shaped document tree: the upstream markdown pipeline hands us one
//! of these per page and every transform stage works on it in place.
//!
//! JSON shape:
//! {"type":"root","children":[{"type":"element","tagName":"h2","properties":{"id":"x"},"children":[...]}]}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One node of the element tree
///
/// Fields the upstream pipeline attaches that we have no use for
/// (`position`, `data`) are ignored on input. Unknown node types are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root {
        #[serde(default)]
        children: Vec<Node>,
    },
    Element(Element),
    Text {
        value: String,
    },
    /// Pre-escaped markup, written out verbatim by the serializer
    Raw {
        value: String,
    },
    Comment {
        value: String,
    },
}

impl Node {
    #[allow(dead_code)]
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw {
            value: value.into(),
        }
    }

    /// Child list of a root or element, `None` for leaf nodes
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root { children } => Some(children),
            Node::Element(el) => Some(&el.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children } => Some(children),
            Node::Element(el) => Some(&mut el.children),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Property value as found in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// Space-separated token list (class names)
    List(Vec<String>),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n.into())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::List(items)
    }
}

/// An element node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "tagName")]
    pub tag_name: String,

    /// Sorted so serialization never depends on insertion order
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a property
    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a text child
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::text(text))
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Class names, in declaration order
    #[allow(dead_code)]
    pub fn classes(&self) -> Vec<&str> {
        match self.properties.get("class") {
            Some(PropertyValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(PropertyValue::Text(s)) => s.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// Heading rank for h1..h6
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag_name.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}

/// Hyperscript-style element constructor
///
/// Accepts a selector of the form `tag.class-a.class-b#id`. An empty tag
/// defaults to `div`.
pub fn h(selector: &str) -> Element {
    let mut tag = String::new();
    let mut classes = Vec::new();
    let mut id = None;

    let mut current = String::new();
    let mut kind = '\0';
    for ch in selector.chars().chain(std::iter::once('.')) {
        if ch == '.' || ch == '#' {
            match kind {
                '\0' => tag = std::mem::take(&mut current),
                '.' if !current.is_empty() => classes.push(std::mem::take(&mut current)),
                '#' if !current.is_empty() => id = Some(std::mem::take(&mut current)),
                _ => current.clear(),
            }
            kind = ch;
        } else {
            current.push(ch);
        }
    }

    if tag.is_empty() {
        tag = "div".to_string();
    }

    let mut el = Element::new(tag);
    if !classes.is_empty() {
        el = el.with_property("class", classes);
    }
    if let Some(id) = id {
        el = el.with_property("id", id);
    }
    el
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h_parses_tag_and_classes() {
        let el = h("div.heading-wrapper.level-h2");
        assert_eq!(el.tag_name, "div");
        assert_eq!(el.classes(), vec!["heading-wrapper", "level-h2"]);
        assert!(el.property("id").is_none());
    }

    #[test]
    fn test_h_parses_id_and_default_tag() {
        let el = h("#main.wide");
        assert_eq!(el.tag_name, "div");
        assert_eq!(el.classes(), vec!["wide"]);
        assert_eq!(el.property("id"), Some(&PropertyValue::from("main")));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(Element::new("h1").heading_level(), Some(1));
        assert_eq!(Element::new("h6").heading_level(), Some(6));
        assert_eq!(Element::new("h7").heading_level(), None);
        assert_eq!(Element::new("header").heading_level(), None);
    }

    #[test]
    fn test_deserialize_hast_shape() {
        let json = r#"{
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "h2",
                    "properties": {"id": "install", "className": ["title"], "hidden": false},
                    "children": [{"type": "text", "value": "Install"}],
                    "position": {"start": {"line": 1}}
                }
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let children = node.children().unwrap();
        let h2 = children[0].as_element().unwrap();
        assert_eq!(h2.tag_name, "h2");
        assert_eq!(h2.property("id"), Some(&PropertyValue::from("install")));
        assert_eq!(h2.property("hidden"), Some(&PropertyValue::Bool(false)));
        assert_eq!(h2.children, vec![Node::text("Install")]);
    }

    #[test]
    fn test_deserialize_rejects_unknown_node_type() {
        let json = r#"{"type": "doctype-ish", "value": "x"}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn test_number_property_keeps_integer_form() {
        let el = Element::new("div").with_property("tabindex", -1i64);
        let json = serde_json::to_string(&Node::from(el)).unwrap();
        assert!(json.contains(r#""tabindex":-1"#));
    }
}
