//! Screen-reader-only heading label

use crate::core::html::escape_html;
use crate::core::tree::{h, Element, Node};

/// Fixed phrase read before the heading text
pub const LABEL_PREFIX: &str = "Section titled ";

/// Class that hides the label visually while keeping it in the accessibility tree
pub const SR_ONLY_CLASS: &str = "sr-only";

/// Build the hidden label for a heading's plain text.
///
/// The text is escaped here and stored as a raw child so the serializer
/// does not escape it a second time.
pub fn sr_only_label(text: &str) -> Element {
    h("span")
        .with_property("class", vec![SR_ONLY_CLASS.to_string()])
        .with_child(Node::raw(format!("{}{}", LABEL_PREFIX, escape_html(text))))
}
