//! Anchor link icon fragment

use crate::core::tree::{h, Element};

/// 16x16 chain-link glyph
const LINK_PATH: &str = "M4 9h1v1H4c-1.5 0-3-1.69-3-3.5S2.55 3 4 3h4c1.45 0 3 1.69 3 3.5 0 1.41-.91 2.72-2 3.25V8.59c.58-.45 1-1.27 1-2.09C10 5.22 8.98 4 8 4H4c-.98 0-2 1.22-2 2.5S3 9 4 9zm9-3h-1v1h1c1 0 2 1.22 2 2.5S13.98 12 13 12H9c-.98 0-2-1.22-2-2.5 0-.83.42-1.64 1-2.09V6.25c-1.09.53-2 1.84-2 3.25C6 11.31 7.55 13 9 13h4c1.45 0 3-1.69 3-3.5S14.5 6 13 6z";

/// Build the anchor link icon. Every call returns a fresh tree.
pub fn anchor_link_icon() -> Element {
    h("svg")
        .with_property("width", 16i64)
        .with_property("height", 16i64)
        .with_property("version", "1.1")
        .with_property("viewBox", "0 0 16 16")
        .with_property("xmlns", "http://www.w3.org/2000/svg")
        .with_child(
            h("path")
                .with_property("fill-rule", "evenodd")
                .with_property("fill", "currentcolor")
                .with_property("d", LINK_PATH),
        )
}
