//! Anchors module - Heading anchor links for documentation pages
//!
//! Every heading with an id gets a clickable link to itself plus a hidden
//! label for screen readers:
//! <div class="heading-wrapper level-h2" tabindex="-1"><h2 id="x">X</h2><a class="anchor-link" href="#x">...</a></div>

pub mod api;
pub mod decorate;
pub mod icon;
pub mod label;
pub mod slug;
