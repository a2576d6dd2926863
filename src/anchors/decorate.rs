//! Heading anchor decoration
//!
//! Walks a document tree and attaches an anchor link to every heading that
//! carries an `id`. The link wraps whatever the content function produces;
//! for `before`/`after` placement the heading and link are grouped inside
//! the element produced by the wrapper function.
//!
//! Styling contract (consumed by the site stylesheet):
//! - wrapper: `heading-wrapper level-<tag>`
//! - link: `anchor-link`
//! - icon: `anchor-icon`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::trace;

use crate::anchors::icon::anchor_link_icon;
use crate::anchors::label::sr_only_label;
use crate::core::html::element_text;
use crate::core::tree::{h, Element, Node, PropertyValue};

/// Where the anchor link goes relative to the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// First child of the heading
    Prepend,
    /// Last child of the heading
    Append,
    /// Sibling before the heading, grouped in a wrapper
    Before,
    /// Sibling after the heading, grouped in a wrapper
    #[default]
    After,
}

/// What to do with a heading that has no usable id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    /// Leave the heading untouched
    #[default]
    Skip,
    /// Fail the whole document
    Error,
}

/// Options for the autolink stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutolinkOptions {
    pub behavior: Behavior,
    pub link_class: String,
    pub missing_id: MissingIdPolicy,
}

impl Default for AutolinkOptions {
    fn default() -> Self {
        Self {
            behavior: Behavior::After,
            link_class: "anchor-link".to_string(),
            missing_id: MissingIdPolicy::Skip,
        }
    }
}

/// Malformed heading input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecorateError {
    #[error("<{tag}> heading \"{text}\" has no id")]
    MissingId { tag: String, text: String },

    #[error("<{tag}> heading has a non-string id: {found}")]
    MalformedId { tag: String, found: String },
}

/// Counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecorateStats {
    pub decorated: usize,
    pub skipped: usize,
}

/// Wrapper used by the docs site: `div.heading-wrapper.level-<tag>`, not focusable
pub fn docs_wrapper(tag_name: &str) -> Element {
    h(&format!("div.heading-wrapper.level-{}", tag_name)).with_property("tabindex", -1i64)
}

/// Link content used by the docs site: hidden icon followed by the screen-reader label
pub fn docs_content(heading: &Element) -> Vec<Node> {
    vec![
        h("span.anchor-icon")
            .with_property("aria-hidden", "true")
            .with_child(anchor_link_icon())
            .into(),
        sr_only_label(&element_text(heading)).into(),
    ]
}

/// Autolinker with the docs-site wrapper and content
pub type DocsAutolink = Autolink<fn(&str) -> Element, fn(&Element) -> Vec<Node>>;

/// Heading anchor decorator
///
/// `group` maps a heading tag name to the wrapper element, `content` maps a
/// heading to the nodes placed inside its link. Swapping either changes the
/// markup without touching the traversal.
#[derive(Clone)]
pub struct Autolink<G, C> {
    options: AutolinkOptions,
    group: G,
    content: C,
}

impl<G, C> fmt::Debug for Autolink<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autolink")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl DocsAutolink {
    pub fn docs(options: AutolinkOptions) -> Self {
        Self {
            options,
            group: docs_wrapper,
            content: docs_content,
        }
    }
}

impl<G, C> Autolink<G, C>
where
    G: Fn(&str) -> Element,
    C: Fn(&Element) -> Vec<Node>,
{
    #[allow(dead_code)]
    pub fn new(options: AutolinkOptions, group: G, content: C) -> Self {
        Self {
            options,
            group,
            content,
        }
    }

    /// Decorate every heading in the tree.
    ///
    /// A tree whose top node is itself a heading is decorated like any other
    /// heading (for `before`/`after` the wrapper becomes the new top node).
    /// Any malformed heading fails the whole document; the tree may be
    /// partially modified when an error is returned and should be discarded.
    pub fn decorate(&self, tree: &mut Node) -> Result<DecorateStats, DecorateError> {
        let mut stats = DecorateStats::default();
        match tree {
            Node::Root { children } => self.visit(children, &mut stats)?,
            other => self.visit(std::slice::from_mut(other), &mut stats)?,
        }
        Ok(stats)
    }

    fn visit(&self, children: &mut [Node], stats: &mut DecorateStats) -> Result<(), DecorateError> {
        for node in children.iter_mut() {
            let Node::Element(el) = node else {
                continue;
            };

            if el.heading_level().is_none() {
                self.visit(&mut el.children, stats)?;
                continue;
            }

            // Headings are leaves for our purposes: no nested traversal.
            let Some(id) = self.heading_id(el)? else {
                trace!(tag = %el.tag_name, "skipping heading without id");
                stats.skipped += 1;
                continue;
            };

            let link = self.link(&id, el);
            match self.options.behavior {
                Behavior::Append => el.children.push(link.into()),
                Behavior::Prepend => el.children.insert(0, link.into()),
                Behavior::Before | Behavior::After => {
                    let wrapper = (self.group)(&el.tag_name);
                    let heading = Node::Element(std::mem::replace(el, wrapper));
                    let grouped = if self.options.behavior == Behavior::After {
                        vec![heading, link.into()]
                    } else {
                        vec![link.into(), heading]
                    };
                    el.children.extend(grouped);
                }
            }
            stats.decorated += 1;
        }
        Ok(())
    }

    /// Resolve the heading id according to the missing-id policy
    fn heading_id(&self, heading: &Element) -> Result<Option<String>, DecorateError> {
        match heading.property("id") {
            Some(PropertyValue::Text(id)) if !id.is_empty() => Ok(Some(id.clone())),
            Some(PropertyValue::Text(_)) | None => match self.options.missing_id {
                MissingIdPolicy::Skip => Ok(None),
                MissingIdPolicy::Error => Err(DecorateError::MissingId {
                    tag: heading.tag_name.clone(),
                    text: element_text(heading),
                }),
            },
            Some(other) => Err(DecorateError::MalformedId {
                tag: heading.tag_name.clone(),
                found: other.to_string(),
            }),
        }
    }

    fn link(&self, id: &str, heading: &Element) -> Element {
        h("a")
            .with_property("class", vec![self.options.link_class.clone()])
            .with_property("href", format!("#{}", id))
            .with_children((self.content)(heading))
    }
}
