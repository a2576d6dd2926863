//! Heading id assignment
//!
//! Gives every heading without an id a github-style slug of its text:
//! lowercased, punctuation stripped, spaces turned into dashes. Repeats get
//! `-1`, `-2`, ... suffixes. Ids already present in the document are
//! reserved first so generated slugs never collide with them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::core::html::element_text;
use crate::core::tree::{Node, PropertyValue};

/// Everything that is not a letter, mark, number, connector, dash or space
static STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc}\- ]").expect("Invalid STRIP_RE regex")
});

/// Slug a piece of text without deduplication
pub fn slugify(text: &str) -> String {
    STRIP_RE
        .replace_all(&text.to_lowercase(), "")
        .replace(' ', "-")
}

/// Per-document slug generator
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an existing id as taken
    pub fn reserve(&mut self, id: &str) {
        self.occurrences.entry(id.to_string()).or_insert(0);
    }

    /// Unique slug for `text`
    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut slug = original.clone();

        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", original, count);
        }

        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

/// Counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlugStats {
    /// Headings that received a generated id
    pub assigned: usize,
    /// Headings that already had an id
    pub kept: usize,
}

/// Assign ids to all headings in the tree that lack one.
///
/// Headings whose text slugs to the empty string are left without an id.
pub fn assign_ids(tree: &mut Node) -> SlugStats {
    let mut slugger = Slugger::new();
    let mut stats = SlugStats::default();

    reserve_existing(std::slice::from_ref(tree), &mut slugger, &mut stats);
    assign(std::slice::from_mut(tree), &mut slugger, &mut stats);
    stats
}

fn reserve_existing(nodes: &[Node], slugger: &mut Slugger, stats: &mut SlugStats) {
    for child in nodes {
        if let Node::Element(el) = child {
            if el.heading_level().is_some() {
                if let Some(PropertyValue::Text(id)) = el.property("id") {
                    if !id.is_empty() {
                        slugger.reserve(id);
                        stats.kept += 1;
                    }
                }
                continue;
            }
        }
        if let Some(children) = child.children() {
            reserve_existing(children, slugger, stats);
        }
    }
}

fn assign(nodes: &mut [Node], slugger: &mut Slugger, stats: &mut SlugStats) {
    for child in nodes.iter_mut() {
        if let Node::Element(el) = child {
            if el.heading_level().is_some() {
                let has_id = match el.property("id") {
                    Some(PropertyValue::Text(id)) => !id.is_empty(),
                    Some(_) => true,
                    None => false,
                };
                if !has_id {
                    let slug = slugger.slug(&element_text(el));
                    if !slug.is_empty() {
                        el.properties
                            .insert("id".to_string(), PropertyValue::Text(slug));
                        stats.assigned += 1;
                    }
                }
                continue;
            }
        }
        if let Some(children) = child.children_mut() {
            assign(children, slugger, stats);
        }
    }
}
