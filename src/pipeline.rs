//! Tree-transform pipeline
//!
//! An explicit, ordered list of stages applied to each document. Stages run
//! in configuration order and the first failure aborts the document.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::anchors::decorate::{AutolinkOptions, DecorateError, DocsAutolink};
use crate::anchors::slug::assign_ids;
use crate::core::tree::Node;

/// A single tree transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Assign ids to headings that lack one
    Slug,
    /// Attach anchor links to headings with an id
    AutolinkHeadings,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Slug => f.write_str("slug"),
            Stage::AutolinkHeadings => f.write_str("autolink-headings"),
        }
    }
}

/// Default stage order: ids first, then anchors
pub fn default_stages() -> Vec<Stage> {
    vec![Stage::Slug, Stage::AutolinkHeadings]
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("stage '{0}' is listed more than once")]
    DuplicateStage(Stage),

    #[error(transparent)]
    Decorate(#[from] DecorateError),
}

/// What happened to one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub ids_assigned: usize,
    pub decorated: usize,
    pub skipped: usize,
}

impl RunReport {
    pub fn merge(&mut self, other: RunReport) {
        self.ids_assigned += other.ids_assigned;
        self.decorated += other.decorated;
        self.skipped += other.skipped;
    }
}

/// Ordered stage list plus the state each stage needs
///
/// Holds no per-document state, so one pipeline can serve documents on
/// several threads at once.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
    autolink: DocsAutolink,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>, autolink: AutolinkOptions) -> Result<Self, PipelineError> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(*stage) {
                return Err(PipelineError::DuplicateStage(*stage));
            }
        }

        Ok(Self {
            stages,
            autolink: DocsAutolink::docs(autolink),
        })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage over one document
    pub fn run(&self, tree: &mut Node) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::default();

        for stage in &self.stages {
            match stage {
                Stage::Slug => {
                    let stats = assign_ids(tree);
                    debug!(assigned = stats.assigned, kept = stats.kept, "slug stage done");
                    report.ids_assigned += stats.assigned;
                }
                Stage::AutolinkHeadings => {
                    let stats = self.autolink.decorate(tree)?;
                    debug!(
                        decorated = stats.decorated,
                        skipped = stats.skipped,
                        "autolink stage done"
                    );
                    report.decorated += stats.decorated;
                    report.skipped += stats.skipped;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::decorate::MissingIdPolicy;
    use crate::core::html::to_html;
    use crate::core::tree::h;

    fn page() -> Node {
        Node::root(vec![
            h("h1").with_text("Getting Started").into(),
            h("h2").with_property("id", "install").with_text("Install").into(),
        ])
    }

    #[test]
    fn test_default_pipeline_slugs_then_decorates() {
        let pipeline = Pipeline::new(default_stages(), AutolinkOptions::default()).unwrap();
        let mut tree = page();
        let report = pipeline.run(&mut tree).unwrap();
        assert_eq!(
            report,
            RunReport {
                ids_assigned: 1,
                decorated: 2,
                skipped: 0
            }
        );
        assert!(to_html(&tree).contains(r##"href="#getting-started""##));
    }

    #[test]
    fn test_autolink_only_skips_unslugged() {
        let pipeline =
            Pipeline::new(vec![Stage::AutolinkHeadings], AutolinkOptions::default()).unwrap();
        let mut tree = page();
        let report = pipeline.run(&mut tree).unwrap();
        assert_eq!(report.decorated, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_autolink_before_slug_sees_no_ids() {
        let options = AutolinkOptions {
            missing_id: MissingIdPolicy::Error,
            ..Default::default()
        };
        let pipeline = Pipeline::new(vec![Stage::AutolinkHeadings, Stage::Slug], options).unwrap();
        let err = pipeline.run(&mut page()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Decorate(DecorateError::MissingId { .. })
        ));
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let err = Pipeline::new(
            vec![Stage::Slug, Stage::AutolinkHeadings, Stage::Slug],
            AutolinkOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, PipelineError::DuplicateStage(Stage::Slug));
        assert_eq!(err.to_string(), "stage 'slug' is listed more than once");
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new(Vec::new(), AutolinkOptions::default()).unwrap();
        let mut tree = page();
        pipeline.run(&mut tree).unwrap();
        assert_eq!(tree, page());
    }

    #[test]
    fn test_report_merge() {
        let mut total = RunReport::default();
        total.merge(RunReport {
            ids_assigned: 1,
            decorated: 2,
            skipped: 3,
        });
        total.merge(RunReport {
            ids_assigned: 1,
            decorated: 1,
            skipped: 0,
        });
        assert_eq!(
            total,
            RunReport {
                ids_assigned: 2,
                decorated: 3,
                skipped: 3
            }
        );
    }
}
