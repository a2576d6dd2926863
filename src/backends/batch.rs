//! Directory decoration
//!
//! Transforms every `*.json` element tree under a directory and writes the
//! results to a mirrored layout under the output directory. Every document
//! is read, decorated and rendered before the first file is written, so a bad
//! input leaves the output directory untouched. An I/O error while writing
//! stops the batch and may leave the files written before it in place.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::backends::decorate::{decorate_tree, parse_tree};
use crate::config::Config;
use crate::core::paths::{has_extension, make_relative, mirrored_output, resolve};
use crate::core::render::{RenderConfig, Renderer};
use crate::pipeline::{Pipeline, RunReport};

/// One input document
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    /// Path relative to the input directory, '/' separated
    pub relative: String,
}

/// One rendered document, ready to write
#[derive(Debug)]
pub struct Rendered {
    pub target: PathBuf,
    pub output: String,
    pub report: RunReport,
}

/// Batch totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub report: RunReport,
}

/// Find all element tree files under `dir`, sorted by path
pub fn discover(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, "json") {
            continue;
        }
        let Some(relative) = make_relative(path, dir) else {
            continue;
        };
        documents.push(Document {
            path: path.to_path_buf(),
            relative,
        });
    }

    Ok(documents)
}

fn render_document(
    pipeline: &Pipeline,
    renderer: &Renderer,
    out_dir: &Path,
    doc: &Document,
) -> Result<Rendered> {
    let contents = std::fs::read_to_string(&doc.path)
        .with_context(|| format!("failed to read {}", doc.path.display()))?;
    let tree = parse_tree(&contents, &doc.relative)?;
    let (output, report) = decorate_tree(pipeline, tree, renderer, &doc.relative)?;
    debug!(
        decorated = report.decorated,
        skipped = report.skipped,
        "rendered {}",
        doc.relative
    );
    Ok(Rendered {
        target: mirrored_output(out_dir, &doc.relative, renderer.format().extension()),
        output,
        report,
    })
}

#[cfg(feature = "parallel")]
fn render_all(
    pipeline: &Pipeline,
    renderer: &Renderer,
    out_dir: &Path,
    documents: &[Document],
) -> Result<Vec<Rendered>> {
    documents
        .par_iter()
        .map(|doc| render_document(pipeline, renderer, out_dir, doc))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn render_all(
    pipeline: &Pipeline,
    renderer: &Renderer,
    out_dir: &Path,
    documents: &[Document],
) -> Result<Vec<Rendered>> {
    documents
        .iter()
        .map(|doc| render_document(pipeline, renderer, out_dir, doc))
        .collect()
}

/// Transform every document under `input` into `out_dir`
///
/// Files are written in discovery order once all documents have rendered.
pub fn decorate_dir(
    pipeline: &Pipeline,
    renderer: &Renderer,
    input: &Path,
    out_dir: &Path,
) -> Result<BatchSummary> {
    let documents = discover(input)?;
    let rendered = render_all(pipeline, renderer, out_dir, &documents)?;

    let mut summary = BatchSummary::default();
    for doc in rendered {
        if let Some(parent) = doc.target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&doc.target, &doc.output)
            .with_context(|| format!("failed to write {}", doc.target.display()))?;
        summary.documents += 1;
        summary.report.merge(doc.report);
    }

    Ok(summary)
}

/// Run the batch command
pub fn run_batch(
    root: &Path,
    config: &Config,
    input: &Path,
    out_dir: &Path,
    render_config: RenderConfig,
    quiet: bool,
) -> Result<()> {
    let pipeline = config.pipeline()?;
    let renderer = Renderer::with_config(render_config);
    let input = resolve(root, input);
    let out_dir = resolve(root, out_dir);

    let summary = decorate_dir(&pipeline, &renderer, &input, &out_dir)?;

    if !quiet {
        eprintln!(
            "{} {} documents: {} headings decorated, {} skipped, {} ids assigned",
            "✓".green(),
            summary.documents,
            summary.report.decorated,
            summary.report.skipped,
            summary.report.ids_assigned
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::OutputFormat;
    use std::fs;
    use tempfile::tempdir;

    fn page(id: &str, text: &str) -> String {
        format!(
            r#"{{"type":"root","children":[{{"type":"element","tagName":"h2","properties":{{"id":"{}"}},"children":[{{"type":"text","value":"{}"}}]}}]}}"#,
            id, text
        )
    }

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_discover_sorted_json_only() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("b.json"), "{}");
        write(&temp.path().join("a.json"), "{}");
        write(&temp.path().join("notes.txt"), "x");
        write(&temp.path().join("en/guide.json"), "{}");

        let docs = discover(temp.path()).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.relative.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json", "en/guide.json"]);
    }

    #[test]
    fn test_decorate_dir_mirrors_layout() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("in");
        let out = temp.path().join("out");
        write(&input.join("intro.json"), &page("intro", "Intro"));
        write(&input.join("de/setup.json"), &page("setup", "Setup"));

        let pipeline = Config::default().pipeline().unwrap();
        let renderer = Renderer::with_config(RenderConfig::default());
        let summary = decorate_dir(&pipeline, &renderer, &input, &out).unwrap();

        assert_eq!(summary.documents, 2);
        assert_eq!(summary.report.decorated, 2);
        let html = fs::read_to_string(out.join("de").join("setup.html")).unwrap();
        assert!(html.contains(r##"href="#setup""##));
        assert!(out.join("intro.html").is_file());
    }

    #[test]
    fn test_decorate_dir_writes_json_when_asked() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("in");
        let out = temp.path().join("out");
        write(&input.join("intro.json"), &page("intro", "Intro"));

        let pipeline = Config::default().pipeline().unwrap();
        let renderer = Renderer::with_config(RenderConfig::with_pretty(OutputFormat::Json, true));
        decorate_dir(&pipeline, &renderer, &input, &out).unwrap();
        assert!(out.join("intro.json").is_file());
    }

    #[test]
    fn test_one_bad_document_fails_the_batch() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("in");
        let out = temp.path().join("out");
        write(&input.join("a.json"), &page("a", "A"));
        write(&input.join("b.json"), r#"{"type":"root","children":[{"type":"nope"}]}"#);

        let pipeline = Config::default().pipeline().unwrap();
        let renderer = Renderer::with_config(RenderConfig::default());
        let err = decorate_dir(&pipeline, &renderer, &input, &out).unwrap_err();
        assert!(err.to_string().contains("b.json"));
        assert!(!out.exists());
    }

    #[test]
    fn test_write_error_stops_the_batch() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("in");
        let out = temp.path().join("out");
        write(&input.join("a.json"), &page("a", "A"));
        write(&input.join("b/c.json"), &page("c", "C"));
        // A plain file where the `b/` output directory has to go
        write(&out.join("b"), "occupied");

        let pipeline = Config::default().pipeline().unwrap();
        let renderer = Renderer::with_config(RenderConfig::default());
        let err = decorate_dir(&pipeline, &renderer, &input, &out).unwrap_err();

        assert!(err.to_string().contains("failed to create"), "{}", err);
        assert!(out.join("a.html").is_file());
        assert_eq!(fs::read_to_string(out.join("b")).unwrap(), "occupied");
    }
}
