//! Single-document decoration
//!
//! Reads one element tree (a file or stdin), runs the pipeline and prints the result.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::paths::resolve;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::tree::Node;
use crate::pipeline::{Pipeline, RunReport};

/// Parse an element tree from JSON text
pub fn parse_tree(contents: &str, source: &str) -> Result<Node> {
    serde_json::from_str(contents)
        .with_context(|| format!("failed to parse element tree from {}", source))
}

/// Read an element tree from a file, or stdin for `-`
pub fn read_tree(root: &Path, input: &Path) -> Result<Node> {
    if input == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read element tree from stdin")?;
        return parse_tree(&contents, "stdin");
    }

    let path = resolve(root, input);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_tree(&contents, &path.display().to_string())
}

/// Run the pipeline over one tree and render it
pub fn decorate_tree(
    pipeline: &Pipeline,
    mut tree: Node,
    renderer: &Renderer,
    source: &str,
) -> Result<(String, RunReport)> {
    let report = pipeline
        .run(&mut tree)
        .with_context(|| format!("failed to decorate {}", source))?;
    let output = renderer
        .render(&tree)
        .with_context(|| format!("failed to render {}", source))?;
    Ok((output, report))
}

/// Run the decorate command
pub fn run_decorate(
    root: &Path,
    config: &Config,
    input: &Path,
    render_config: RenderConfig,
) -> Result<()> {
    let pipeline = config.pipeline()?;
    debug!(stages = ?pipeline.stages(), "pipeline ready");
    let tree = read_tree(root, input)?;
    let renderer = Renderer::with_config(render_config);

    let source = input.display().to_string();
    let (output, report) = decorate_tree(&pipeline, tree, &renderer, &source)?;
    info!(
        decorated = report.decorated,
        skipped = report.skipped,
        ids_assigned = report.ids_assigned,
        "decorated {}",
        source
    );

    println!("{}", output);
    Ok(())
}
