//! Anchor fragment commands

use anyhow::Result;

use crate::anchors::label::sr_only_label;
use crate::core::render::{RenderConfig, Renderer};

/// Run the label command: print the screen-reader label for a heading text
pub fn run_label(text: &str, render_config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&sr_only_label(text).into())?);
    Ok(())
}
