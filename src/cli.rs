//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::core::render::{OutputFormat, RenderConfig};

/// headmark - attach anchor links to the headings of documentation pages.
#[derive(Parser, Debug)]
#[command(name = "headmark")]
#[command(
    author,
    version,
    about,
    long_about = r#"headmark decorates documentation element trees at build time.

Input is a hast-shaped JSON element tree produced by the markdown pipeline.
Every heading with an id is grouped with a clickable anchor link and a
screen-reader label; headings without an id can be given one first.

Output formats:
- html: serialized markup (default)
- json: the transformed element tree

Examples:
    headmark decorate page.json
    cat page.json | headmark decorate - --format json --pretty
    headmark batch build/trees --out build/html
    headmark label "A & B"
    headmark config locales
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
Relative input/output paths and the default headmark.toml are resolved against it."
    )]
    pub root: PathBuf,

    /// Configuration file (defaults to ROOT/headmark.toml when present).
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "HEADMARK_CONFIG",
        long_help = "Path to a TOML configuration file.\n\n\
If omitted, ROOT/headmark.toml is used when it exists, built-in defaults otherwise.\n\
Unknown keys are rejected."
    )]
    pub config: Option<PathBuf>,

    /// Output format (html/json).
    #[arg(
        long,
        global = true,
        default_value = "html",
        value_parser = ["html", "json"],
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- html (default)\n\
- json"
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors and suppress the batch summary. Results are still\n\
printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log per-document and per-stage details to stderr. RUST_LOG overrides\n\
this when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON output with indentation for human readability.\n\n\
Has no effect on html output."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decorate the headings of one element tree.
    #[command(
        long_about = "Read one JSON element tree, run the configured stages (slug, then\n\
autolink-headings by default) and print the result.\n\n\
Any malformed heading fails the command; no partial output is printed.\n\n\
Examples:\n\
  headmark decorate page.json\n\
  headmark decorate - < page.json\n"
    )]
    Decorate {
        /// Element tree file (relative to ROOT), or '-' for stdin.
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Decorate every element tree under a directory.
    #[command(
        long_about = "Transform every *.json element tree under DIR and write the results to\n\
the same relative paths under --out, with the extension of the output format.\n\n\
If any document fails to parse or decorate, nothing is written and the command\n\
exits with an error. Every document is rendered before the first file is written.\n\n\
Example:\n\
  headmark batch build/trees --out build/html\n"
    )]
    Batch {
        /// Directory containing element trees.
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory.
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },

    /// Print the screen-reader label for a heading text.
    #[command(
        long_about = "Build the hidden 'Section titled ...' label exactly as the decorator does.\n\n\
Example:\n\
  headmark label \"A & B\"\n"
    )]
    Label {
        /// Heading plain text.
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Inspect the resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration as JSON.
    Show,

    /// Print the sitemap locale table (site language -> BCP-47 tag) as JSON.
    Locales,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    let config = Config::load(&root, cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Decorate { input } => {
            crate::backends::decorate::run_decorate(&root, &config, &input, render_config)
        }

        Commands::Batch { input, out } => crate::backends::batch::run_batch(
            &root,
            &config,
            &input,
            &out,
            render_config,
            cli.quiet,
        ),

        Commands::Label { text } => crate::anchors::api::run_label(&text, render_config),

        Commands::Config { action } => match action {
            ConfigCommands::Show => crate::config::run_show(&config, cli.pretty),
            ConfigCommands::Locales => crate::i18n::run_locales(&config, cli.pretty),
        },
    }
}
