//! Configuration file loading and parsing.
//!
//! Settings live in `headmark.toml` under the root directory (or the file
//! given with `--config`). A missing default file means defaults; any key
//! we do not recognize is an error rather than being silently ignored.
//!
//! ```toml
//! site = "https://docs.astro.build/"
//!
//! [markdown]
//! rehype_plugins = ["slug", "autolink-headings"]
//!
//! [markdown.autolink]
//! behavior = "after"
//! link_class = "anchor-link"
//! missing_id = "skip"
//!
//! [sitemap.i18n]
//! default_locale = "en"
//! locales = ["en", "de", "pt-br"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::anchors::decorate::AutolinkOptions;
use crate::pipeline::{default_stages, Pipeline, PipelineError, Stage};

/// Default config file name, looked up in the root directory
pub const CONFIG_FILE: &str = "headmark.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("markdown.autolink.link_class must not be empty")]
    EmptyLinkClass,

    #[error("sitemap.i18n.default_locale '{0}' is not listed in sitemap.i18n.locales")]
    UnknownDefaultLocale(String),

    #[error("markdown.rehype_plugins: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Public base URL of the site
    pub site: String,
    pub markdown: MarkdownConfig,
    pub sitemap: SitemapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: "https://docs.astro.build/".to_string(),
            markdown: MarkdownConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

/// Markdown tree-transform settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Stages to run, in order
    pub rehype_plugins: Vec<Stage>,
    pub autolink: AutolinkOptions,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            rehype_plugins: default_stages(),
            autolink: AutolinkOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    pub default_locale: String,
    /// Site language keys
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: Vec::new(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `headmark.toml` in `root`
    /// is used when present, defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => crate::core::paths::resolve(root, p),
            None => {
                let candidate = root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    debug!("no {} under {}, using defaults", CONFIG_FILE, root.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_toml_str(&contents, &path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markdown.autolink.link_class.trim().is_empty() {
            return Err(ConfigError::EmptyLinkClass);
        }

        let i18n = &self.sitemap.i18n;
        if !i18n.locales.is_empty() && !i18n.locales.contains(&i18n.default_locale) {
            return Err(ConfigError::UnknownDefaultLocale(
                i18n.default_locale.clone(),
            ));
        }

        self.pipeline()?;
        Ok(())
    }

    /// Build the transform pipeline described by this config
    pub fn pipeline(&self) -> Result<Pipeline, PipelineError> {
        Pipeline::new(
            self.markdown.rehype_plugins.clone(),
            self.markdown.autolink.clone(),
        )
    }
}

/// Run the `config show` command
pub fn run_show(config: &Config, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(config)?
    } else {
        serde_json::to_string(config)?
    };
    println!("{}", output);
    Ok(())
}
