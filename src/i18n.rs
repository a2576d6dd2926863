//! Sitemap locale table
//!
//! Site language keys are lowercase directory names (`en`, `pt-br`,
//! `zh-cn`); the sitemap wants BCP-47 tags (`pt-BR`, `zh-CN`).

use anyhow::Result;
use std::collections::BTreeMap;

use crate::config::Config;

/// Normalize the casing of a BCP-47 language tag.
///
/// - primary language: lowercase
/// - 4-letter script: titlecase
/// - 2-letter or 3-digit region: uppercase
/// - anything else: lowercase
pub fn normalize_lang_tag(tag: &str) -> String {
    let tag = tag.trim().replace('_', "-");
    tag.split('-')
        .enumerate()
        .map(|(i, part)| normalize_subtag(i, part))
        .collect::<Vec<_>>()
        .join("-")
}

fn normalize_subtag(index: usize, part: &str) -> String {
    if index == 0 {
        return part.to_ascii_lowercase();
    }
    let is_alpha = part.chars().all(|c| c.is_ascii_alphabetic());
    let is_digit = part.chars().all(|c| c.is_ascii_digit());
    match part.len() {
        4 if is_alpha => {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => lower,
            }
        }
        2 if is_alpha => part.to_ascii_uppercase(),
        3 if is_digit => part.to_string(),
        _ => part.to_ascii_lowercase(),
    }
}

/// Map of site language key to sitemap locale tag
pub fn locale_table<S: AsRef<str>>(locales: &[S]) -> BTreeMap<String, String> {
    locales
        .iter()
        .map(|lang| {
            let lang = lang.as_ref();
            (lang.to_string(), normalize_lang_tag(lang))
        })
        .collect()
}

/// Run the `config locales` command
pub fn run_locales(config: &Config, pretty: bool) -> Result<()> {
    let table = locale_table(&config.sitemap.i18n.locales);
    let output = if pretty {
        serde_json::to_string_pretty(&table)?
    } else {
        serde_json::to_string(&table)?
    };
    println!("{}", output);
    Ok(())
}
