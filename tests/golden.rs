//! Golden tests for headmark
//!
//! These tests run the binary against the fixtures under tests/fixtures and
//! verify:
//! - Byte-stable HTML output across builds
//! - Slug assignment and anchor decoration working together
//! - Fixture configuration being honored (strict mode, locales)

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// The sample documentation site
fn site() -> PathBuf {
    fixtures_dir().join("site")
}

/// Create a command for running the headmark binary
fn headmark_cmd() -> Command {
    Command::cargo_bin("headmark").expect("Failed to find headmark binary")
}

fn decorate_site_page(page: &str) -> String {
    let mut cmd = headmark_cmd();
    cmd.arg("--root").arg(site()).arg("decorate").arg(page);

    let output = cmd.output().expect("failed to execute");
    assert!(
        output.status.success(),
        "decorate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Decorate Tests ====================

    #[test]
    fn golden_getting_started_html() {
        let actual = decorate_site_page("pages/getting-started.json");
        let expected =
            fs::read_to_string(site().join("expected").join("getting-started.html")).unwrap();
        assert_eq!(actual.trim_end(), expected.trim_end());
    }

    #[test]
    fn golden_output_is_deterministic() {
        let first = decorate_site_page("pages/getting-started.json");
        let second = decorate_site_page("pages/getting-started.json");
        assert_eq!(first, second);
    }

    #[test]
    fn golden_heading_text_survives_decoration() {
        let html = decorate_site_page("pages/getting-started.json");
        assert!(html.contains(r#"<h3 id="x-y">A &amp; B</h3>"#));
        assert!(html.contains(r#"<h2 id="f">Foo <code>bar</code></h2>"#));
        assert!(html.contains("Section titled Foo bar"));
    }

    #[test]
    fn golden_non_ascii_slug() {
        let html = decorate_site_page("pages/de/einstieg.json");
        assert!(html.contains(r#"<h1 id="einstieg">Einstieg</h1>"#));
        assert!(html.contains(r#"<h2 class="intro" id="überblick">Überblick</h2>"#));
        assert!(html.contains(r##"href="#überblick""##));
    }

    // ==================== Batch Tests ====================

    #[test]
    fn golden_batch_matches_single_decorate() {
        let out = tempdir().unwrap();

        let mut cmd = headmark_cmd();
        cmd.arg("--root")
            .arg(site())
            .arg("-q")
            .arg("batch")
            .arg("pages")
            .arg("--out")
            .arg(out.path());
        cmd.assert().success();

        let batch = fs::read_to_string(out.path().join("getting-started.html")).unwrap();
        let expected =
            fs::read_to_string(site().join("expected").join("getting-started.html")).unwrap();
        assert_eq!(batch.trim_end(), expected.trim_end());
        assert!(out.path().join("de").join("einstieg.html").is_file());
    }

    // ==================== Config Tests ====================

    #[test]
    fn golden_strict_fixture_fails_build() {
        let strict = fixtures_dir().join("strict");

        let mut cmd = headmark_cmd();
        cmd.arg("--root").arg(&strict).arg("decorate").arg("page.json");

        let output = cmd.output().expect("failed to execute");
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Broken heading"), "stderr: {}", stderr);
    }

    #[test]
    fn golden_site_locales() {
        let mut cmd = headmark_cmd();
        cmd.arg("--root").arg(site()).arg("config").arg("locales");

        let output = cmd.output().expect("failed to execute");
        let table: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            table,
            serde_json::json!({
                "de": "de",
                "en": "en",
                "pt-br": "pt-BR",
                "zh-cn": "zh-CN",
            })
        );
    }
}
