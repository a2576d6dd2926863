//! Path normalization utilities
//!
//! Ensures all reported paths use '/' as separator and are relative to the batch input directory.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve a user-supplied path against the root (absolute paths pass through)
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Output location for a document: `relative` under `out_dir`, with its extension swapped
pub fn mirrored_output(out_dir: &Path, relative: &str, extension: &str) -> PathBuf {
    let mut target = out_dir.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR));
    target.set_extension(extension);
    target
}

/// Check if a path has the given extension (case-insensitive)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("guides/install.json");
        assert_eq!(normalize_path(path), "guides/install.json");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/site/pages");
        let path = Path::new("/site/pages/en/intro.json");
        assert_eq!(make_relative(path, root), Some("en/intro.json".to_string()));
        assert_eq!(make_relative(Path::new("/elsewhere/x.json"), root), None);
    }

    #[test]
    fn test_resolve() {
        let root = Path::new("/site");
        assert_eq!(resolve(root, Path::new("a.json")), PathBuf::from("/site/a.json"));
        assert_eq!(resolve(root, Path::new("/abs/a.json")), PathBuf::from("/abs/a.json"));
    }

    #[test]
    fn test_mirrored_output() {
        let out = mirrored_output(Path::new("/out"), "en/intro.json", "html");
        assert_eq!(out, Path::new("/out").join("en").join("intro.html"));
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.JSON"), "json"));
        assert!(!has_extension(Path::new("a/b.html"), "json"));
        assert!(!has_extension(Path::new("a/json"), "json"));
    }
}
