//! Filesystem-based template set loader.
//!
//! Discovers `template.toml` manifests in a directory tree and turns each
//! directory into a domain [`TemplateSet`].
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── configuration/
//! │   ├── template.toml        ← manifest (required)
//! │   ├── .eslintrc.json
//! │   └── .eslintignore
//! └── vscode/
//!     ├── template.toml
//!     └── settings.json
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id          = "configuration"   # defaults to the directory name
//! description = "ESLint and Prettier configuration"
//! ```
//!
//! Every other file becomes an entry. Files containing `{{` are
//! parameterized, everything else is copied verbatim. Where a set is mounted
//! is decided by the preset, not by the set.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use hookgen_core::domain::{DomainError, TemplateContent, TemplateSet};

const MANIFEST_FILE: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplateSection {
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`TemplateSet`]s from a directory of `template.toml` manifests.
///
/// Each immediate subdirectory that contains a valid manifest is one set.
/// Subdirectories without one, or with an invalid one, emit a `WARN` log and
/// are skipped.
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid set under the templates directory, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTemplate`] if the directory is missing or
    /// cannot be read.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<TemplateSet>, DomainError> {
        let dir_error = |reason: String| DomainError::InvalidTemplate {
            id: self.templates_dir.display().to_string(),
            reason,
        };

        if !self.templates_dir.is_dir() {
            return Err(dir_error("templates directory not found".into()));
        }

        let read_dir = fs::read_dir(&self.templates_dir)
            .map_err(|e| dir_error(format!("failed to read templates directory: {e}")))?;

        let mut sets = Vec::new();
        for entry in read_dir {
            let path = entry
                .map_err(|e| dir_error(format!("failed to read directory entry: {e}")))?
                .path();
            if !path.is_dir() {
                continue;
            }

            match load_set_from_dir(&path) {
                Ok(set) => {
                    debug!(id = %set.id, files = set.len(), "loaded template set");
                    sets.push(set);
                }
                Err(e) => {
                    warn!(
                        dir   = %path.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        sets.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = sets.len(), "finished loading template sets");
        Ok(sets)
    }
}

/// Load one set from `dir`.
///
/// # Errors
///
/// Missing or unparsable `template.toml`, unreadable files, or a set that
/// fails validation.
pub fn load_set_from_dir(dir: &Path) -> Result<TemplateSet, DomainError> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let invalid = |reason: String| DomainError::InvalidTemplate {
        id: dir_name.clone(),
        reason,
    };

    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest_path)
        .map_err(|e| invalid(format!("cannot read {MANIFEST_FILE}: {e}")))?;
    let manifest: TemplateManifest = toml::from_str(&raw)
        .map_err(|e| invalid(format!("cannot parse {MANIFEST_FILE}: {e}")))?;

    let id = manifest.template.id.unwrap_or_else(|| dir_name.clone());
    let mut set = TemplateSet::new(id.as_str()).with_description(manifest.template.description);

    for (relative, content) in read_entries(dir).map_err(invalid)? {
        set.push(relative, TemplateContent::from_bytes(content));
    }

    set.validate()?;
    Ok(set)
}

/// Every regular file under `dir` except the manifest, as
/// `(forward-slash relative path, content)` in path order.
pub(crate) fn read_entries(dir: &Path) -> Result<Vec<(String, Vec<u8>)>, String> {
    let mut entries = Vec::new();

    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry.map_err(|e| format!("directory walk error: {e}"))?;
        if !walk_entry.file_type().is_file() {
            continue;
        }

        let abs_path = walk_entry.path();
        let rel = abs_path
            .strip_prefix(dir)
            .map_err(|_| format!("cannot relativise '{}'", abs_path.display()))?;
        if rel == Path::new(MANIFEST_FILE) {
            continue;
        }

        let content = fs::read(abs_path)
            .map_err(|e| format!("failed to read '{}': {e}", rel.display()))?;
        entries.push((normalize_path(&rel.to_string_lossy()), content));
    }

    Ok(entries)
}

/// Normalise a filesystem path to forward slashes.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── helpers ───────────────────────────────────────────────────────────

    fn write(root: &Path, rel: &str, content: &str) {
        let full = root.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    const MANIFEST: &str = r#"
[template]
description = "ESLint configuration"
"#;

    // ── load_all ──────────────────────────────────────────────────────────

    #[test]
    fn load_all_returns_error_for_missing_dir() {
        let loader = FilesystemTemplateLoader::new("/absolutely/does/not/exist");
        assert!(matches!(
            loader.load_all(),
            Err(DomainError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn load_all_skips_top_level_files_and_bad_sets() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "README.md", "# templates");
        write(temp.path(), "bad/.eslintignore", "dist\n");
        write(temp.path(), "configuration/template.toml", MANIFEST);
        write(temp.path(), "configuration/.eslintignore", "node_modules/\n");

        let sets = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id.as_str(), "configuration");
        assert_eq!(sets[0].description, "ESLint configuration");
    }

    // ── single set ────────────────────────────────────────────────────────

    #[test]
    fn explicit_id_overrides_directory_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "template.toml", "[template]\nid = \"vscode\"\n");
        write(temp.path(), "settings.json", "{}\n");

        let set = load_set_from_dir(temp.path()).unwrap();
        assert_eq!(set.id.as_str(), "vscode");
    }

    #[test]
    fn nested_files_are_entries_and_placeholders_detected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "template.toml", MANIFEST);
        write(temp.path(), "a/b/c.txt", "plain");
        write(temp.path(), "README.md", "# {{PROJECT_NAME}}");

        let set = load_set_from_dir(temp.path()).unwrap();
        let entries = set.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "README.md");
        assert!(matches!(entries[0].content, TemplateContent::Parameterized(_)));
        assert_eq!(entries[1].path, "a/b/c.txt");
        assert!(matches!(entries[1].content, TemplateContent::Literal(_)));
    }

    #[test]
    fn non_utf8_files_are_kept_as_bytes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "template.toml", MANIFEST);
        fs::create_dir_all(temp.path().join("assets")).unwrap();
        fs::write(temp.path().join("assets/logo.png"), [0x89, b'P', b'N', b'G', 0xff]).unwrap();

        let set = load_set_from_dir(temp.path()).unwrap();

        assert_eq!(
            set.entries()[0].content,
            TemplateContent::Binary(vec![0x89, b'P', b'N', b'G', 0xff])
        );
    }

    #[test]
    fn manifest_only_set_is_invalid() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "template.toml", MANIFEST);

        assert!(matches!(
            load_set_from_dir(temp.path()),
            Err(DomainError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn malformed_manifest_is_invalid() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "template.toml", "[template\nid=");
        write(temp.path(), "x", "x");

        let err = load_set_from_dir(temp.path()).unwrap_err();
        let DomainError::InvalidTemplate { reason, .. } = err else {
            panic!("expected InvalidTemplate");
        };
        assert!(reason.contains("cannot parse"));
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path("a\\b\\c.json"), "a/b/c.json");
    }
}
