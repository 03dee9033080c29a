//! Built-in template set discovery.
//!
//! [`all_template_sets`] is the single entry point for the sets hookgen
//! overlays onto a new project.
//!
//! # Resolution order
//!
//! Stopping at the first directory that exists and yields at least one set:
//!
//! 1. **`$HOOKGEN_TEMPLATES_DIR`**
//! 2. **`./templates`** relative to the current working directory
//! 3. **`<executable-dir>/templates`**
//!
//! If none is found, the compiled-in sets from [`compiled_in`] are used, so a
//! bare binary always works.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use hookgen_core::domain::{DomainError, TemplateContent, TemplateSet};

use crate::template_loader::FilesystemTemplateLoader;

pub const TEMPLATES_DIR_ENV: &str = "HOOKGEN_TEMPLATES_DIR";

/// Load all template sets using the resolution order in the module docs.
///
/// # Errors
///
/// A templates directory was found but could not be read. Individual broken
/// sets inside it are skipped with a warning instead.
#[instrument]
pub fn all_template_sets() -> Result<Vec<TemplateSet>, DomainError> {
    let candidates = candidate_paths(std::env::var(TEMPLATES_DIR_ENV).ok());
    match first_non_empty(&candidates)? {
        Some(sets) => Ok(sets),
        None => {
            debug!("no templates directory found, using compiled-in sets");
            Ok(compiled_in())
        }
    }
}

/// The ordered list of directories to probe.
fn candidate_paths(env_dir: Option<String>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        paths.push(PathBuf::from(dir));
    }
    paths.push(PathBuf::from("templates"));
    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }

    paths
}

fn first_non_empty(candidates: &[PathBuf]) -> Result<Option<Vec<TemplateSet>>, DomainError> {
    for candidate in candidates {
        debug!(path = %candidate.display(), "checking candidate templates path");
        if !candidate.is_dir() {
            continue;
        }

        let sets = FilesystemTemplateLoader::new(candidate).load_all()?;
        if sets.is_empty() {
            debug!(path = %candidate.display(), "directory holds no template sets, trying next");
            continue;
        }

        info!(path = %candidate.display(), count = sets.len(), "template sets loaded");
        return Ok(Some(sets));
    }
    Ok(None)
}

fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

// ── Compiled-in sets ──────────────────────────────────────────────────────────

/// The `configuration` and `vscode` sets the default preset overlays.
pub fn compiled_in() -> Vec<TemplateSet> {
    vec![configuration(), vscode()]
}

fn configuration() -> TemplateSet {
    TemplateSet::new("configuration")
        .with_description("ESLint, Prettier and ignore files for the project root")
        .with_entry(".eslintrc.json", TemplateContent::Literal(ESLINTRC.into()))
        .with_entry(
            ".eslintignore",
            TemplateContent::Literal("node_modules/\ndist/\ncoverage/\n".into()),
        )
        .with_entry(".prettierrc", TemplateContent::Literal(PRETTIERRC.into()))
        .with_entry(
            ".prettierignore",
            TemplateContent::Literal("node_modules/\ndist/\ncoverage/\n".into()),
        )
}

fn vscode() -> TemplateSet {
    TemplateSet::new("vscode")
        .with_description("Editor settings and recommended extensions")
        .with_entry("settings.json", TemplateContent::detect(VSCODE_SETTINGS))
        .with_entry(
            "extensions.json",
            TemplateContent::Literal(VSCODE_EXTENSIONS.into()),
        )
}

const ESLINTRC: &str = r#"{
  "root": true,
  "ignorePatterns": ["projects/**/*"],
  "overrides": [
    {
      "files": ["*.ts"],
      "parserOptions": {
        "project": ["tsconfig.json", "e2e/tsconfig.json"],
        "createDefaultProgram": true
      },
      "extends": [
        "plugin:@angular-eslint/recommended",
        "plugin:@angular-eslint/template/process-inline-templates"
      ],
      "rules": {
        "@angular-eslint/component-selector": [
          "error",
          { "prefix": "app", "style": "kebab-case", "type": "element" }
        ],
        "@angular-eslint/directive-selector": [
          "error",
          { "prefix": "app", "style": "camelCase", "type": "attribute" }
        ]
      }
    },
    {
      "files": ["*.html"],
      "extends": ["plugin:@angular-eslint/template/recommended"],
      "rules": {}
    }
  ]
}
"#;

const PRETTIERRC: &str = r#"{
  "singleQuote": true,
  "printWidth": 120,
  "trailingComma": "es5"
}
"#;

const VSCODE_SETTINGS: &str = r#"{
  "window.title": "{{PROJECT_NAME_KEBAB}} - ${activeEditorShort}",
  "editor.formatOnSave": true,
  "editor.codeActionsOnSave": {
    "source.fixAll.eslint": true
  },
  "eslint.validate": ["typescript", "html"]
}
"#;

const VSCODE_EXTENSIONS: &str = r#"{
  "recommendations": [
    "angular.ng-template",
    "dbaeumer.vscode-eslint",
    "esbenp.prettier-vscode"
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn seed_set(root: &Path, name: &str) {
        let slot = root.join(name);
        fs::create_dir_all(&slot).unwrap();
        fs::write(slot.join("template.toml"), "[template]\n").unwrap();
        fs::write(slot.join("file.txt"), "x").unwrap();
    }

    #[test]
    fn candidate_paths_puts_env_dir_first() {
        let paths = candidate_paths(Some("/custom/templates".into()));
        assert_eq!(paths[0], PathBuf::from("/custom/templates"));
        assert!(paths.contains(&PathBuf::from("templates")));
    }

    #[test]
    fn blank_env_dir_is_ignored() {
        let paths = candidate_paths(Some("  ".into()));
        assert_eq!(paths[0], PathBuf::from("templates"));
    }

    #[test]
    fn first_non_empty_skips_empty_and_missing_dirs() {
        let empty = TempDir::new().unwrap();
        let real = TempDir::new().unwrap();
        seed_set(real.path(), "custom");

        let sets = first_non_empty(&[
            PathBuf::from("/does/not/exist"),
            empty.path().to_path_buf(),
            real.path().to_path_buf(),
        ])
        .unwrap()
        .unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id.as_str(), "custom");
    }

    #[test]
    fn nothing_found_is_none() {
        let empty = TempDir::new().unwrap();
        assert!(first_non_empty(&[empty.path().to_path_buf()]).unwrap().is_none());
    }

    #[test]
    fn compiled_in_sets_are_valid() {
        for set in compiled_in() {
            set.validate().unwrap();
        }
    }

    #[test]
    fn compiled_in_json_files_parse() {
        for set in compiled_in() {
            for entry in set.entries().iter().filter(|e| e.path.ends_with(".json")) {
                let text = match &entry.content {
                    TemplateContent::Literal(t) | TemplateContent::Parameterized(t) => t,
                    TemplateContent::Binary(_) => panic!("{} is not text", entry.path),
                };
                serde_json::from_str::<serde_json::Value>(text)
                    .unwrap_or_else(|e| panic!("{} is not JSON: {e}", entry.path));
            }
        }
    }

    #[test]
    fn eslintignore_lists_node_modules() {
        let config = configuration();
        let ignore = config
            .entries()
            .iter()
            .find(|e| e.path == ".eslintignore")
            .unwrap();
        assert!(matches!(&ignore.content, TemplateContent::Literal(t) if t.starts_with("node_modules/")));
    }
}
