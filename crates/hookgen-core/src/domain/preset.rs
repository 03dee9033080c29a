//! The fixed recipe a project is generated from.
//!
//! Everything the pipeline needs besides the project name lives here, so the
//! CLI can override any field from its configuration file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{
    dependency::{DependencyEntry, Reconciliation},
    document::KeyPath,
    naming::ProjectName,
    patch::PatchSpec,
};

/// Options handed verbatim to the base skeleton generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub version: String,
    pub routing: bool,
    pub style: String,
    pub inline_style: bool,
    pub inline_template: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            version: "11.2.1".into(),
            routing: true,
            style: "scss".into(),
            inline_style: false,
            inline_template: false,
        }
    }
}

/// Glob pattern -> ordered commands run on staged files matching it.
pub type LintStagedRules = BTreeMap<String, Vec<String>>;

/// Pre-commit hook wiring merged into the dependency manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    pub lint_script: String,
    pub pre_commit: String,
    pub lint_staged: LintStagedRules,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            lint_script: "ng lint".into(),
            pre_commit: "lint-staged --relative".into(),
            lint_staged: BTreeMap::from([("*.{js,ts}".into(), vec!["eslint --fix".into()])]),
        }
    }
}

impl HookSettings {
    /// `scripts.lint`, `husky.hooks.pre-commit` and the `lint-staged` rules.
    pub fn to_patch(&self) -> PatchSpec {
        let rules: serde_json::Map<String, Value> = self
            .lint_staged
            .iter()
            .map(|(glob, commands)| (glob.clone(), json!(commands)))
            .collect();

        PatchSpec::new()
            .merge(KeyPath::new(["scripts"]), json!({ "lint": self.lint_script }))
            .merge(
                KeyPath::new(["husky", "hooks"]),
                json!({ "pre-commit": self.pre_commit }),
            )
            .merge(KeyPath::new(["lint-staged"]), Value::Object(rules))
    }
}

/// The `architect.lint` target inserted into the build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintTarget {
    pub builder: String,
    pub eslint_config: String,
    pub ts_config: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for LintTarget {
    fn default() -> Self {
        Self {
            builder: "@angular-eslint/builder:lint".into(),
            eslint_config: ".eslintrc.json".into(),
            ts_config: vec![
                "tsconfig.app.json".into(),
                "tsconfig.spec.json".into(),
                "e2e/tsconfig.json".into(),
            ],
            exclude: vec!["**/node_modules/**".into()],
        }
    }
}

impl LintTarget {
    /// Sets `projects.<name>.architect.lint`, replacing any previous target.
    pub fn to_patch(&self, project: &ProjectName) -> PatchSpec {
        PatchSpec::new().set(
            KeyPath::new(["projects", project.as_str(), "architect", "lint"]),
            json!({
                "builder": self.builder,
                "options": {
                    "eslintConfig": self.eslint_config,
                    "tsConfig": self.ts_config,
                    "exclude": self.exclude,
                }
            }),
        )
    }
}

/// A template set and where it is mounted, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMount {
    pub id: String,
    pub mount: String,
}

impl TemplateMount {
    pub fn new(id: impl Into<String>, mount: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mount: mount.into(),
        }
    }
}

/// The whole generation recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub manifest_file: String,
    pub build_config_file: String,
    pub generator: GeneratorOptions,
    pub templates: Vec<TemplateMount>,
    pub dependencies: Vec<DependencyEntry>,
    pub removals: Vec<String>,
    pub hooks: HookSettings,
    pub lint_target: LintTarget,
}

impl Default for Preset {
    fn default() -> Self {
        Self::angular()
    }
}

impl Preset {
    /// Angular workspace with ESLint, husky and lint-staged.
    pub fn angular() -> Self {
        Self {
            manifest_file: "package.json".into(),
            build_config_file: "angular.json".into(),
            generator: GeneratorOptions::default(),
            templates: vec![
                TemplateMount::new("configuration", "."),
                TemplateMount::new("vscode", ".vscode"),
            ],
            dependencies: vec![
                DependencyEntry::runtime("lodash-es", "4.17.10"),
                DependencyEntry::development("husky", "^4.3.8"),
                DependencyEntry::development("lint-staged", "^10.5.4"),
                DependencyEntry::development("eslint", "^7.6.0"),
                DependencyEntry::development("@angular-eslint/builder", "4.2.0"),
                DependencyEntry::development("@angular-eslint/eslint-plugin", "4.2.0"),
                DependencyEntry::development("@angular-eslint/eslint-plugin-template", "4.2.0"),
                DependencyEntry::development("@angular-eslint/template-parser", "4.2.0"),
                DependencyEntry::development("@typescript-eslint/eslint-plugin", "4.16.1"),
                DependencyEntry::development("@typescript-eslint/parser", "4.16.1"),
            ],
            removals: vec!["codelyzer".into(), "protractor".into(), "tslint".into()],
            hooks: HookSettings::default(),
            lint_target: LintTarget::default(),
        }
    }

    pub fn reconciliation(&self) -> Reconciliation {
        Reconciliation::new()
            .add_all(self.dependencies.iter().cloned())
            .remove_all(self.removals.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::JsonDocument;

    #[test]
    fn lint_target_patch_uses_project_key() {
        let name = ProjectName::parse("My App").unwrap();
        let doc = LintTarget::default()
            .to_patch(&name)
            .apply(JsonDocument::new(json!({"projects": {"my-app": {"architect": {}}}})))
            .unwrap();

        assert_eq!(
            doc.as_value()["projects"]["my-app"]["architect"]["lint"]["options"]["tsConfig"],
            json!(["tsconfig.app.json", "tsconfig.spec.json", "e2e/tsconfig.json"])
        );
    }

    #[test]
    fn hooks_patch_matches_expected_document() {
        let doc = HookSettings::default()
            .to_patch()
            .apply(JsonDocument::new(json!({})))
            .unwrap();

        assert_eq!(doc.as_value()["scripts"]["lint"], json!("ng lint"));
        assert_eq!(
            doc.as_value()["husky"]["hooks"]["pre-commit"],
            json!("lint-staged --relative")
        );
        assert_eq!(
            doc.as_value()["lint-staged"]["*.{js,ts}"],
            json!(["eslint --fix"])
        );
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let preset: Preset =
            serde_json::from_value(json!({"removals": ["karma"], "hooks": {"lint_script": "npx eslint ."}}))
                .unwrap();

        assert_eq!(preset.removals, vec!["karma"]);
        assert_eq!(preset.hooks.lint_script, "npx eslint .");
        assert_eq!(preset.hooks.pre_commit, "lint-staged --relative");
        assert_eq!(preset.generator.style, "scss");
    }
}
