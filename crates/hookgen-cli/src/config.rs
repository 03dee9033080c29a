//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees the resulting
//! [`Preset`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `HOOKGEN__*` environment variables, `__` separating nested keys
//!    (`HOOKGEN__OUTPUT__NO_COLOR=true`)
//! 3. Config file: `--config FILE` or [`AppConfig::config_path`]
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hookgen_core::domain::Preset;

pub const ENV_PREFIX: &str = "HOOKGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// The generation recipe. Any field may be overridden.
    pub preset: Preset,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Where `hookgen new` creates projects when `--output` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from `config_file` (or the default location) and
    /// the environment.
    ///
    /// With `require_file`, an explicitly passed file must exist. The default
    /// location is always optional.
    pub fn load(config_file: Option<&PathBuf>, require_file: bool) -> anyhow::Result<Self> {
        let path = Self::active_path(config_file);
        Self::load_from(&path, require_file && config_file.is_some())
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hookgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hookgen", "hookgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hookgen.toml"))
    }

    /// The file `init` writes and `config path` reports.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_the_angular_preset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.preset, Preset::angular());
        assert!(!cfg.output.no_color);
        assert!(cfg.output.directory.is_none());
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.preset, Preset::angular());
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert!(AppConfig::load(Some(&path), false).is_ok());
    }

    #[test]
    fn file_overrides_single_preset_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hookgen.toml");
        fs::write(
            &path,
            r#"
[output]
directory = "/srv/projects"

[preset.generator]
version = "12.0.0"

[preset.hooks]
pre_commit = "lint-staged"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();

        assert_eq!(cfg.output.directory, Some(PathBuf::from("/srv/projects")));
        assert_eq!(cfg.preset.generator.version, "12.0.0");
        assert_eq!(cfg.preset.generator.style, "scss");
        assert_eq!(cfg.preset.hooks.pre_commit, "lint-staged");
        assert_eq!(cfg.preset.hooks.lint_script, "ng lint");
        assert_eq!(cfg.preset.manifest_file, "package.json");
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hookgen.toml");
        fs::write(&path, "[output\nno_color = ").unwrap();
        assert!(AppConfig::load_from(&path, true).is_err());
    }

    #[test]
    fn default_config_serialises_to_toml() {
        let text = AppConfig::default().to_toml().unwrap();
        assert!(text.contains("[output]"));
        assert!(text.contains("lint_script = \"ng lint\""));
    }

    #[test]
    fn active_path_prefers_explicit_file() {
        let explicit = PathBuf::from("/etc/hookgen.toml");
        assert_eq!(AppConfig::active_path(Some(&explicit)), explicit);
        assert_eq!(AppConfig::active_path(None), AppConfig::config_path());
    }
}
