//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, HookgenError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The base skeleton generator failed or produced an unusable tree.
    #[error("Generator '{generator}' failed: {reason}")]
    GeneratorFailed { generator: String, reason: String },

    /// A pipeline step failed; no later step ran.
    #[error("Step {index} ({step}) failed: {source}")]
    PipelineStepFailed {
        index: usize,
        step: String,
        #[source]
        source: Box<HookgenError>,
    },

    /// A template set named by the preset is not in the store.
    #[error("Template resolution failed: {reason}")]
    TemplateResolution { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::GeneratorFailed { generator, .. } => vec![
                format!("The '{}' skeleton generator did not produce a project", generator),
                "Check the skeleton directory passed with --skeleton".into(),
                "It must contain a package.json at its root".into(),
            ],
            Self::PipelineStepFailed { step, source, .. } => {
                let mut hints = vec![format!("Generation stopped at step '{}'", step)];
                hints.extend(source.suggestions());
                hints
            }
            Self::TemplateResolution { reason } => vec![
                format!("Resolution failed: {}", reason),
                "Try: hookgen list to see available template sets".into(),
                "Or point HOOKGEN_TEMPLATES_DIR at a directory of template sets".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Partially generated files may remain in {}", path.display()),
                "Remove the directory manually before retrying".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::GeneratorFailed { .. } => ErrorCategory::Internal,
            Self::PipelineStepFailed { source, .. } => source.category(),
            Self::TemplateResolution { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
        }
    }
}
