// ============================================================================
// domain/error.rs - TREE, DOCUMENT AND NAMING ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (a pipeline error keeps its cause)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid template set '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error("Duplicate path in template set '{id}': {path}")]
    DuplicatePath { id: String, path: String },

    #[error("Invalid dependency '{name}': {reason}")]
    InvalidDependency { name: String, reason: String },

    // ========================================================================
    // Tree Errors
    // ========================================================================
    #[error("Path conflict at {path}: {reason}")]
    PathConflict { path: String, reason: String },

    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("File {path} is not valid UTF-8")]
    InvalidEncoding { path: String },

    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Cannot parse manifest {path}: {reason}")]
    ManifestParse { path: String, reason: String },

    #[error("Cannot patch '{key}': {reason}")]
    DocumentShape { key: String, reason: String },
}

impl DomainError {
    pub(crate) fn conflict(path: impl ToString, reason: impl Into<String>) -> Self {
        Self::PathConflict {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(path: impl ToString) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{}' cannot be used: {}", name, reason),
                "Use letters, digits, spaces, hyphens or underscores".into(),
                "Examples: my-app, \"My App\", shopFront".into(),
            ],
            Self::PathConflict { path, .. } => vec![
                format!("Two steps tried to write different content to {}", path),
                "Check that template sets mount into disjoint directories".into(),
            ],
            Self::NotFound { path } => vec![
                format!("Expected {} to exist at this point of the pipeline", path),
                "The base skeleton may be missing a file later steps rely on".into(),
            ],
            Self::ManifestParse { path, .. } => vec![
                format!("{} must be a valid JSON document", path),
                "Inspect the skeleton generator output".into(),
            ],
            Self::InvalidTemplate { id, .. } | Self::DuplicatePath { id, .. } => vec![
                format!("Template set '{}' is malformed", id),
                "Check its template.toml and file list".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidPath { .. }
            | Self::InvalidTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::InvalidDependency { .. } => ErrorCategory::Validation,
            Self::PathConflict { .. } => ErrorCategory::Conflict,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidEncoding { .. }
            | Self::ManifestParse { .. }
            | Self::DocumentShape { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
