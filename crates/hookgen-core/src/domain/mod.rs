// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for hookgen.
//!
//! Pure logic only: the virtual tree, JSON documents and their patches,
//! dependency reconciliation, template sets and the generation preset.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Nothing here touches the filesystem or spawns processes
//! - **Pure transforms**: Patches and reconciliations map a document to a
//!   new document; only the tree records write intents
pub mod dependency;
pub mod document;
pub mod error;
pub mod naming;
pub mod patch;
pub mod path;
pub mod preset;
pub mod template;
pub mod tree;

// Re-exports for convenience
pub use dependency::{
    DEPENDENCY_SECTIONS, DependencyEntry, DependencyKind, ReconcileReport, Reconciliation,
};
pub use document::{JsonDocument, KeyPath};
pub use error::{DomainError, ErrorCategory};
pub use naming::ProjectName;
pub use patch::{PatchOp, PatchSpec};
pub use path::TreePath;
pub use preset::{GeneratorOptions, HookSettings, LintTarget, Preset, TemplateMount};
pub use template::{
    RenderContext, TemplateContent, TemplateEntry, TemplateSet, TemplateSetId,
};
pub use tree::{TreeAction, VirtualTree};
