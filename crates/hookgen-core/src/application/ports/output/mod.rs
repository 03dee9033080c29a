//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hookgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{GeneratorOptions, ProjectName, TemplateSet, TemplateSetId, VirtualTree};
use crate::error::HookgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hookgen_adapters::filesystem::LocalFilesystem` (production)
/// - `hookgen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HookgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> HookgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HookgenResult<()>;
}

/// Port for template set storage and retrieval.
///
/// Implemented by:
/// - `hookgen_adapters::template_store::InMemoryStore` (built-in and on-disk sets)
pub trait TemplateStore: Send + Sync {
    /// Get a template set by id.
    fn get(&self, id: &TemplateSetId) -> HookgenResult<TemplateSet>;

    /// List all available sets, ordered by id.
    fn list(&self) -> HookgenResult<Vec<TemplateSet>>;

    /// Insert or replace a set.
    fn insert(&self, set: TemplateSet) -> HookgenResult<()>;
}

/// What the skeleton generator is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRequest {
    pub name: ProjectName,
    /// Directory under the tree root, always the normalized name.
    pub directory: String,
    pub options: GeneratorOptions,
}

impl GeneratorRequest {
    pub fn new(name: ProjectName, options: GeneratorOptions) -> Self {
        Self {
            directory: name.as_str().to_string(),
            name,
            options,
        }
    }
}

/// Port for the base project generator.
///
/// Implemented by:
/// - `hookgen_adapters::generator::BuiltinSkeletonGenerator`
/// - `hookgen_adapters::generator::DirectorySkeletonGenerator`
///
/// The returned tree must hold `/{directory}/package.json`.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectGenerator: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn generate(&self, request: &GeneratorRequest) -> HookgenResult<VirtualTree>;
}
