//! Infrastructure adapters for hookgen.
//!
//! This crate implements the ports defined in `hookgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod generator;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use generator::{BuiltinSkeletonGenerator, DirectorySkeletonGenerator};
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
