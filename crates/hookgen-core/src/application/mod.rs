//! Application layer for hookgen.
//!
//! This layer contains:
//! - **Rules**: Named tree transformations and the pipeline that chains them
//! - **Services**: Use case orchestration (GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! document or tree logic itself. That lives in `crate::domain`.

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod rule;
pub mod rules;
pub mod services;

// Re-export main services
pub use services::{GenerateService, GeneratedProject, TemplateSetInfo};

pub use pipeline::Pipeline;
pub use rule::{FnRule, PostTask, Rule, RuleContext};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, GeneratorRequest, ProjectGenerator, TemplateStore};

pub use error::ApplicationError;
