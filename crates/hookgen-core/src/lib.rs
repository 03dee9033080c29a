//! hookgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the hookgen
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           hookgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (GenerateService, Pipeline)         │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Generator, TemplateStore, Filesystem)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hookgen-adapters (Infrastructure)   │
//! │ (InMemoryStore, LocalFilesystem, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (VirtualTree, JsonDocument, Preset)    │
//! │         No I/O, No Async                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hookgen_core::prelude::*;
//!
//! // Inject adapters, then generate.
//! let service = GenerateService::new(Arc::new(generator), Box::new(store), Box::new(fs));
//! let project = service.generate("My App", "./output")?;
//! for task in &project.tasks {
//!     println!("next: {task}");
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GeneratedProject, Pipeline, PostTask, Rule, RuleContext,
        ports::{Filesystem, GeneratorRequest, ProjectGenerator, TemplateStore},
    };
    pub use crate::domain::{
        DependencyEntry, DependencyKind, JsonDocument, KeyPath, PatchSpec, Preset, ProjectName,
        RenderContext, TemplateContent, TemplateSet, TemplateSetId, TreePath, VirtualTree,
    };
    pub use crate::error::{HookgenError, HookgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
