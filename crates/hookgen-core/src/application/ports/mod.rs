//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hookgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ProjectGenerator`: Base skeleton generation
//!   - `TemplateStore`: Template set storage/retrieval
//!   - `Filesystem`: Committing the final tree
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, GeneratorRequest, ProjectGenerator, TemplateStore};

#[cfg(test)]
pub use output::MockProjectGenerator;
