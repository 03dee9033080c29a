//! Command handlers, one module per subcommand.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use hookgen_adapters::{
    BuiltinSkeletonGenerator, DirectorySkeletonGenerator, InMemoryStore, LocalFilesystem,
};
use hookgen_core::application::{GenerateService, ProjectGenerator};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

/// Wire the adapters into a [`GenerateService`] using the configured preset.
fn build_service(config: &AppConfig, skeleton: Option<&Path>) -> CliResult<GenerateService> {
    let generator: Arc<dyn ProjectGenerator> = match skeleton {
        Some(dir) => Arc::new(DirectorySkeletonGenerator::new(dir)),
        None => Arc::new(BuiltinSkeletonGenerator::new()),
    };
    debug!(generator = generator.name(), "Skeleton generator selected");

    let store = InMemoryStore::with_builtin()?;
    debug!(sets = store.len(), "Template store ready");

    Ok(GenerateService::new(generator, Box::new(store), Box::new(LocalFilesystem::new()))
        .with_preset(config.preset.clone()))
}
