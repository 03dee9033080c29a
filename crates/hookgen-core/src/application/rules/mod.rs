//! The concrete rules a generation pipeline is built from.

pub mod delegate;
pub mod dependencies;
pub mod merge;
pub mod patch;

pub use delegate::GenerateSkeleton;
pub use dependencies::AddDependencies;
pub use merge::MergeTemplates;
pub use patch::{PatchJson, patch_document};
