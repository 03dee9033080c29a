//! Base project generators.

mod builtin;
mod directory;

pub use builtin::BuiltinSkeletonGenerator;
pub use directory::DirectorySkeletonGenerator;
