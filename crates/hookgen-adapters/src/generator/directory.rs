//! Skeleton generator backed by a directory on disk.

use std::path::PathBuf;

use tracing::{debug, instrument};

use hookgen_core::{
    application::{
        ApplicationError,
        ports::{GeneratorRequest, ProjectGenerator},
    },
    domain::{RenderContext, TemplateContent, TemplateSet, TreePath, VirtualTree},
    error::{HookgenError, HookgenResult},
};

use crate::template_loader::read_entries;

/// Reads every file under `root` into the tree at `/{directory}`.
///
/// Files containing `{{` placeholders are rendered against the project name.
#[derive(Debug, Clone)]
pub struct DirectorySkeletonGenerator {
    root: PathBuf,
}

impl DirectorySkeletonGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn failed(&self, reason: impl Into<String>) -> HookgenError {
        ApplicationError::GeneratorFailed {
            generator: self.name().to_string(),
            reason: reason.into(),
        }
        .into()
    }
}

impl ProjectGenerator for DirectorySkeletonGenerator {
    fn name(&self) -> &'static str {
        "directory"
    }

    #[instrument(skip_all, fields(root = %self.root.display(), project = %request.name))]
    fn generate(&self, request: &GeneratorRequest) -> HookgenResult<VirtualTree> {
        if !self.root.is_dir() {
            return Err(self.failed(format!(
                "skeleton directory not found: {}",
                self.root.display()
            )));
        }

        let mut skeleton = TemplateSet::new("skeleton");
        for (path, content) in read_entries(&self.root).map_err(|e| self.failed(e))? {
            skeleton.push(path, TemplateContent::from_bytes(content));
        }
        if skeleton.is_empty() {
            return Err(self.failed(format!("{} is empty", self.root.display())));
        }

        let target = TreePath::root().join(&request.directory)?;
        let tree = skeleton.render(&RenderContext::new(&request.name), &target)?;
        debug!(files = tree.len(), "Skeleton read from disk");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use hookgen_core::domain::{GeneratorOptions, ProjectName};
    use tempfile::TempDir;

    fn request(name: &str) -> GeneratorRequest {
        GeneratorRequest::new(ProjectName::parse(name).unwrap(), GeneratorOptions::default())
    }

    #[test]
    fn reads_and_renders_under_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(
            temp.path().join("package.json"),
            "{\"name\": \"{{PROJECT_NAME_KEBAB}}\"}\n",
        )
        .unwrap();
        fs::write(temp.path().join("src/main.ts"), "export {};\n").unwrap();

        let tree = DirectorySkeletonGenerator::new(temp.path())
            .generate(&request("My App"))
            .unwrap();

        assert_eq!(
            tree.read_to_string(&TreePath::parse("/my-app/package.json").unwrap())
                .unwrap(),
            "{\"name\": \"my-app\"}\n"
        );
        assert!(tree.exists(&TreePath::parse("/my-app/src/main.ts").unwrap()));
    }

    #[test]
    fn binary_files_are_copied_verbatim() {
        let icon = [0u8, 0, 1, 0, 0xff, 0xfe, 0x80];
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("package.json"), "{\"name\": \"{{PROJECT_NAME_KEBAB}}\"}\n")
            .unwrap();
        fs::write(temp.path().join("src/favicon.ico"), icon).unwrap();

        let tree = DirectorySkeletonGenerator::new(temp.path())
            .generate(&request("my-app"))
            .unwrap();

        assert_eq!(
            tree.read(&TreePath::parse("/my-app/src/favicon.ico").unwrap())
                .unwrap(),
            icon.as_slice()
        );
    }

    #[test]
    fn missing_directory_is_generator_failure() {
        let err = DirectorySkeletonGenerator::new("/no/such/skeleton")
            .generate(&request("demo"))
            .unwrap_err();

        assert!(matches!(
            err,
            HookgenError::Application(ApplicationError::GeneratorFailed { .. })
        ));
    }

    #[test]
    fn empty_directory_is_generator_failure() {
        let temp = TempDir::new().unwrap();
        let err = DirectorySkeletonGenerator::new(temp.path())
            .generate(&request("demo"))
            .unwrap_err();

        assert!(err.to_string().contains("is empty"));
    }
}
