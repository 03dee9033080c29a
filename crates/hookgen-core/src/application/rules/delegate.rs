//! Seeds the tree from the base project generator.

use std::sync::Arc;

use tracing::debug;

use crate::application::{
    ApplicationError,
    ports::{GeneratorRequest, ProjectGenerator},
    rule::{Rule, RuleContext},
};
use crate::domain::{GeneratorOptions, VirtualTree};
use crate::error::{HookgenError, HookgenResult};

pub struct GenerateSkeleton {
    generator: Arc<dyn ProjectGenerator>,
    options: GeneratorOptions,
    manifest_file: String,
}

impl GenerateSkeleton {
    pub fn new(
        generator: Arc<dyn ProjectGenerator>,
        options: GeneratorOptions,
        manifest_file: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            options,
            manifest_file: manifest_file.into(),
        }
    }

    fn failed(&self, reason: impl Into<String>) -> HookgenError {
        ApplicationError::GeneratorFailed {
            generator: self.generator.name().to_string(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Rule for GenerateSkeleton {
    fn name(&self) -> &str {
        "generate-skeleton"
    }

    fn apply(&self, mut tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        let request = GeneratorRequest::new(ctx.project.clone(), self.options.clone());

        let skeleton = self
            .generator
            .generate(&request)
            .map_err(|e| self.failed(e.to_string()))?;

        let manifest = ctx.project.root().join(&self.manifest_file)?;
        if !skeleton.exists(&manifest) {
            return Err(self.failed(format!("generated tree has no {manifest}")));
        }

        debug!(
            generator = self.generator.name(),
            files = skeleton.len(),
            "Skeleton generated"
        );
        tree.merge(skeleton)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockProjectGenerator;
    use crate::domain::{ProjectName, TreePath};

    fn ctx() -> RuleContext {
        RuleContext::new(ProjectName::parse("My App").unwrap())
    }

    #[test]
    fn passes_normalized_directory_and_options() {
        let mut generator = MockProjectGenerator::new();
        generator.expect_name().return_const("mock");
        generator
            .expect_generate()
            .withf(|req| req.directory == "my-app" && req.options.style == "scss")
            .times(1)
            .returning(|req| {
                let mut tree = VirtualTree::new();
                tree.create(&TreePath::parse(&format!("/{}/package.json", req.directory))?, "{}")?;
                Ok(tree)
            });

        let rule = GenerateSkeleton::new(Arc::new(generator), GeneratorOptions::default(), "package.json");
        let tree = rule.apply(VirtualTree::new(), &mut ctx()).unwrap();

        assert!(tree.exists(&TreePath::parse("/my-app/package.json").unwrap()));
    }

    #[test]
    fn generator_error_becomes_generator_failed() {
        let mut generator = MockProjectGenerator::new();
        generator.expect_name().return_const("mock");
        generator.expect_generate().returning(|_| {
            Err(HookgenError::Configuration {
                message: "ng not installed".into(),
            })
        });

        let rule = GenerateSkeleton::new(Arc::new(generator), GeneratorOptions::default(), "package.json");
        let err = rule.apply(VirtualTree::new(), &mut ctx()).unwrap_err();

        assert!(matches!(
            err,
            HookgenError::Application(ApplicationError::GeneratorFailed { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_rejected() {
        let mut generator = MockProjectGenerator::new();
        generator.expect_name().return_const("mock");
        generator.expect_generate().returning(|_| {
            let mut tree = VirtualTree::new();
            tree.create(&TreePath::parse("/my-app/README.md")?, "hi")?;
            Ok(tree)
        });

        let rule = GenerateSkeleton::new(Arc::new(generator), GeneratorOptions::default(), "package.json");
        let err = rule.apply(VirtualTree::new(), &mut ctx()).unwrap_err();

        let HookgenError::Application(ApplicationError::GeneratorFailed { reason, .. }) = err else {
            panic!("expected GeneratorFailed");
        };
        assert!(reason.contains("/my-app/package.json"));
    }
}
