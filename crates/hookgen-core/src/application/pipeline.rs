//! Ordered rule composition.

use tracing::{debug, instrument};

use crate::application::{
    ApplicationError,
    rule::{Rule, RuleContext},
};
use crate::domain::VirtualTree;
use crate::error::{HookgenError, HookgenResult};

/// Rules run strictly in insertion order; the first failure stops the run.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then(mut self, rule: impl Rule + 'static) -> Self {
        self.steps.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Thread `initial` through every step.
    ///
    /// A failing step is reported as `PipelineStepFailed` with its zero-based
    /// index and name; later steps never run.
    #[instrument(skip_all, fields(steps = self.steps.len(), project = %ctx.project))]
    pub fn run(&self, initial: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        self.steps
            .iter()
            .enumerate()
            .try_fold(initial, |tree, (index, step)| {
                debug!(index, step = step.name(), files = tree.len(), "Running step");
                step.apply(tree, ctx).map_err(|e| {
                    HookgenError::from(ApplicationError::PipelineStepFailed {
                        index,
                        step: step.name().to_string(),
                        source: Box::new(e),
                    })
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::rule::FnRule;
    use crate::domain::{DomainError, ProjectName, TreePath};

    fn ctx() -> RuleContext {
        RuleContext::new(ProjectName::parse("demo").unwrap())
    }

    fn write(path: &'static str, content: &'static str) -> impl Rule {
        FnRule::new(format!("write {path}"), move |mut tree: VirtualTree, _: &mut RuleContext| {
            tree.create(&TreePath::parse(path)?, content)?;
            Ok(tree)
        })
    }

    #[test]
    fn steps_see_previous_output() {
        let pipeline = Pipeline::new().then(write("/a", "1")).then(FnRule::new(
            "copy",
            |mut tree: VirtualTree, _: &mut RuleContext| {
                let a = tree.read(&TreePath::parse("/a")?)?.to_vec();
                tree.create(&TreePath::parse("/b")?, a)?;
                Ok(tree)
            },
        ));

        let tree = pipeline.run(VirtualTree::new(), &mut ctx()).unwrap();
        assert_eq!(tree.read(&TreePath::parse("/b").unwrap()).unwrap(), b"1");
        assert_eq!(pipeline.step_names(), vec!["write /a", "copy"]);
    }

    #[test]
    fn failure_reports_index_and_stops() {
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);

        let pipeline = Pipeline::new()
            .then(write("/a", "1"))
            .then(write("/a", "2"))
            .then(FnRule::new("never", move |tree: VirtualTree, _: &mut RuleContext| {
                *flag.lock().unwrap() = true;
                Ok(tree)
            }));

        let err = pipeline.run(VirtualTree::new(), &mut ctx()).unwrap_err();

        match &err {
            HookgenError::Application(ApplicationError::PipelineStepFailed { index, step, .. }) => {
                assert_eq!(*index, 1);
                assert_eq!(step, "write /a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            err.domain_cause(),
            Some(DomainError::PathConflict { .. })
        ));
        assert!(!*ran.lock().unwrap());
    }

    #[test]
    fn empty_pipeline_returns_input() {
        let mut tree = VirtualTree::new();
        tree.create(&TreePath::parse("/x").unwrap(), "x").unwrap();

        let out = Pipeline::new().run(tree.clone(), &mut ctx()).unwrap();
        assert!(out.same_content(&tree));
    }
}
