//! The rule abstraction and the context threaded through a pipeline.

use std::fmt;

use crate::domain::{ProjectName, RenderContext, TreePath, VirtualTree};
use crate::error::HookgenResult;

/// Work scheduled by a rule and performed by the caller after commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostTask {
    /// Run the package manager's install in this directory.
    InstallDependencies { working_directory: TreePath },
}

impl fmt::Display for PostTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallDependencies { working_directory } => {
                write!(f, "install dependencies in {working_directory}")
            }
        }
    }
}

/// Shared, per-run state handed to every rule.
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub project: ProjectName,
    pub render: RenderContext,
    tasks: Vec<PostTask>,
}

impl RuleContext {
    pub fn new(project: ProjectName) -> Self {
        let render = RenderContext::new(&project);
        Self {
            project,
            render,
            tasks: Vec::new(),
        }
    }

    /// Schedule a task. Scheduling the same task twice records it once.
    pub fn schedule(&mut self, task: PostTask) {
        if !self.tasks.contains(&task) {
            self.tasks.push(task);
        }
    }

    pub fn tasks(&self) -> &[PostTask] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<PostTask> {
        self.tasks
    }
}

/// A named transformation of the virtual tree.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree>;
}

/// Adapter turning a closure into a [`Rule`].
pub struct FnRule<F> {
    name: String,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(VirtualTree, &mut RuleContext) -> HookgenResult<VirtualTree> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(VirtualTree, &mut RuleContext) -> HookgenResult<VirtualTree> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        (self.f)(tree, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_dedupes() {
        let mut ctx = RuleContext::new(ProjectName::parse("demo").unwrap());
        let task = PostTask::InstallDependencies {
            working_directory: TreePath::parse("/demo").unwrap(),
        };
        ctx.schedule(task.clone());
        ctx.schedule(task.clone());

        assert_eq!(ctx.tasks(), &[task]);
    }

    #[test]
    fn post_task_display() {
        let task = PostTask::InstallDependencies {
            working_directory: TreePath::parse("/my-app").unwrap(),
        };
        assert_eq!(task.to_string(), "install dependencies in /my-app");
    }

    #[test]
    fn fn_rule_delegates_to_closure() {
        let rule = FnRule::new("touch", |mut tree: VirtualTree, _ctx: &mut RuleContext| {
            tree.create(&TreePath::parse("/a.txt")?, "a")?;
            Ok(tree)
        });
        let mut ctx = RuleContext::new(ProjectName::parse("demo").unwrap());

        let tree = rule.apply(VirtualTree::new(), &mut ctx).unwrap();
        assert_eq!(rule.name(), "touch");
        assert_eq!(tree.len(), 1);
    }
}
