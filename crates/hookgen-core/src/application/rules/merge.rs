//! Overlays a stored template set onto the project.

use tracing::debug;

use crate::application::rule::{Rule, RuleContext};
use crate::domain::{TemplateSet, VirtualTree};
use crate::error::HookgenResult;

pub struct MergeTemplates {
    name: String,
    set: TemplateSet,
    mount: String,
}

impl MergeTemplates {
    /// `mount` is relative to the project root; `"."` is the root itself.
    pub fn new(set: TemplateSet, mount: impl Into<String>) -> Self {
        Self {
            name: format!("merge-templates:{}", set.id),
            set,
            mount: mount.into(),
        }
    }
}

impl Rule for MergeTemplates {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        let target = ctx.project.root().join(&self.mount)?;
        self.set.overlay_onto(&mut tree, &target, &ctx.render)?;
        debug!(set = %self.set.id, target = %target, files = self.set.len(), "Templates merged");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, ProjectName, TemplateContent, TreePath};
    use crate::error::HookgenError;

    fn vscode() -> TemplateSet {
        TemplateSet::new("vscode").with_entry(
            "settings.json",
            TemplateContent::detect("{\"window.title\": \"{{PROJECT_NAME_KEBAB}}\"}\n"),
        )
    }

    #[test]
    fn mounts_relative_to_project_root() {
        let mut ctx = RuleContext::new(ProjectName::parse("My App").unwrap());
        let tree = MergeTemplates::new(vscode(), ".vscode")
            .apply(VirtualTree::new(), &mut ctx)
            .unwrap();

        let text = tree
            .read_to_string(&TreePath::parse("/my-app/.vscode/settings.json").unwrap())
            .unwrap()
            .to_string();
        assert_eq!(text, "{\"window.title\": \"my-app\"}\n");
    }

    #[test]
    fn conflicting_file_fails() {
        let mut ctx = RuleContext::new(ProjectName::parse("demo").unwrap());
        let mut tree = VirtualTree::new();
        tree.create(&TreePath::parse("/demo/.vscode/settings.json").unwrap(), "{}")
            .unwrap();

        let err = MergeTemplates::new(vscode(), ".vscode")
            .apply(tree, &mut ctx)
            .unwrap_err();
        assert!(matches!(
            err,
            HookgenError::Domain(DomainError::PathConflict { .. })
        ));
    }
}
