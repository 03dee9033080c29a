//! Reconciles the dependency manifest and schedules the install.

use tracing::{debug, info};

use crate::application::{
    rule::{PostTask, Rule, RuleContext},
    rules::patch::patch_document,
};
use crate::domain::{Reconciliation, VirtualTree};
use crate::error::HookgenResult;

pub struct AddDependencies {
    manifest_file: String,
    reconciliation: Reconciliation,
}

impl AddDependencies {
    pub fn new(manifest_file: impl Into<String>, reconciliation: Reconciliation) -> Self {
        Self {
            manifest_file: manifest_file.into(),
            reconciliation,
        }
    }
}

impl Rule for AddDependencies {
    fn name(&self) -> &str {
        "add-dependencies"
    }

    fn apply(&self, mut tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        let root = ctx.project.root();
        let manifest = root.join(&self.manifest_file)?;

        let report = patch_document(&mut tree, &manifest, |mut doc| {
            let report = self.reconciliation.apply(&mut doc)?;
            Ok((doc, report))
        })?;

        debug!(kept = ?report.kept, removed = ?report.removed, "Dependencies reconciled");
        info!(
            added = report.written.len(),
            removed = report.removed.len(),
            "Dependency manifest updated"
        );

        ctx.schedule(PostTask::InstallDependencies {
            working_directory: root,
        });
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{DependencyEntry, ProjectName, TreePath};

    #[test]
    fn reconciles_and_schedules_install() {
        let path = TreePath::parse("/demo/package.json").unwrap();
        let mut tree = VirtualTree::new();
        tree.create(
            &path,
            r#"{"name":"demo","devDependencies":{"tslint":"~6.1.0","typescript":"~4.1.2"}}"#,
        )
        .unwrap();
        let mut ctx = RuleContext::new(ProjectName::parse("demo").unwrap());

        let rule = AddDependencies::new(
            "package.json",
            Reconciliation::new()
                .add(DependencyEntry::development("eslint", "^7.6.0"))
                .remove("tslint"),
        );
        let tree = rule.apply(tree, &mut ctx).unwrap();

        let doc: Value = serde_json::from_slice(tree.read(&path).unwrap()).unwrap();
        assert_eq!(
            doc["devDependencies"],
            json!({"eslint": "^7.6.0", "typescript": "~4.1.2"})
        );
        assert_eq!(
            ctx.tasks(),
            &[PostTask::InstallDependencies {
                working_directory: TreePath::parse("/demo").unwrap()
            }]
        );
    }
}
