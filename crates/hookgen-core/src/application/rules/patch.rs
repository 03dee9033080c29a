//! Read-parse-mutate-serialize-write over a JSON document in the tree.

use tracing::debug;

use crate::application::rule::{Rule, RuleContext};
use crate::domain::{JsonDocument, PatchSpec, TreePath, VirtualTree};
use crate::error::HookgenResult;

/// Apply `mutate` to the JSON document at `path` and write it back
/// pretty-printed.
///
/// A missing or unparsable document is a `ManifestParse` error; nothing is
/// written in that case.
pub fn patch_document<T, F>(
    tree: &mut VirtualTree,
    path: &TreePath,
    mutate: F,
) -> HookgenResult<T>
where
    F: FnOnce(JsonDocument) -> HookgenResult<(JsonDocument, T)>,
{
    let bytes = tree.read(path).map_err(|e| crate::domain::DomainError::ManifestParse {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let doc = JsonDocument::parse(path, bytes)?;

    let (doc, out) = mutate(doc)?;
    tree.overwrite(path, doc.to_pretty_string())?;
    Ok(out)
}

/// Applies a fixed [`PatchSpec`] to one project file.
pub struct PatchJson {
    name: String,
    file: String,
    spec: PatchSpec,
}

impl PatchJson {
    /// `file` is relative to the project root.
    pub fn new(name: impl Into<String>, file: impl Into<String>, spec: PatchSpec) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            spec,
        }
    }
}

impl Rule for PatchJson {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut tree: VirtualTree, ctx: &mut RuleContext) -> HookgenResult<VirtualTree> {
        let path = ctx.project.root().join(&self.file)?;
        patch_document(&mut tree, &path, |doc| Ok((self.spec.apply(doc)?, ())))?;
        debug!(file = %path, ops = self.spec.ops().len(), "Document patched");
        Ok(tree)
    }
}
