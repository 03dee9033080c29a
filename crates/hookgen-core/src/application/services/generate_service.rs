//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Build the rule pipeline from the preset and the template store
//! 2. Run it against an empty virtual tree
//! 3. Commit the final tree through the filesystem port, rolling back on failure
//!
//! Planning (steps 1-2) never touches the filesystem, so `--dry-run` is just
//! a plan without a commit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        pipeline::Pipeline,
        ports::{Filesystem, ProjectGenerator, TemplateStore},
        rule::{PostTask, RuleContext},
        rules::{AddDependencies, GenerateSkeleton, MergeTemplates, PatchJson},
    },
    domain::{Preset, ProjectName, TemplateSetId, TreePath, VirtualTree},
    error::{HookgenError, HookgenResult},
};

/// Information about a template set for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSetInfo {
    pub id: String,
    pub description: String,
    pub files: usize,
    /// Where the preset mounts this set, if it uses it.
    pub mount: Option<String>,
}

/// The outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub name: ProjectName,
    pub root: TreePath,
    pub tree: VirtualTree,
    pub tasks: Vec<PostTask>,
    pub run_id: Uuid,
}

impl GeneratedProject {
    /// Where the project root lands under `output_dir`.
    pub fn destination(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.root.to_relative_path_buf())
    }
}

/// Main generation service.
pub struct GenerateService {
    generator: Arc<dyn ProjectGenerator>,
    store: Box<dyn TemplateStore>,
    filesystem: Box<dyn Filesystem>,
    preset: Preset,
    force: bool,
}

impl GenerateService {
    /// Create a new service with the given adapters and the default preset.
    pub fn new(
        generator: Arc<dyn ProjectGenerator>,
        store: Box<dyn TemplateStore>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            generator,
            store,
            filesystem,
            preset: Preset::default(),
            force: false,
        }
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Write into an existing destination instead of refusing.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    /// The ordered pipeline for `name`.
    pub fn build_pipeline(&self, name: &ProjectName) -> HookgenResult<Pipeline> {
        let preset = &self.preset;

        let mut pipeline = Pipeline::new().then(GenerateSkeleton::new(
            Arc::clone(&self.generator),
            preset.generator.clone(),
            preset.manifest_file.clone(),
        ));

        for mount in &preset.templates {
            let set = self.resolve_set(&mount.id)?;
            pipeline = pipeline.then(MergeTemplates::new(set, mount.mount.clone()));
        }

        Ok(pipeline
            .then(AddDependencies::new(
                preset.manifest_file.clone(),
                preset.reconciliation(),
            ))
            .then(PatchJson::new(
                "patch-hooks",
                preset.manifest_file.clone(),
                preset.hooks.to_patch(),
            ))
            .then(PatchJson::new(
                "patch-lint-target",
                preset.build_config_file.clone(),
                preset.lint_target.to_patch(name),
            )))
    }

    /// Run the pipeline without touching the filesystem.
    pub fn plan(&self, name: impl AsRef<str>) -> HookgenResult<GeneratedProject> {
        let name = ProjectName::parse(name.as_ref())?;
        let run_id = Uuid::new_v4();
        let span = info_span!("generate", %run_id, project = %name);
        let _guard = span.enter();

        let pipeline = self.build_pipeline(&name)?;
        info!(steps = ?pipeline.step_names(), "Pipeline built");

        let mut ctx = RuleContext::new(name.clone());
        let tree = pipeline.run(VirtualTree::new(), &mut ctx)?;
        info!(files = tree.len(), "Pipeline completed");

        Ok(GeneratedProject {
            root: name.root(),
            name,
            tree,
            tasks: ctx.into_tasks(),
            run_id,
        })
    }

    /// Plan, then write every file under `output_dir`.
    ///
    /// An existing destination is refused unless forced. If a write fails, a
    /// destination created by this call is removed again.
    #[instrument(skip_all, fields(output = %output_dir.as_ref().display()))]
    pub fn generate(
        &self,
        name: impl AsRef<str>,
        output_dir: impl AsRef<Path>,
    ) -> HookgenResult<GeneratedProject> {
        let output_dir = output_dir.as_ref();
        let project = self.plan(name)?;
        let destination = project.destination(output_dir);

        let existed = self.filesystem.exists(&destination);
        if existed && !self.force {
            return Err(ApplicationError::ProjectExists { path: destination }.into());
        }

        match self.commit(&project.tree, output_dir) {
            Ok(()) => {
                info!(
                    run_id = %project.run_id,
                    files = project.tree.len(),
                    path = %destination.display(),
                    "Project written"
                );
                Ok(project)
            }
            Err(e) if existed => {
                warn!(error = %e, "Write failed inside an existing directory; leaving it in place");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&destination, e)
            }
        }
    }

    /// List all available template sets.
    pub fn list_template_sets(&self) -> HookgenResult<Vec<TemplateSetInfo>> {
        let sets = self.store.list()?;

        Ok(sets
            .into_iter()
            .map(|set| TemplateSetInfo {
                mount: self
                    .preset
                    .templates
                    .iter()
                    .find(|m| m.id == set.id.as_str())
                    .map(|m| m.mount.clone()),
                id: set.id.to_string(),
                description: set.description.clone(),
                files: set.len(),
            })
            .collect())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_set(&self, id: &str) -> HookgenResult<crate::domain::TemplateSet> {
        self.store
            .get(&TemplateSetId::new(id))
            .map_err(|e| match e {
                HookgenError::Application(ApplicationError::StoreLockError) => e,
                other => ApplicationError::TemplateResolution {
                    reason: format!("template set '{id}': {other}"),
                }
                .into(),
            })
    }

    /// Write all files of the tree, creating parent directories first.
    fn commit(&self, tree: &VirtualTree, output_dir: &Path) -> HookgenResult<()> {
        self.filesystem.create_dir_all(output_dir)?;

        for (path, content) in tree.files() {
            let target = output_dir.join(path.to_relative_path_buf());
            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&target, content)?;
        }
        Ok(())
    }

    /// Best-effort rollback; always returns an error.
    fn rollback<T>(&self, root: &Path, cause: HookgenError) -> HookgenResult<T> {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!(path = %root.display(), "Rollback successful");
                Err(cause)
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                Err(ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: format!("{e} (while handling: {cause})"),
                }
                .into())
            }
        }
    }
}
