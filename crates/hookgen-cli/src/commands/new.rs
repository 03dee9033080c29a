//! Implementation of the `hookgen new` command.
//!
//! Responsibility: resolve the name and destination, call the core generate
//! service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use hookgen_core::application::{GeneratedProject, PostTask};
use hookgen_core::domain::{Preset, ProjectName};
use hookgen_core::error::HookgenError;

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::build_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `hookgen new` command.
///
/// 1. Normalise the project name and resolve the output directory
/// 2. Confirm with the user unless `--yes`, `--quiet` or `--dry-run`
/// 3. `--dry-run`: plan only and describe the result
/// 4. Otherwise generate and commit, behind a spinner
/// 5. Print next steps from the scheduled post tasks
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = ProjectName::parse(args.name.as_str()).map_err(HookgenError::from)?;
    let output_dir = resolve_output_dir(args.output.as_deref(), &config);

    if let Some(dir) = &args.skeleton {
        if !dir.is_dir() {
            return Err(CliError::InvalidInput {
                message: format!("skeleton directory '{}' does not exist", dir.display()),
            });
        }
    }

    let service = build_service(&config, args.skeleton.as_deref())?.with_force(args.force);

    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&name, &output_dir, service.preset(), &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    if args.dry_run {
        let project = service.plan(name.raw())?;
        return describe_plan(&project, &output_dir, &output);
    }

    let spinner = output.spinner(format!("Generating '{name}'..."));
    let result = service.generate(name.raw(), &output_dir);
    spinner.finish_and_clear();
    let project = result?;

    info!(run_id = %project.run_id, files = project.tree.len(), "Generation completed");

    output.success(&format!(
        "Project '{}' created at {}",
        project.name,
        project.destination(&output_dir).display()
    ))?;
    print_next_steps(&project, &output)?;

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// `--output` wins over the configured directory, which wins over `.`.
fn resolve_output_dir(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.output.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    name: &ProjectName,
    output_dir: &Path,
    preset: &Preset,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:      {name}"))?;
    out.print(&format!("  Location:     {}", output_dir.join(name.as_str()).display()))?;
    out.print(&format!(
        "  Skeleton:     v{} ({} styles)",
        preset.generator.version, preset.generator.style
    ))?;
    out.print(&format!(
        "  Templates:    {}",
        preset
            .templates
            .iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ))?;
    out.print(&format!("  Pre-commit:   {}", preset.hooks.pre_commit))?;
    out.print("")?;
    Ok(())
}

fn describe_plan(project: &GeneratedProject, output_dir: &Path, out: &OutputManager) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would create '{}' at {}",
        project.name,
        project.destination(output_dir).display()
    ))?;
    for (path, content) in project.tree.files() {
        out.print(&format!("  {path} ({} bytes)", content.len()))?;
    }
    for task in &project.tasks {
        out.print(&format!("  then: {task}"))?;
    }
    Ok(())
}

fn print_next_steps(project: &GeneratedProject, out: &OutputManager) -> CliResult<()> {
    if out.is_quiet() {
        return Ok(());
    }
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", project.name))?;
    for command in next_step_commands(&project.tasks) {
        out.print(&format!("  {command}"))?;
    }
    Ok(())
}

/// Shell commands that carry out the scheduled tasks, deduplicated.
fn next_step_commands(tasks: &[PostTask]) -> Vec<String> {
    let mut commands = Vec::new();
    for task in tasks {
        let command = match task {
            PostTask::InstallDependencies { .. } => "npm install".to_string(),
        };
        if !commands.contains(&command) {
            commands.push(command);
        }
    }
    commands
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hookgen_core::domain::TreePath;

    #[test]
    fn output_flag_wins() {
        let mut config = AppConfig::default();
        config.output.directory = Some(PathBuf::from("/from/config"));
        assert_eq!(
            resolve_output_dir(Some(Path::new("/from/flag")), &config),
            PathBuf::from("/from/flag")
        );
    }

    #[test]
    fn configured_directory_is_fallback() {
        let mut config = AppConfig::default();
        config.output.directory = Some(PathBuf::from("/from/config"));
        assert_eq!(resolve_output_dir(None, &config), PathBuf::from("/from/config"));
    }

    #[test]
    fn current_directory_is_default() {
        assert_eq!(
            resolve_output_dir(None, &AppConfig::default()),
            PathBuf::from(".")
        );
    }

    #[test]
    fn install_tasks_collapse_to_one_command() {
        let tasks = vec![
            PostTask::InstallDependencies {
                working_directory: TreePath::parse("/my-app").unwrap(),
            },
            PostTask::InstallDependencies {
                working_directory: TreePath::parse("/my-app/e2e").unwrap(),
            },
        ];
        assert_eq!(next_step_commands(&tasks), vec!["npm install".to_string()]);
    }

    #[test]
    fn no_tasks_no_commands() {
        assert!(next_step_commands(&[]).is_empty());
    }
}
