//! Implementation of the `hookgen list` command.

use hookgen_core::application::TemplateSetInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    commands::build_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_service(&config, None)?;
    let sets = service.list_template_sets()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available template sets:")?;
            for line in table_rows(&sets) {
                output.print(&line)?;
            }
        }
        // JSON and bare ids go through `raw` so pipes get them even with --quiet.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&sets).map_err(std::io::Error::from)?;
            output.raw(&json)?;
        }
        ListFormat::List => {
            for set in &sets {
                output.raw(&set.id)?;
            }
        }
    }

    Ok(())
}

fn table_rows(sets: &[TemplateSetInfo]) -> Vec<String> {
    let id_width = sets.iter().map(|s| s.id.len()).max().unwrap_or(0);
    sets.iter()
        .map(|set| {
            let mount = set.mount.as_deref().unwrap_or("-");
            format!(
                "  {:<id_width$}  {:<8}  {:>2} files  {}",
                set.id, mount, set.files, set.description
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, mount: Option<&str>, files: usize) -> TemplateSetInfo {
        TemplateSetInfo {
            id: id.into(),
            description: format!("{id} files"),
            files,
            mount: mount.map(Into::into),
        }
    }

    #[test]
    fn rows_align_ids_and_show_unmounted_sets() {
        let rows = table_rows(&[
            info("configuration", Some("."), 4),
            info("extra", None, 1),
        ]);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  configuration  .  "));
        assert!(rows[1].starts_with("  extra          -  "));
        assert!(rows[0].contains(" 4 files"));
    }

    #[test]
    fn empty_store_has_no_rows() {
        assert!(table_rows(&[]).is_empty());
    }
}
