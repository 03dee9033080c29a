//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "hookgen",
    bin_name = "hookgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Lint-ready projects with pre-commit hooks wired in",
    long_about = "hookgen generates a base project, overlays configuration \
                  templates, reconciles its dependencies and patches the \
                  manifest so linting runs on every commit.",
    after_help = "EXAMPLES:\n\
        \x20 hookgen new \"My App\"\n\
        \x20 hookgen new my-app --output ~/code --yes\n\
        \x20 hookgen list --format json\n\
        \x20 hookgen completions bash > /usr/share/bash-completion/completions/hookgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 hookgen new my-app\n\
            \x20 hookgen new \"My App\" --dry-run\n\
            \x20 hookgen new my-app --skeleton ./skeletons/angular --yes"
    )]
    New(NewArgs),

    /// List the template sets available for overlaying.
    #[command(
        visible_alias = "ls",
        about = "List available template sets",
        after_help = "EXAMPLES:\n\
            \x20 hookgen list\n\
            \x20 hookgen list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 hookgen init\n\
            \x20 hookgen init --force\n\
            \x20 hookgen --config ./hookgen.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hookgen completions bash > ~/.local/share/bash-completion/completions/hookgen\n\
            \x20 hookgen completions zsh  > ~/.zfunc/_hookgen\n\
            \x20 hookgen completions fish > ~/.config/fish/completions/hookgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hookgen config get preset.generator.version\n\
            \x20 hookgen config list\n\
            \x20 hookgen config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `hookgen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. Normalised to lowercase-hyphenated form, so `"My App"`
    /// becomes `my-app`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Directory the project root is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Write into an existing directory.
    #[arg(long = "force", help = "Write into an existing directory")]
    pub force: bool,

    /// Run the pipeline without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Read the base skeleton from a directory instead of the built-in one.
    #[arg(
        long = "skeleton",
        value_name = "DIR",
        help = "Skeleton directory to use as the base project"
    )]
    pub skeleton: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `hookgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hookgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hookgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hookgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `preset.hooks.pre_commit`.
        key: String,
    },
    /// Print the whole effective configuration as TOML.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_with_spaces_in_name() {
        let cli = Cli::parse_from(["hookgen", "new", "My App", "--dry-run"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "My App");
        assert!(args.dry_run);
        assert!(args.output.is_none());
    }

    #[test]
    fn parse_new_with_output_and_skeleton() {
        let cli = Cli::parse_from([
            "hookgen",
            "new",
            "demo",
            "-o",
            "/tmp/out",
            "--skeleton",
            "/tmp/skel",
            "-y",
            "--force",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.output, Some(PathBuf::from("/tmp/out")));
        assert_eq!(args.skeleton, Some(PathBuf::from("/tmp/skel")));
        assert!(args.yes && args.force);
    }

    #[test]
    fn list_defaults_to_table() {
        let cli = Cli::parse_from(["hookgen", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["hookgen", "list", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hookgen", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_requires_subcommand() {
        assert!(Cli::try_parse_from(["hookgen", "config"]).is_err());
        assert!(Cli::try_parse_from(["hookgen", "config", "get", "output.no_color"]).is_ok());
    }
}
