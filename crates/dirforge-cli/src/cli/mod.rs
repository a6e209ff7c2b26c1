//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use dirforge_core::domain::ConfigFormat;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "dirforge",
    bin_name = "dirforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build a directory tree from a declarative description",
    long_about = "dirforge reads a tree description (indented text or YAML) and \
                  creates the directories it declares under a base directory, \
                  touching default files and applying permissions and ownership. \
                  Re-running with the same description changes nothing.",
    after_help = "EXAMPLES:\n\
        \x20 dirforge layout.txt\n\
        \x20 dirforge layout.yaml /srv/app\n\
        \x20 dirforge --dry-run --output-format json layout.yaml /srv/app\n\
        \x20 dirforge --completions bash > ~/.local/share/bash-completion/completions/dirforge",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub apply: ApplyArgs,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// What to build and where.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Tree description file.
    #[arg(
        value_name = "CONFIG_FILE",
        required_unless_present_any = ["completions", "show_settings"],
        help = "Tree description (indented text or YAML)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory the tree is created under.
    #[arg(
        value_name = "BASE_DIRECTORY",
        help = "Base directory (default: settings, then the current directory)"
    )]
    pub base_directory: Option<PathBuf>,

    /// Force a description format instead of guessing from the extension.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "auto",
        help = "Description format"
    )]
    pub format: InputFormat,

    /// Report what would change without writing anything.
    #[arg(
        short = 'n',
        long = "dry-run",
        help = "Show what would be created without creating"
    )]
    pub dry_run: bool,

    #[arg(long = "skip-permissions", help = "Ignore permissions metadata")]
    pub skip_permissions: bool,

    #[arg(long = "skip-ownership", help = "Ignore owner metadata")]
    pub skip_ownership: bool,

    /// Print a completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,

    /// Print the effective settings and exit.
    #[arg(long = "show-settings", help = "Print effective settings as TOML")]
    pub show_settings: bool,
}

/// Description format as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `.yaml` / `.yml` is YAML, anything else is indented text.
    #[default]
    Auto,
    #[value(alias = "text")]
    Indent,
    #[value(alias = "yml")]
    Yaml,
}

impl InputFormat {
    /// `None` leaves detection to the loader.
    pub fn resolve(self) -> Option<ConfigFormat> {
        match self {
            Self::Auto => None,
            Self::Indent => Some(ConfigFormat::Indent),
            Self::Yaml => Some(ConfigFormat::Yaml),
        }
    }
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

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_config_and_base() {
        let cli = Cli::parse_from(["dirforge", "layout.yaml", "/srv/app"]);
        assert_eq!(cli.apply.config_file, Some(PathBuf::from("layout.yaml")));
        assert_eq!(cli.apply.base_directory, Some(PathBuf::from("/srv/app")));
        assert_eq!(cli.apply.format, InputFormat::Auto);
    }

    #[test]
    fn base_directory_is_optional() {
        let cli = Cli::parse_from(["dirforge", "layout.txt"]);
        assert!(cli.apply.base_directory.is_none());
    }

    #[test]
    fn config_file_required_for_apply() {
        assert!(Cli::try_parse_from(["dirforge", "--dry-run"]).is_err());
    }

    #[test]
    fn completions_need_no_config_file() {
        let cli = Cli::try_parse_from(["dirforge", "--completions", "zsh"]).unwrap();
        assert!(matches!(cli.apply.completions, Some(Shell::Zsh)));
    }

    #[test]
    fn show_settings_needs_no_config_file() {
        let cli = Cli::try_parse_from(["dirforge", "--show-settings"]).unwrap();
        assert!(cli.apply.show_settings);
    }

    #[test]
    fn format_override() {
        let cli = Cli::parse_from(["dirforge", "--format", "yml", "tree"]);
        assert_eq!(cli.apply.format.resolve(), Some(ConfigFormat::Yaml));
        assert_eq!(InputFormat::Auto.resolve(), None);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["dirforge", "--quiet", "--verbose", "tree"]);
        assert!(result.is_err());
    }
}
