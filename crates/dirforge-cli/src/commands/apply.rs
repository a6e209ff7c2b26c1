//! Apply a tree description to a base directory.
//!
//! Responsibility: merge flags with settings, call the core services, and
//! display the report. No business logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use dirforge_adapters::{LocalFilesystem, default_parsers};
use dirforge_core::application::{ApplyOptions, ApplyReport, Outcome, ScaffoldService, TreeService};

use crate::{
    cli::{ApplyArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute an apply run.
///
/// 1. Resolve the base directory and options
/// 2. Load and validate the tree description
/// 3. Materialize it via `ScaffoldService`
/// 4. Render the report (JSON or status lines plus a summary)
#[instrument(skip_all, fields(config_file = ?args.config_file))]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config_file = args
        .config_file
        .clone()
        .ok_or_else(|| CliError::InvalidInput {
            message: "a tree description file is required".into(),
        })?;
    let base = resolve_base(args.base_directory.clone(), &config);
    let options = resolve_options(&args, &config);

    debug!(base = %base.display(), ?options, "Options resolved");

    // 1. Load
    let loader = TreeService::new(Box::new(LocalFilesystem::new()), default_parsers());
    let tree = loader.load(&config_file, args.format.resolve())?;

    info!(
        roots = tree.roots().len(),
        nodes = tree.node_count(),
        "Tree description loaded"
    );

    // 2. Apply
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));
    let report = service.apply(&tree, &base, &options)?;

    // 3. Render
    if output.format() == OutputFormat::Json {
        output.json(&report)?;
        return Ok(());
    }

    if report.dry_run {
        output.header("Dry run: nothing will be written")?;
    }
    for outcome in &report.outcomes {
        let (status, line) = describe(outcome, report.dry_run);
        match status {
            Status::Success => output.success(&line)?,
            Status::Info => output.info(&line)?,
            Status::Warning => output.warning(&line)?,
        }
    }

    output.print(&summary(&report))?;
    let warnings = report.warning_count();
    if warnings > 0 {
        output.warning(&format!(
            "Completed with {warnings} warning{}",
            if warnings == 1 { "" } else { "s" }
        ))?;
    }

    Ok(())
}

/// Positional argument, then settings, then the current directory.
fn resolve_base(arg: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    arg.or_else(|| config.apply.base_directory.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A skip set in either place wins.
fn resolve_options(args: &ApplyArgs, config: &AppConfig) -> ApplyOptions {
    ApplyOptions {
        dry_run: args.dry_run,
        skip_permissions: args.skip_permissions || config.apply.skip_permissions,
        skip_ownership: args.skip_ownership || config.apply.skip_ownership,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warning,
}

fn describe(outcome: &Outcome, dry_run: bool) -> (Status, String) {
    let verb = |done: &'static str, pending: &'static str| if dry_run { pending } else { done };

    match outcome {
        Outcome::DirectoryCreated { path } => (
            Status::Success,
            format!("{} directory {}", verb("Created", "Would create"), path.display()),
        ),
        Outcome::DirectoryExists { path } => (
            Status::Info,
            format!("Directory exists: {}", path.display()),
        ),
        Outcome::FileCreated { path } => (
            Status::Success,
            format!("{} file {}", verb("Created", "Would create"), path.display()),
        ),
        Outcome::FileExists { path } => {
            (Status::Info, format!("File exists: {}", path.display()))
        }
        Outcome::PermissionsApplied { path, mode } => (
            Status::Info,
            format!(
                "{} permissions {mode} on {}",
                verb("Set", "Would set"),
                path.display()
            ),
        ),
        Outcome::OwnerApplied { path, owner } => (
            Status::Info,
            format!(
                "{} owner {owner} on {}",
                verb("Set", "Would set"),
                path.display()
            ),
        ),
        Outcome::Warning { path, message } => {
            (Status::Warning, format!("{}: {message}", path.display()))
        }
    }
}

fn summary(report: &ApplyReport) -> String {
    let plural = |n: usize| if n == 1 { "y" } else { "ies" };
    let created = report.directories_created();
    let existing = report.directories_existing();
    let files = report.files_created();

    let verb = if report.dry_run { "would be created" } else { "created" };
    format!(
        "{created} director{} {verb}, {existing} already present, {files} file{} {verb}",
        plural(created),
        if files == 1 { "" } else { "s" },
    )
}
