//! `--show-settings`: print the effective settings.

use std::path::Path;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `source` is the settings file that was consulted.
pub fn execute(config: &AppConfig, source: &Path, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("# Settings (file: {})", source.display()))?;
    output.print(&render(config)?)?;
    Ok(())
}

fn render(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise settings: {e}"),
        source: Some(Box::new(e)),
    })
}
