//! Application settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate never sees them.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (merged at the call-site, not here)
//! 2. Environment variables, `DIRFORGE__SECTION__KEY`
//! 3. Settings file (`--settings FILE` or the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub apply: ApplyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

/// Defaults for a run; flags can only switch these on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    pub skip_ownership: bool,
    pub skip_permissions: bool,
    /// Used when no base directory is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load settings from `settings_file` (or the default location) and the
    /// environment.
    ///
    /// An explicit file must exist; the default one is optional.
    pub fn load(settings_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let env = Environment::with_prefix("DIRFORGE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);

        match settings_file {
            Some(path) => Self::build(path, true, env),
            None => Self::build(&Self::config_path(), false, env),
        }
    }

    fn build(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Path to the default settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.dirforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dirforge", "dirforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".dirforge.toml"))
    }
}
