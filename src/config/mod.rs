//! Configuration management for `dedot.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   └── processing # [processing]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! ├── util.rs        # Config file lookup, format detection
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! The file may also be JSON (same shape) when its name ends in `.json`.

pub mod section;
pub mod types;
mod util;

use util::{ConfigFormat, find_config_file};

pub use section::{DEFAULT_FILE_PATTERN, ProcessingConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, ProcessArgs},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const DEFAULT_CONFIG_NAME: &str = "dedot.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing dedot.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absolute path to the config file, empty when running without one (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Header processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Load configuration for the given command.
    ///
    /// Searches upward from cwd for the config file. `run` and `check` need
    /// one; `header` falls back to defaults. CLI overrides are applied and
    /// the result is validated before it is returned.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let path = crate::utils::path::normalize_path(&path);
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None if cli.requires_config() => {
                log!(
                    "error";
                    "config file '{}' not found. Run 'dedot init' to create one.",
                    cli.config.display()
                );
                return Err(ConfigError::NotFound(cwd.join(&cli.config)).into());
            }
            None => {
                debug!("config"; "no config file found, using defaults");
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.finalize(cli, &cwd);
        config.validate(cli)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content, ConfigFormat::from_path(path))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse content, collecting any unknown fields.
    fn parse_with_ignored(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let mut collect = |path: serde_ignored::Path| ignored.push(path.to_string());

        let config = match format {
            ConfigFormat::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, &mut collect)?
            }
            ConfigFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let config = serde_ignored::deserialize(&mut deserializer, &mut collect)?;
                deserializer.end()?;
                config
            }
        };
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Path shown in logs: relative to the target directory when possible.
    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.processing.target_directory)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, cli: &Cli, cwd: &Path) {
        let root = self.root.clone();
        self.processing.normalize(&root);

        match &cli.command {
            Commands::Run { args } | Commands::Check { args } => {
                self.apply_process_args(args, cwd);
            }
            Commands::Header { separator, .. } => {
                Self::update_option(&mut self.processing.column_separator, separator.as_ref());
            }
            Commands::Init { .. } => {}
        }
    }

    /// Apply `run`/`check` arguments. A directory given on the command line
    /// is relative to the working directory, not the config file.
    fn apply_process_args(&mut self, args: &ProcessArgs, cwd: &Path) {
        if let Some(dir) = &args.dir {
            let expanded = crate::utils::path::expand_tilde(dir);
            self.processing.target_directory =
                crate::utils::path::normalize_path(&cwd.join(expanded));
        }
        Self::update_option(&mut self.processing.file_pattern, args.pattern.as_ref());
        Self::update_option(&mut self.processing.column_separator, args.separator.as_ref());
        Self::update_option(
            &mut self.processing.include_subdirectories,
            args.recursive.as_ref(),
        );
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        match &cli.command {
            Commands::Run { .. } | Commands::Check { .. } => {
                self.processing.validate_for_run(&mut diag);
            }
            Commands::Header { .. } => self.processing.validate_rules(&mut diag),
            Commands::Init { .. } => {}
        }

        // `header` writes results to stdout, keep it clean for piping
        if !matches!(cli.command, Commands::Header { .. }) || crate::logger::is_verbose() {
            diag.print_warnings();
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse TOML config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content, ConfigFormat::Toml).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
