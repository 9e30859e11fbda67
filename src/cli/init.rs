//! `init` command: write a starter config.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::{DEFAULT_FILE_PATTERN, ProcessingConfig};
use crate::header::DEFAULT_SEPARATOR;
use crate::log;

/// Generate dedot.toml content with comments
pub fn generate_config_template() -> String {
    let fields = ProcessingConfig::FIELDS;
    let mut out = String::new();

    out.push_str(&format!(
        "# dedot configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("[processing]\n");
    out.push_str(&format!(
        "# Directory to process, relative to this file\n{} = \"data\"\n\n",
        leaf(fields.target_directory.as_str())
    ));
    out.push_str(&format!(
        "# File name wildcard: `*` any run of characters, `?` one character\n{} = \"{}\"\n\n",
        leaf(fields.file_pattern.as_str()),
        DEFAULT_FILE_PATTERN
    ));
    out.push_str(&format!(
        "{} = true\n",
        leaf(fields.include_subdirectories.as_str())
    ));
    out.push_str(&format!(
        "{} = \"{}\"\n\n",
        leaf(fields.column_separator.as_str()),
        DEFAULT_SEPARATOR
    ));
    out.push_str("# Applied to every header field, in order\n");
    out.push_str("[[processing.replacements]]\nfind = \".\"\nreplace = \"\"\n");

    out
}

fn leaf(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Write the template to `path`, refusing to overwrite.
///
/// If `dry_run` is true, only prints the template to stdout.
pub fn write_config(path: &Path, dry_run: bool) -> Result<()> {
    let content = generate_config_template();

    if dry_run {
        print!("{content}");
        return Ok(());
    }

    if path.exists() {
        bail!("'{}' already exists", path.display());
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "created {}", path.display());
    Ok(())
}
