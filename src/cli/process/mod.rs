//! `run` and `check` commands.
//!
//! Both discover matching files under the target directory, clean every
//! header in parallel, then log results in discovery order. `check` never
//! writes and fails when any file would change.

mod report;

use std::error::Error as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use rayon::prelude::*;

use crate::apply::{ApplyError, ApplyMode, ApplyOutcome, ApplyReport, apply_rules};
use crate::cli::ProcessArgs;
use crate::config::AppConfig;
use crate::header::HeaderRules;
use crate::logger::ProgressLine;
use crate::scan::collect_files;
use crate::utils::plural_count;
use crate::{debug, log};

pub use report::{BatchFailure, BatchReport};

/// How a batch is run
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub mode: ApplyMode,
    /// Worker threads; `None` uses rayon's global pool.
    pub jobs: Option<usize>,
    pub fail_fast: bool,
}

impl BatchOptions {
    pub fn from_args(args: &ProcessArgs, mode: ApplyMode) -> Self {
        Self {
            mode,
            jobs: args.jobs.map(usize::from),
            fail_fast: args.fail_fast,
        }
    }

    const fn module(&self) -> &'static str {
        match self.mode {
            ApplyMode::Write => "run",
            ApplyMode::DryRun => "check",
        }
    }
}

/// Result for one discovered path
#[derive(Debug)]
enum FileStatus {
    Done(ApplyReport),
    Failed(ApplyError),
    /// Not started: shutdown requested or an earlier file failed under `--fail-fast`.
    Skipped,
}

/// Entry point for `run` and `check`.
pub fn process_command(config: &AppConfig, args: &ProcessArgs, mode: ApplyMode) -> Result<()> {
    let options = BatchOptions::from_args(args, mode);
    let report = process_target(config, &options)?;

    if crate::core::is_shutdown() {
        bail!("interrupted, {} not processed", plural_count(report.skipped, "file"));
    }
    if report.has_failures() {
        bail!("{} could not be processed", plural_count(report.failed(), "file"));
    }
    if options.mode == ApplyMode::DryRun && report.updated > 0 {
        bail!("{} would change", plural_count(report.updated, "header"));
    }
    Ok(())
}

/// Discover and process every matching file, logging as it goes.
pub fn process_target(config: &AppConfig, options: &BatchOptions) -> Result<BatchReport> {
    let module = options.module();
    let processing = &config.processing;
    let rules = processing.rules();
    let pattern = processing.pattern()?;

    log!(
        module;
        "{} in {} (separator {:?}, {}, {})",
        pattern.as_str(),
        processing.target_directory.display(),
        rules.separator,
        plural_count(rules.active_count(), "rule"),
        if processing.include_subdirectories { "recursive" } else { "top level only" }
    );

    let files = collect_files(
        &processing.target_directory,
        &pattern,
        processing.include_subdirectories,
    )?;

    let mut report = BatchReport::new(options.mode);
    if files.is_empty() {
        log!(module; "no files matching `{}`", pattern.as_str());
        return Ok(report);
    }
    debug!(module; "found {}", plural_count(files.len(), "file"));

    let statuses = run_batch(&files, &rules, options)?;

    for (path, status) in files.iter().zip(statuses) {
        let shown = config.display_path(path).to_string();
        match status {
            FileStatus::Done(done) => {
                log_outcome(options.mode, &shown, &done.outcome);
                report.record(&done.outcome);
            }
            FileStatus::Failed(err) => {
                let reason = error_chain(&err);
                log!("failed"; "{}: {}", shown, reason);
                report.record_failure(shown, reason);
            }
            FileStatus::Skipped => {
                debug!("skipped"; "{}", shown);
                report.record_skipped();
            }
        }
    }

    report.print();
    log!(module; "{}", report);
    Ok(report)
}

/// Process `files` in parallel. Output order matches input order.
fn run_batch(
    files: &[PathBuf],
    rules: &HeaderRules,
    options: &BatchOptions,
) -> Result<Vec<FileStatus>> {
    let stop = AtomicBool::new(false);
    let progress = ProgressLine::new(options.module(), files.len());

    let work = || {
        files
            .par_iter()
            .map(|path| {
                if crate::core::is_shutdown() || stop.load(Ordering::Relaxed) {
                    return FileStatus::Skipped;
                }
                let status = match apply_rules(path, rules, options.mode) {
                    Ok(done) => FileStatus::Done(done),
                    Err(err) => {
                        if options.fail_fast {
                            stop.store(true, Ordering::Relaxed);
                        }
                        FileStatus::Failed(err)
                    }
                };
                progress.inc();
                status
            })
            .collect::<Vec<_>>()
    };

    let statuses = match options.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build worker pool")?
            .install(work),
        None => work(),
    };

    progress.finish();
    Ok(statuses)
}

fn log_outcome(mode: ApplyMode, shown: &str, outcome: &ApplyOutcome) {
    match outcome {
        ApplyOutcome::Updated { original, cleaned } => {
            let label = match mode {
                ApplyMode::Write => "updated",
                ApplyMode::DryRun => "changed",
            };
            log!(label; "{}", shown);
            println!("  {} {}", "-".red(), original);
            println!("  {} {}", "+".green(), cleaned);
        }
        ApplyOutcome::Unchanged | ApplyOutcome::Empty => {
            debug!(outcome.label(); "{}", shown);
        }
    }
}

/// `error: cause: cause` on one line.
fn error_chain(err: &ApplyError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Substitution;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.processing.target_directory = dir.path().to_path_buf();
        config.processing.replacements = vec![Substitution::new(".", "")];
        config
    }

    fn options(mode: ApplyMode) -> BatchOptions {
        BatchOptions {
            mode,
            jobs: Some(2),
            fail_fast: false,
        }
    }

    #[test]
    fn test_process_target_updates_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "x.y|z\n1|2\n").unwrap();
        fs::write(dir.path().join("b.csv"), "xy|z\n").unwrap();
        fs::write(dir.path().join("c.csv"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "a.b\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/d.csv"), "p.q\n").unwrap();

        let config = config_for(&dir);
        let report = process_target(&config, &options(ApplyMode::Write)).unwrap();

        assert_eq!(report.updated, 2);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.empty, 1);
        assert!(!report.has_failures());
        assert_eq!(fs::read_to_string(dir.path().join("a.csv")).unwrap(), "xy|z\n1|2\n");
        assert_eq!(fs::read_to_string(dir.path().join("sub/d.csv")).unwrap(), "pq\n");
        assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "a.b\n");
    }

    #[test]
    fn test_process_target_not_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/d.csv"), "p.q\n").unwrap();

        let mut config = config_for(&dir);
        config.processing.include_subdirectories = false;
        let report = process_target(&config, &options(ApplyMode::Write)).unwrap();

        assert_eq!(report.total(), 0);
        assert_eq!(fs::read_to_string(dir.path().join("sub/d.csv")).unwrap(), "p.q\n");
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "x.y\n").unwrap();

        let config = config_for(&dir);
        let report = process_target(&config, &options(ApplyMode::DryRun)).unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(fs::read_to_string(dir.path().join("a.csv")).unwrap(), "x.y\n");
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let dir = TempDir::new().unwrap();
        for i in 0..8 {
            fs::write(dir.path().join(format!("{i}.csv")), "a.b|c.d\n").unwrap();
        }

        let config = config_for(&dir);
        let mut opts = options(ApplyMode::DryRun);
        opts.jobs = Some(1);
        let sequential = process_target(&config, &opts).unwrap();
        opts.jobs = None;
        let parallel = process_target(&config, &opts).unwrap();

        assert_eq!(sequential.updated, 8);
        assert_eq!(parallel.updated, 8);
    }

    #[test]
    fn test_missing_target_is_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.processing.target_directory = dir.path().join("missing");

        assert!(process_target(&config, &options(ApplyMode::Write)).is_err());
    }

    #[test]
    fn test_error_chain_includes_cause() {
        let err = ApplyError::Read {
            path: PathBuf::from("a.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(error_chain(&err), "failed to read `a.csv`: gone");
    }
}
