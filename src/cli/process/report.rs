//! Batch report types and formatting.

use std::fmt;

use owo_colors::OwoColorize;

use crate::apply::{ApplyMode, ApplyOutcome};
use crate::utils::{plural_count, plural_s};

/// A file that could not be processed
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Path as shown to the user.
    pub path: String,
    /// Error message, including its cause.
    pub reason: String,
}

/// Per-run counters plus the list of failures
#[derive(Debug, Default)]
pub struct BatchReport {
    pub mode: ApplyMode,
    pub updated: usize,
    pub unchanged: usize,
    pub empty: usize,
    /// Files never started (Ctrl+C or `--fail-fast`).
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn new(mode: ApplyMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Count one finished file.
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Empty => self.empty += 1,
            ApplyOutcome::Unchanged => self.unchanged += 1,
            ApplyOutcome::Updated { .. } => self.updated += 1,
        }
    }

    pub fn record_failure(&mut self, path: String, reason: String) {
        self.failures.push(BatchFailure { path, reason });
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of files looked at, including skipped ones.
    pub fn total(&self) -> usize {
        self.updated + self.unchanged + self.empty + self.skipped + self.failed()
    }

    /// Print failed files to stderr.
    pub fn print(&self) {
        if self.failures.is_empty() {
            return;
        }
        eprintln!();

        let count = self.failed();
        eprintln!(
            "{} {}",
            "failed".red().bold(),
            format!("({count} file{})", plural_s(count)).dimmed()
        );

        for failure in &self.failures {
            eprintln!("{}{}{}", "[".dimmed(), failure.path.cyan(), "]".dimmed());
            eprintln!("{} {}", "→".red(), failure.reason);
        }
    }

    fn changed_label(&self) -> &'static str {
        match self.mode {
            ApplyMode::Write => "updated",
            ApplyMode::DryRun => "would change",
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            plural_count(self.updated, "file"),
            self.changed_label()
        )?;

        write!(f, "{}", format!(", {} unchanged", self.unchanged).dimmed())?;
        if self.empty > 0 {
            write!(f, "{}", format!(", {} empty", self.empty).dimmed())?;
        }
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped.to_string().yellow())?;
        }
        if self.has_failures() {
            write!(f, ", {} failed", self.failed().to_string().red().bold())?;
        }
        Ok(())
    }
}
