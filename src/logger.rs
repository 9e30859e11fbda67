//! Terminal output: `[module] message` lines and a batch counter.
//!
//! `log!` always prints, `debug!` only with `--verbose`. While a
//! [`ProgressLine`] is on screen, log lines clear it first so the two never
//! interleave on one row.
//!
//! ```ignore
//! let progress = ProgressLine::new("run", files.len());
//! progress.inc();
//! log!("updated"; "{}", path.display());
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{IsTerminal, Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Non-zero while a progress line is drawn.
static BAR_COUNT: AtomicUsize = AtomicUsize::new(0);

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Print `[module] message` to stdout.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();

    if BAR_COUNT.load(Ordering::SeqCst) > 0 {
        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Prefix color by outcome: blue for commands, green for success, red for
/// failures, dim for no-ops.
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "run" | "check" | "config" => prefix.bright_blue().bold().to_string(),
        "updated" | "changed" | "done" => prefix.bright_green().bold().to_string(),
        "error" | "failed" | "abort" => prefix.bright_red().bold().to_string(),
        "unchanged" | "empty" | "skipped" => prefix.dimmed().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line (single-line counter)
// ============================================================================

/// Single-line progress display: `[run] 42/120`
///
/// Updates in place. Uses `try_lock` so worker threads never block on the
/// terminal; if the display is busy the refresh is skipped. Nothing is drawn
/// when stdout is not a terminal.
pub struct ProgressLine {
    module: &'static str,
    total: usize,
    current: AtomicUsize,
    visible: bool,
    lock: Mutex<()>,
}

impl ProgressLine {
    pub fn new(module: &'static str, total: usize) -> Self {
        let visible = total > 0 && stdout().is_terminal();
        if visible {
            BAR_COUNT.store(1, Ordering::SeqCst);
        }

        let progress = Self {
            module,
            total,
            current: AtomicUsize::new(0),
            visible,
            lock: Mutex::new(()),
        };
        progress.display();
        progress
    }

    /// Count one finished item.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.lock.try_lock() {
            self.display();
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    fn line(&self) -> String {
        format!(
            "{} {}/{}",
            colorize_prefix(self.module, self.module),
            self.current(),
            self.total
        )
    }

    fn display(&self) {
        if !self.visible {
            return;
        }
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        write!(stdout, "{}", self.line()).ok();
        stdout.flush().ok();
    }

    /// Clear the progress line; results are logged separately.
    pub fn finish(self) {
        // Drop clears the line
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        if !self.visible {
            return;
        }
        BAR_COUNT.store(0, Ordering::SeqCst);

        let _guard = self.lock.lock();
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        stdout.flush().ok();
    }
}
