//! Process-wide run state.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//!
//! A batch checks the flag before starting each file. A file that is already
//! being rewritten always finishes.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The first Ctrl+C stops the batch after the files in flight. A second one
/// exits immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("abort"; "stopping after current files, press Ctrl+C again to quit now");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering - worst case is starting one more file before stopping
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
