//! dedot - clean the header line of delimited text files.
//!
//! The core is [`header::clean_header`] (pure string transform) and
//! [`apply::apply_to_file`] (rewrite one file in place). The `dedot` binary
//! drives them over a directory.

pub mod apply;
pub mod cli;
pub mod config;
pub mod core;
pub mod header;
pub mod logger;
pub mod scan;
pub mod utils;

pub use apply::{ApplyError, ApplyOutcome, ApplyReport, apply_to_file, preview_file};
pub use header::{Substitution, clean_first_line, clean_header};
