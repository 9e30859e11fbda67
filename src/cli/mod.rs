//! Command-line interface module.

mod args;
pub mod header;
pub mod init;
pub mod process;

pub use args::{Cli, Commands, ProcessArgs};
