//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Clean the header line of delimited text files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: dedot.toml, searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = crate::config::DEFAULT_CONFIG_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Clean headers of all matching files in place
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: ProcessArgs,
    },

    /// Report files whose header would change, without writing
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: ProcessArgs,
    },

    /// Print the cleaned form of header lines.
    /// Reads lines from stdin when none are given or when `-` is passed.
    #[command(visible_alias = "h")]
    Header {
        /// Header lines to clean
        #[arg(value_name = "LINE")]
        lines: Vec<String>,

        /// Column separator (overrides config)
        #[arg(short, long)]
        separator: Option<String>,
    },

    /// Write a starter dedot.toml into the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the template instead of writing it
        #[arg(long)]
        dry: bool,
    },
}

/// Shared arguments for Run and Check commands
#[derive(clap::Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Directory to process (overrides `target_directory`, relative to the current directory)
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// File name pattern, e.g. "*.csv"
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Column separator
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Include subdirectories
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub recursive: Option<bool>,

    /// Number of files processed in parallel (default: number of CPUs)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    pub const fn is_run(&self) -> bool {
        matches!(self.command, Commands::Run { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }

    /// Whether the command needs a config file to exist.
    pub const fn requires_config(&self) -> bool {
        self.is_run() || self.is_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dedot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = parse(&["run"]);
        assert_eq!(cli.config, PathBuf::from("dedot.toml"));
        assert!(cli.requires_config());

        let Commands::Run { args } = cli.command else {
            panic!("expected run");
        };
        assert!(args.dir.is_none());
        assert!(args.recursive.is_none());
        assert!(args.jobs.is_none());
        assert!(!args.fail_fast);
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = parse(&["check", "data", "-p", "*.txt", "-s", ";", "-r", "-j", "2", "--fail-fast"]);
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.dir, Some(PathBuf::from("data")));
        assert_eq!(args.pattern.as_deref(), Some("*.txt"));
        assert_eq!(args.separator.as_deref(), Some(";"));
        assert_eq!(args.recursive, Some(true));
        assert_eq!(args.jobs, Some(2));
        assert!(args.fail_fast);
    }

    #[test]
    fn test_parse_recursive_false() {
        let cli = parse(&["run", "--recursive=false"]);
        let Commands::Run { args } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.recursive, Some(false));
    }

    #[test]
    fn test_jobs_must_be_positive() {
        let result = Cli::try_parse_from(["dedot", "run", "-j", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_header_global_config() {
        let cli = parse(&["header", "a.b|c", "-C", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(!cli.requires_config());
        let Commands::Header { lines, separator } = cli.command else {
            panic!("expected header");
        };
        assert_eq!(lines, vec!["a.b|c"]);
        assert!(separator.is_none());
    }
}
