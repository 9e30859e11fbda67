//! `header` command: print cleaned header lines.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::header::HeaderRules;

/// Clean each line and print it. Reads stdin when `lines` is empty or `-`.
pub fn print_cleaned(config: &AppConfig, lines: &[String]) -> Result<()> {
    let rules = config.processing.rules();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if reads_stdin(lines) {
        let stdin = io::stdin();
        clean_stream(&rules, stdin.lock(), &mut out)
    } else {
        for line in lines {
            writeln!(out, "{}", rules.clean(line))?;
        }
        Ok(())
    }
}

fn reads_stdin(lines: &[String]) -> bool {
    match lines {
        [] => true,
        [only] => only == "-",
        _ => false,
    }
}

/// Clean every line of `input`, stripping `\r` before cleaning.
fn clean_stream(rules: &HeaderRules, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read header line from stdin")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        writeln!(out, "{}", rules.clean(line))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Substitution;

    #[test]
    fn test_reads_stdin() {
        assert!(reads_stdin(&[]));
        assert!(reads_stdin(&["-".to_string()]));
        assert!(!reads_stdin(&["a.b".to_string()]));
        assert!(!reads_stdin(&["-".to_string(), "a".to_string()]));
    }

    #[test]
    fn test_clean_stream() {
        let rules = HeaderRules::new("|", vec![Substitution::new(".", "")]);
        let input = "Name.First|Age.Years\r\nx.y\n";
        let mut out = Vec::new();

        clean_stream(&rules, input.as_bytes(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "NameFirst|AgeYears\nxy\n");
    }
}
