//! Line-oriented file I/O for header rewriting.
//!
//! Reading splits on `\n`, `\r\n` and a lone `\r`, and remembers the layout (terminator and
//! UTF-8 BOM) so that a rewrite keeps the file's shape. Writing goes through a
//! sibling temp file and a rename, so the target is either the old content or
//! the new content, never a mix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

/// Line terminator used when writing lines back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    /// Classic Mac OS.
    Cr,
}

impl LineEnding {
    /// Detect from the first terminator in `content`. Files without any fall back to `\n`.
    pub fn detect(content: &str) -> Self {
        let Some(pos) = content.find(['\r', '\n']) else {
            return Self::Lf;
        };
        let rest = &content[pos..];
        if rest.starts_with("\r\n") {
            Self::CrLf
        } else if rest.starts_with('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

/// Lines of a text file plus what is needed to write them back faithfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFile {
    pub lines: Vec<String>,
    pub ending: LineEnding,
    pub bom: bool,
}

impl TextFile {
    pub fn parse(content: &str) -> Self {
        let (content, bom) = match content.strip_prefix(BOM) {
            Some(rest) => (rest, true),
            None => (content, false),
        };

        Self {
            lines: split_lines(content),
            ending: LineEnding::detect(content),
            bom,
        }
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Render every line followed by the terminator.
    pub fn render(&self) -> String {
        let ending = self.ending.as_str();
        let capacity = self.lines.iter().map(|l| l.len() + ending.len()).sum::<usize>() + 3;

        let mut out = String::with_capacity(capacity);
        if self.bom {
            out.push(BOM);
        }
        for line in &self.lines {
            out.push_str(line);
            out.push_str(ending);
        }
        out
    }

    /// Replace `path` with the rendered content.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        write_atomic(path, self.render().as_bytes())
    }
}

/// Split on `\r\n`, `\n` or `\r`. A final terminator does not start a new line.
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let Some(pos) = rest.find(['\r', '\n']) else {
            lines.push(rest.to_string());
            break;
        };
        lines.push(rest[..pos].to_string());
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
    }
    lines
}

/// Temp file name next to `path`, e.g. `data/.report.csv.dedot-tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.dedot-tmp"))
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// Permissions of the existing file are copied onto the replacement.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);
    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

    let result = (|| -> io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        if let Some(permissions) = permissions {
            fs::set_permissions(&tmp, permissions)?;
        }
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(LineEnding::detect("a\nb\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\r\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\rb\r"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("single line"), LineEnding::Lf);
        assert_eq!(LineEnding::detect(""), LineEnding::Lf);
    }

    #[test]
    fn test_parse_lines() {
        let text = TextFile::parse("h1|h2\r\n1|2\r\n");
        assert_eq!(text.lines, vec!["h1|h2", "1|2"]);
        assert_eq!(text.ending, LineEnding::CrLf);
        assert!(!text.bom);
    }

    #[test]
    fn test_parse_bare_cr() {
        let text = TextFile::parse("h.1|h.2\rJohn|25.0\r");
        assert_eq!(text.lines, vec!["h.1|h.2", "John|25.0"]);
        assert_eq!(text.ending, LineEnding::Cr);
        assert_eq!(text.render(), "h.1|h.2\rJohn|25.0\r");
    }

    #[test]
    fn test_parse_mixed_terminators() {
        let text = TextFile::parse("a\r\nb\rc\nd");
        assert_eq!(text.lines, vec!["a", "b", "c", "d"]);
        assert_eq!(text.ending, LineEnding::CrLf);
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        let text = TextFile::parse("a\nb");
        assert_eq!(text.lines, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(TextFile::parse("").lines.is_empty());
        // A lone newline is one empty line
        assert_eq!(TextFile::parse("\n").lines, vec![""]);
    }

    #[test]
    fn test_bom_roundtrip() {
        let text = TextFile::parse("\u{feff}a.b|c\n1|2\n");
        assert!(text.bom);
        assert_eq!(text.lines[0], "a.b|c");
        assert_eq!(text.render(), "\u{feff}a.b|c\n1|2\n");
    }

    #[test]
    fn test_render_terminates_every_line() {
        let text = TextFile {
            lines: vec!["a".into(), "b".into()],
            ending: LineEnding::CrLf,
            bom: false,
        };
        assert_eq!(text.render(), "a\r\nb\r\n");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "old\n").unwrap();

        write_atomic(&path, b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!temp_path(&path).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.csv");
        assert!(write_atomic(&path, b"x").is_err());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("/data/in/report.csv"));
        assert_eq!(tmp, PathBuf::from("/data/in/.report.csv.dedot-tmp"));
    }
}
