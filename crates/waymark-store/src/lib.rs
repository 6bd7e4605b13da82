pub mod checkpoint;
pub mod config;
pub mod decisions;
pub mod readme;
pub mod render;
pub mod store;
pub mod tree;
pub mod vcs;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use config::StoreConfig;
pub use decisions::{DecisionEntry, SENTINEL};
pub use store::{
    CheckpointReport, ContextStore, HandoffReport, InitReport, SaveReport, StatusReport,
};
pub use tree::file_tree;
pub use vcs::{Git, Vcs};

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Read a file, treating a missing file as empty.
pub fn read_or_empty(path: &Path) -> anyhow::Result<String> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// A line of text and the terminator that followed it: `"\n"`, `"\r\n"`, or
/// `""` for an unterminated last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub eol: &'a str,
}

/// Split `content` into lines, keeping each line's own terminator so that
/// concatenating `text + eol` reproduces the input exactly.
pub fn split_lines(content: &str) -> Vec<Line<'_>> {
    content
        .split_inclusive('\n')
        .map(|raw| {
            let text = match raw.strip_suffix('\n') {
                Some(t) => t.strip_suffix('\r').unwrap_or(t),
                None => raw,
            };
            Line {
                text,
                eol: &raw[text.len()..],
            }
        })
        .collect()
}

/// Terminator for newly written lines: CRLF when `content` already uses it.
pub fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_keeps_terminators() {
        let content = "a\r\nb\n\nc";
        let lines = split_lines(content);
        assert_eq!(
            lines.iter().map(|l| (l.text, l.eol)).collect::<Vec<_>>(),
            [("a", "\r\n"), ("b", "\n"), ("", "\n"), ("c", "")]
        );
        let joined: String = lines.iter().flat_map(|l| [l.text, l.eol]).collect();
        assert_eq!(joined, content);
        assert!(split_lines("").is_empty());
        assert_eq!(line_ending(content), "\r\n");
        assert_eq!(line_ending("a\nb"), "\n");
    }

    #[test]
    fn write_atomic_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.txt");
        write_atomic(&path, b"hello world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
    }

    #[test]
    fn write_atomic_replaces_and_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a").join("b.md");
        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn read_or_empty_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_or_empty(&tmp.path().join("nope")).unwrap(), "");
    }
}
