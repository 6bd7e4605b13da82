//! Append-only decision log terminated by a sentinel line.
//!
//! Entries look like `[2026-10-16] [ARCH] Use SQLite for the cache`. New
//! entries go immediately before the sentinel so it stays the last line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use waymark_core::Timestamp;

/// Marker line that closes the log.
pub const SENTINEL: &str = "*End of log*";

/// One `(date, category, text)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEntry {
    pub date: String,
    pub category: String,
    pub text: String,
}

impl DecisionEntry {
    pub fn new(ts: &Timestamp, category: &str, text: &str) -> Self {
        Self {
            date: ts.date(),
            category: single_line(category).to_uppercase(),
            text: single_line(text),
        }
    }

    pub fn to_line(&self) -> String {
        format!("[{}] [{}] {}", self.date, self.category, self.text)
    }

    /// Parse a log line. Returns `None` for headers, blanks, and the sentinel.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (date, rest) = rest.split_once("] [")?;
        let (category, text) = rest.split_once("] ")?;
        Some(Self {
            date: date.to_string(),
            category: category.to_string(),
            text: text.to_string(),
        })
    }
}

/// Join the non-blank lines of `s` with single spaces. An entry must occupy
/// exactly one log line.
fn single_line(s: &str) -> String {
    s.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Seed content for a fresh log.
pub fn default_log(project_name: &str) -> String {
    format!("# Decision Log - {project_name}\n# Format: [YYYY-MM-DD] [CATEGORY] Decision\n\n{SENTINEL}\n")
}

/// Insert `entry_line` right before the last sentinel line.
/// Returns `None` when the content has no sentinel line.
/// Every other byte of `content` is kept as is, line terminators included.
pub fn insert_before_sentinel(content: &str, entry_line: &str) -> Option<String> {
    let lines = crate::split_lines(content);
    let idx = lines.iter().rposition(|l| l.text.trim() == SENTINEL)?;
    let eol = crate::line_ending(content);

    let mut out = String::with_capacity(content.len() + entry_line.len() + eol.len());
    for (i, line) in lines.iter().enumerate() {
        if i == idx {
            out.push_str(entry_line);
            out.push_str(eol);
        }
        out.push_str(line.text);
        out.push_str(line.eol);
    }
    Some(out)
}

/// Parse every entry of the log, in file order.
pub fn parse_entries(content: &str) -> Vec<DecisionEntry> {
    content.lines().filter_map(DecisionEntry::parse).collect()
}

/// Append `entry` to the log at `path`, keeping the sentinel last.
///
/// Without a sentinel the line is appended raw and the file is created if
/// needed. Returns `true` when the sentinel path was taken.
pub fn append(path: &Path, entry: &DecisionEntry) -> anyhow::Result<bool> {
    let content = crate::read_or_empty(path)?;
    let line = entry.to_line();

    if let Some(updated) = insert_before_sentinel(&content, &line) {
        crate::write_atomic(path, updated.as_bytes())?;
        return Ok(true);
    }

    tracing::warn!(
        "no `{SENTINEL}` marker in {}, appending at end",
        path.display()
    );
    let eol = crate::line_ending(&content);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if !content.is_empty() && !content.ends_with('\n') {
        file.write_all(eol.as_bytes())?;
    }
    file.write_all(line.as_bytes())?;
    file.write_all(eol.as_bytes())?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(cat: &str, text: &str) -> DecisionEntry {
        let ts = Timestamp::from_offset(datetime!(2026-10-16 10:00:00 UTC));
        DecisionEntry::new(&ts, cat, text)
    }

    #[test]
    fn entry_line_format_and_parse() {
        let e = entry("arch", "Use SQLite");
        assert_eq!(e.to_line(), "[2026-10-16] [ARCH] Use SQLite");
        assert_eq!(DecisionEntry::parse(&e.to_line()), Some(e));
        assert_eq!(DecisionEntry::parse(SENTINEL), None);
        assert_eq!(DecisionEntry::parse("# Decision Log"), None);
    }

    #[test]
    fn insert_keeps_sentinel_last() {
        let content = "# Log\n[2026-01-01] [A] first\n*End of log*\n";
        let out = insert_before_sentinel(content, "[2026-01-02] [B] second").unwrap();
        assert_eq!(
            out,
            "# Log\n[2026-01-01] [A] first\n[2026-01-02] [B] second\n*End of log*\n"
        );
        assert!(insert_before_sentinel("no marker\n", "x").is_none());
    }

    #[test]
    fn append_n_times_preserves_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("decisions.log");
        std::fs::write(&path, default_log("demo")).unwrap();

        let before = parse_entries(&std::fs::read_to_string(&path).unwrap()).len();
        for i in 0..5 {
            assert!(append(&path, &entry("test", &format!("decision {i}"))).unwrap());
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let entries = parse_entries(&content);
        assert_eq!(entries.len(), before + 5);
        let texts: Vec<_> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            ["decision 0", "decision 1", "decision 2", "decision 3", "decision 4"]
        );
        assert_eq!(content.lines().last(), Some(SENTINEL));
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[lines.len() - 2], "[2026-10-16] [TEST] decision 4");
    }

    #[test]
    fn append_without_sentinel_falls_back_to_raw_append() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("decisions.log");

        assert!(!append(&path, &entry("a", "created")).unwrap());
        std::fs::write(&path, "trailing without newline").unwrap();
        assert!(!append(&path, &entry("b", "raw")).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "trailing without newline\n[2026-10-16] [B] raw\n");
    }

    #[test]
    fn multiline_text_stays_on_one_log_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("decisions.log");
        std::fs::write(&path, default_log("demo")).unwrap();
        let before = std::fs::read_to_string(&path).unwrap().lines().count();

        let e = entry("arch\n", "first line\nsecond line\r\n\n  third ");
        assert_eq!(e.text, "first line second line third");
        assert!(append(&path, &e).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), before + 1);
        assert_eq!(content.lines().last(), Some(SENTINEL));
        assert_eq!(parse_entries(&content), vec![e]);
    }

    #[test]
    fn crlf_log_keeps_its_line_endings() {
        let content = "# Log\r\n[2026-01-01] [A] first\r\n*End of log*\r\n";
        let out = insert_before_sentinel(content, "[2026-01-02] [B] second").unwrap();
        assert_eq!(
            out,
            "# Log\r\n[2026-01-01] [A] first\r\n[2026-01-02] [B] second\r\n*End of log*\r\n"
        );

        let no_trailing = insert_before_sentinel("# Log\n*End of log*", "x").unwrap();
        assert_eq!(no_trailing, "# Log\nx\n*End of log*");
    }
}
