//! Immutable checkpoint files: `<YYYYMMDD_HHMMSS>_<slug>.md`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use waymark_core::Timestamp;

const MAX_SLUG_LEN: usize = 60;

/// Filename-safe form of a description.
pub fn slugify(description: &str) -> String {
    let mut slug = String::new();
    for c in description.trim().chars() {
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            slug.push(c);
        } else if c.is_whitespace() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "checkpoint".to_string()
    } else {
        slug.to_string()
    }
}

/// Base file stem for a checkpoint created at `ts`.
pub fn file_stem(ts: &Timestamp, description: &str) -> String {
    format!("{}_{}", ts.compact(), slugify(description))
}

/// Write `content` as a new checkpoint in `dir`. Never overwrites: a name
/// collision gets a numeric suffix.
pub fn write_new(dir: &Path, stem: &str, content: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    for n in 1u32.. {
        let name = if n == 1 {
            format!("{stem}.md")
        } else {
            format!("{stem}_{n}.md")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(content.as_bytes())?;
                file.flush()?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    unreachable!("checkpoint suffix space exhausted")
}

/// Checkpoint stems in `dir`, newest first (descending by name).
pub fn list(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}
