//! `.env` credential persistence.
//!
//! Only the named variables are touched; every other line, comments and
//! blank lines included, is carried over verbatim.

use std::path::Path;

use crate::config::{DATABASE_ID_VAR, TOKEN_VAR};

/// Replace-or-append each `(NAME, value)` in `existing`.
///
/// Every line starting with `NAME=` is replaced in place. When no such line
/// exists, `NAME=value` is appended on a new line.
pub fn merge_env(existing: &str, vars: &[(&str, &str)]) -> String {
    let eol = waymark_store::line_ending(existing);
    let mut lines: Vec<(String, &str)> = waymark_store::split_lines(existing)
        .into_iter()
        .map(|l| (l.text.to_string(), l.eol))
        .collect();

    for (name, value) in vars {
        let prefix = format!("{name}=");
        let assignment = format!("{name}={value}");
        let mut found = false;
        for (text, _) in lines.iter_mut().filter(|(t, _)| t.starts_with(&prefix)) {
            *text = assignment.clone();
            found = true;
        }
        if !found {
            if let Some(last) = lines.last_mut().filter(|last| last.1.is_empty()) {
                last.1 = eol;
            }
            lines.push((assignment, eol));
        }
    }

    lines
        .iter()
        .flat_map(|(text, end)| [text.as_str(), *end])
        .collect()
}

/// Persist the mirror credentials into the `.env` file at `path`.
pub fn write_credentials(path: &Path, token: &str, database_id: &str) -> anyhow::Result<()> {
    let existing = waymark_store::read_or_empty(path)?;
    let merged = merge_env(
        &existing,
        &[(TOKEN_VAR, token.trim()), (DATABASE_ID_VAR, database_id.trim())],
    );
    waymark_store::write_atomic(path, merged.as_bytes())
}
