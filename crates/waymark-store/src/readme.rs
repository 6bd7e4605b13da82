//! `**Last Updated:**` field handling for Markdown documents.
//!
//! The field is located by its label, not by its previous value, so an
//! update always lands regardless of what date was there before.

/// Label of the timestamp field.
pub const LAST_UPDATED_FIELD: &str = "**Last Updated:**";

/// Value of the first `**Last Updated:**` field, if any.
pub fn last_updated(doc: &str) -> Option<&str> {
    doc.lines()
        .find_map(|line| line.trim_start().strip_prefix(LAST_UPDATED_FIELD))
        .map(str::trim)
}

/// Set the `**Last Updated:**` field to `value`.
///
/// Rewrites the first field line in place. Without one, the field is
/// inserted after the first `# ` heading (with a blank separator line), or
/// at the top when there is no heading.
pub fn set_last_updated(doc: &str, value: &str) -> String {
    let field_line = format!("{LAST_UPDATED_FIELD} {value}");
    let eol = crate::line_ending(doc);
    let mut lines: Vec<(String, &str)> = crate::split_lines(doc)
        .into_iter()
        .map(|l| (l.text.to_string(), l.eol))
        .collect();

    if let Some(idx) = lines
        .iter()
        .position(|(text, _)| text.trim_start().starts_with(LAST_UPDATED_FIELD))
    {
        lines[idx].0 = field_line;
    } else if let Some(idx) = lines.iter().position(|(text, _)| text.starts_with("# ")) {
        let heading_eol = std::mem::replace(&mut lines[idx].1, eol);
        lines.insert(idx + 1, (String::new(), eol));
        lines.insert(idx + 2, (field_line, heading_eol));
    } else {
        let had_content = !lines.is_empty();
        lines.insert(0, (field_line, eol));
        if had_content {
            lines.insert(1, (String::new(), eol));
        }
    }

    lines
        .iter()
        .flat_map(|(text, end)| [text.as_str(), *end])
        .collect()
}
