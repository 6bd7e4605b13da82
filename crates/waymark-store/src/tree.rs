use std::path::Path;
use std::process::Command;

use walkdir::{DirEntry, WalkDir};

/// Indented listing of the project, `depth` levels deep.
///
/// Uses the external `tree` utility when it is installed, otherwise walks
/// the directory itself, skipping hidden entries and `.git`.
pub fn file_tree(root: &Path, depth: usize) -> String {
    if let Some(out) = external_tree(root, depth) {
        return out;
    }
    walk_tree(root, depth)
}

fn external_tree(root: &Path, depth: usize) -> Option<String> {
    let depth_arg = depth.to_string();
    let output = Command::new("tree")
        .args(["-L", &depth_arg, "-a", "--gitignore", "-I", ".git"])
        .current_dir(root)
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!("tree exited with {}", output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Fallback listing: `name/` for directories, two spaces per level.
pub fn walk_tree(root: &Path, depth: usize) -> String {
    let mut lines = Vec::new();
    let walker = WalkDir::new(root)
        .max_depth(depth)
        .sort_by(|a, b| {
            // Files before subdirectories, each group by name.
            let ad = a.file_type().is_dir();
            let bd = b.file_type().is_dir();
            ad.cmp(&bd).then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker.filter_map(Result::ok) {
        let indent = "  ".repeat(entry.depth());
        let name = if entry.depth() == 0 {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string())
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };
        if entry.file_type().is_dir() {
            lines.push(format!("{indent}{name}/"));
        } else {
            lines.push(format!("{indent}{name}"));
        }
    }
    lines.join("\n")
}
