//! Version-control collaborator. Queries are opaque text producers; any
//! failure maps to the degraded snapshot instead of an error.

use std::path::PathBuf;
use std::process::Command;

use waymark_core::RepoSnapshot;

/// Source of repository state for the context store.
pub trait Vcs {
    /// Branch, short status, and last commit. Never fails.
    fn snapshot(&self) -> RepoSnapshot;

    /// `--stat` style summary of uncommitted changes, `None` if unavailable.
    fn diff_summary(&self) -> Option<String>;
}

/// `git` subprocess run in the project root.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn run(&self, args: &[&str]) -> Option<String> {
        tracing::debug!(?args, "git");
        let output = match Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
        {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!("git not available: {e}");
                return None;
            }
        };
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(?args, "git failed: {}", stderr.trim());
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for Git {
    fn snapshot(&self) -> RepoSnapshot {
        let branch = self.run(&["branch", "--show-current"]);
        let status = self.run(&["status", "--short"]);
        let last_commit = self.run(&["log", "-1", "--pretty=%h - %s"]);
        match (branch, status, last_commit) {
            (Some(b), Some(s), Some(c)) => RepoSnapshot::from_parts(&b, &s, &c),
            _ => RepoSnapshot::degraded(),
        }
    }

    fn diff_summary(&self) -> Option<String> {
        self.run(&["diff", "--stat"])
    }
}
