/// Branch name reported when the version-control query fails.
pub const UNKNOWN_BRANCH: &str = "unknown";
/// Status text reported when the version-control query fails.
pub const NOT_A_REPO: &str = "not a git repository";
/// Last-commit text reported when the version-control query fails.
pub const NO_COMMIT: &str = "N/A";
/// Status text for a working tree with no changes.
pub const CLEAN_STATUS: &str = "(clean)";

/// Point-in-time summary of the repository. Computed per call, only ever
/// rendered into documents, never persisted as a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub branch: String,
    pub status_text: String,
    pub last_commit: String,
    pub is_clean: bool,
}

impl RepoSnapshot {
    /// Build from raw query output. An empty short status means clean.
    pub fn from_parts(branch: &str, short_status: &str, last_commit: &str) -> Self {
        let status = short_status.trim_end();
        let is_clean = status.trim().is_empty();
        Self {
            branch: branch.trim().to_string(),
            status_text: if is_clean {
                CLEAN_STATUS.to_string()
            } else {
                status.to_string()
            },
            last_commit: last_commit.trim().to_string(),
            is_clean,
        }
    }

    /// Substitute values used when the repository cannot be queried.
    pub fn degraded() -> Self {
        Self {
            branch: UNKNOWN_BRANCH.to_string(),
            status_text: NOT_A_REPO.to_string(),
            last_commit: NO_COMMIT.to_string(),
            is_clean: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.branch == UNKNOWN_BRANCH && self.last_commit == NO_COMMIT
    }
}
