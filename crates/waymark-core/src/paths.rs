use std::path::{Path, PathBuf};

/// Name of the context directory under the project root.
pub const CONTEXT_DIR: &str = ".context";

/// All well-known paths under `.context/`.
#[derive(Debug, Clone)]
pub struct ContextPaths {
    pub root: PathBuf,
    pub context_dir: PathBuf,
    pub checkpoints_dir: PathBuf,
    pub readme: PathBuf,
    pub current_state: PathBuf,
    pub handoff: PathBuf,
    pub decisions_log: PathBuf,
    pub config_json: PathBuf,
    pub env_file: PathBuf,
}

impl ContextPaths {
    /// Derive all paths from a project root. Pure computation, no I/O.
    pub fn discover(project_root: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        let context_dir = root.join(CONTEXT_DIR);
        Self {
            checkpoints_dir: context_dir.join("checkpoints"),
            readme: context_dir.join("README.md"),
            current_state: context_dir.join("current_state.md"),
            handoff: context_dir.join("handoff.md"),
            decisions_log: context_dir.join("decisions.log"),
            config_json: context_dir.join("config.json"),
            env_file: root.join(".env"),
            context_dir,
            root,
        }
    }

    /// Create `.context/` and `.context/checkpoints/`. Idempotent.
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.checkpoints_dir)
    }

    /// Check whether `.context/` exists.
    pub fn is_initialized(&self) -> bool {
        self.context_dir.is_dir()
    }

    /// Resolve a checkpoint file under `.context/checkpoints/`.
    pub fn checkpoint_file(&self, file_name: &str) -> PathBuf {
        self.checkpoints_dir.join(file_name)
    }

    /// Path of `target` relative to the project root, for display.
    pub fn display_relative<'a>(&self, target: &'a Path) -> std::borrow::Cow<'a, str> {
        match target.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy(),
            Err(_) => target.to_string_lossy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = ContextPaths::discover("/tmp/repo");
        assert_eq!(p.context_dir, PathBuf::from("/tmp/repo/.context"));
        assert_eq!(
            p.checkpoints_dir,
            PathBuf::from("/tmp/repo/.context/checkpoints")
        );
        assert_eq!(
            p.current_state,
            PathBuf::from("/tmp/repo/.context/current_state.md")
        );
        assert_eq!(
            p.decisions_log,
            PathBuf::from("/tmp/repo/.context/decisions.log")
        );
        assert_eq!(p.env_file, PathBuf::from("/tmp/repo/.env"));
        assert_eq!(
            p.checkpoint_file("a.md"),
            PathBuf::from("/tmp/repo/.context/checkpoints/a.md")
        );
    }

    #[test]
    fn ensure_layout_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let p = ContextPaths::discover(tmp.path());
        assert!(!p.is_initialized());
        p.ensure_layout().unwrap();
        p.ensure_layout().unwrap();
        assert!(p.context_dir.is_dir());
        assert!(p.checkpoints_dir.is_dir());
    }

    #[test]
    fn display_relative_strips_root() {
        let p = ContextPaths::discover("/tmp/repo");
        assert_eq!(p.display_relative(&p.handoff), ".context/handoff.md");
        assert_eq!(p.display_relative(Path::new("/elsewhere/x")), "/elsewhere/x");
    }
}
