//! The local context store: owns `.context/` and every document in it.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use waymark_core::{ContextPaths, RepoSnapshot, Timestamp};

use crate::config::StoreConfig;
use crate::decisions::{self, DecisionEntry};
use crate::vcs::{Git, Vcs};
use crate::{checkpoint, read_or_empty, readme, render, write_atomic};

/// Number of checkpoints shown by `status`.
pub const RECENT_CHECKPOINTS: usize = 5;

#[derive(Debug, Clone)]
pub struct SaveReport {
    pub timestamp: Timestamp,
    pub snapshot: RepoSnapshot,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CheckpointReport {
    pub path: PathBuf,
    pub file_name: String,
    pub snapshot: RepoSnapshot,
}

#[derive(Debug, Clone)]
pub struct HandoffReport {
    pub path: PathBuf,
    pub snapshot: RepoSnapshot,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub snapshot: RepoSnapshot,
    pub checkpoint_count: usize,
    /// Newest first, at most [`RECENT_CHECKPOINTS`].
    pub recent_checkpoints: Vec<String>,
    pub last_saved: Option<Timestamp>,
    pub decision_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
}

pub struct ContextStore {
    pub paths: ContextPaths,
    pub config: StoreConfig,
    vcs: Box<dyn Vcs>,
}

impl ContextStore {
    /// Open the store at `root`, querying state through `git`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let git = Git::new(&root);
        Self::with_vcs(root, Box::new(git))
    }

    /// Open with an explicit VCS source. Creates the directory layout.
    pub fn with_vcs(root: impl Into<PathBuf>, vcs: Box<dyn Vcs>) -> Result<Self> {
        let paths = ContextPaths::discover(root);
        paths.ensure_layout()?;
        let config = StoreConfig::load(&paths);
        Ok(Self {
            paths,
            config,
            vcs,
        })
    }

    pub fn project_name(&self) -> String {
        self.config.project_name(&self.paths)
    }

    pub fn snapshot(&self) -> RepoSnapshot {
        let snap = self.vcs.snapshot();
        if snap.is_degraded() {
            tracing::warn!("repository state unavailable, using degraded snapshot");
        }
        snap
    }

    /// Seed `README.md` and `decisions.log` when they do not exist yet.
    pub fn init(&self) -> Result<InitReport> {
        let mut report = InitReport::default();
        let ts = Timestamp::now();
        let project = self.project_name();

        if !self.paths.readme.exists() {
            write_atomic(
                &self.paths.readme,
                render::default_readme(&project, &ts).as_bytes(),
            )?;
            report.created.push(self.paths.readme.clone());
        }
        if !self.paths.decisions_log.exists() {
            write_atomic(
                &self.paths.decisions_log,
                decisions::default_log(&project).as_bytes(),
            )?;
            report.created.push(self.paths.decisions_log.clone());
        }
        Ok(report)
    }

    /// Overwrite `current_state.md` and stamp the README's update field.
    pub fn save(&self, description: &str, auto: bool) -> Result<SaveReport> {
        let ts = Timestamp::now();
        let snapshot = self.snapshot();
        tracing::debug!(auto, branch = %snapshot.branch, "save");

        let doc = render::current_state(&ts, &snapshot, description);
        write_atomic(&self.paths.current_state, doc.as_bytes())?;
        self.touch_readme(&ts)?;

        Ok(SaveReport {
            timestamp: ts,
            snapshot,
            description: description.to_string(),
        })
    }

    fn touch_readme(&self, ts: &Timestamp) -> Result<()> {
        let content = if self.paths.readme.exists() {
            readme::set_last_updated(&read_or_empty(&self.paths.readme)?, &ts.date())
        } else {
            render::default_readme(&self.project_name(), ts)
        };
        write_atomic(&self.paths.readme, content.as_bytes())
    }

    /// Write a new immutable checkpoint file.
    pub fn checkpoint(&self, description: &str) -> Result<CheckpointReport> {
        let ts = Timestamp::now();
        let snapshot = self.snapshot();
        let diff = self.vcs.diff_summary();

        let doc = render::checkpoint(&ts, &snapshot, description, diff.as_deref());
        let stem = checkpoint::file_stem(&ts, description);
        let path = checkpoint::write_new(&self.paths.checkpoints_dir, &stem, &doc)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(CheckpointReport {
            path,
            file_name,
            snapshot,
        })
    }

    /// Regenerate `handoff.md` from the current snapshot.
    pub fn handoff(&self) -> Result<HandoffReport> {
        let ts = Timestamp::now();
        let snapshot = self.snapshot();
        let project = self.project_name();
        let has_state = self.paths.current_state.is_file();

        let doc = render::handoff(&ts, &snapshot, &project, has_state);
        write_atomic(&self.paths.handoff, doc.as_bytes())?;

        Ok(HandoffReport {
            path: self.paths.handoff.clone(),
            prompt: render::continuation_prompt(&project, &snapshot),
            snapshot,
        })
    }

    /// Read-only overview of the store.
    pub fn status(&self) -> Result<StatusReport> {
        let snapshot = self.snapshot();
        let all = checkpoint::list(&self.paths.checkpoints_dir)?;
        let last_saved = match fs::metadata(&self.paths.current_state) {
            Ok(meta) => Some(Timestamp::from_system_time(meta.modified()?)),
            Err(_) => None,
        };
        let decision_count =
            decisions::parse_entries(&read_or_empty(&self.paths.decisions_log)?).len();

        Ok(StatusReport {
            snapshot,
            checkpoint_count: all.len(),
            recent_checkpoints: all.into_iter().take(RECENT_CHECKPOINTS).collect(),
            last_saved,
            decision_count,
        })
    }

    /// Record a decision, keeping the log's sentinel as the last line.
    pub fn log_decision(&self, category: &str, text: &str) -> Result<DecisionEntry> {
        let entry = DecisionEntry::new(&Timestamp::now(), category, text);
        decisions::append(&self.paths.decisions_log, &entry)?;
        Ok(entry)
    }

    /// Project listing at the configured depth unless overridden.
    pub fn tree(&self, depth: Option<usize>) -> String {
        crate::tree::file_tree(
            &self.paths.root,
            depth.unwrap_or_else(|| self.config.tree_depth()),
        )
    }
}
