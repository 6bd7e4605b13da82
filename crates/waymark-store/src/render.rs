//! Markdown templates for the context documents.

use waymark_core::{RepoSnapshot, Timestamp};

use crate::readme::LAST_UPDATED_FIELD;

const AUTO_SAVE_NOTE: &str = "Context auto-saved via Git hook";

fn push_snapshot_fields(out: &mut String, snap: &RepoSnapshot) {
    out.push_str(&format!("**Branch:** {}\n", snap.branch));
    out.push_str(&format!("**Status:** {}\n", snap.status_text));
    out.push_str(&format!("**Last Commit:** {}\n", snap.last_commit));
}

/// `current_state.md`, rewritten in full on every save.
pub fn current_state(ts: &Timestamp, snap: &RepoSnapshot, description: &str) -> String {
    let mut out = String::from("# Current Project State\n\n");
    out.push_str(&format!("{LAST_UPDATED_FIELD} {}\n", ts.datetime()));
    out.push_str(&format!("**Session ID:** {}\n\n", snap.branch));

    out.push_str("## Active Work\n\n### Recently Updated\n");
    if description.is_empty() {
        out.push_str(&format!("- {AUTO_SAVE_NOTE}\n\n"));
    } else {
        out.push_str(&format!("- {description}\n\n"));
    }

    out.push_str("### Current Branch Status\n\n");
    push_snapshot_fields(&mut out, snap);

    out.push_str("\n## Working Notes\n\n");
    out.push_str(&format!("- Last context save: {}\n", ts.datetime()));
    if !description.is_empty() {
        out.push_str(&format!("- {description}\n"));
    }
    out.push_str("\n---\n\n*Auto-updated by waymark*\n");
    out
}

/// An immutable checkpoint record.
pub fn checkpoint(
    ts: &Timestamp,
    snap: &RepoSnapshot,
    description: &str,
    diff_summary: Option<&str>,
) -> String {
    let mut out = format!("# Checkpoint: {description}\n\n");
    out.push_str(&format!("**Created:** {}\n", ts.datetime()));
    out.push_str(&format!("**Branch:** {}\n", snap.branch));
    out.push_str(&format!("**Commit:** {}\n\n", snap.last_commit));

    out.push_str("## State at Checkpoint\n\n### Git Status\n```\n");
    out.push_str(&snap.status_text);
    out.push_str("\n```\n\n### Description\n");
    out.push_str(description);
    out.push_str("\n\n## Files Changed Since Last Commit\n\n");

    match diff_summary.map(str::trim_end).filter(|d| !d.trim().is_empty()) {
        Some(diff) => out.push_str(&format!("```\n{diff}\n```\n")),
        None => out.push_str("No changes detected.\n"),
    }
    out.push_str("\n---\n\n*Checkpoint created by waymark*\n");
    out
}

/// Short prompt a new session can be started with.
pub fn continuation_prompt(project_name: &str, snap: &RepoSnapshot) -> String {
    format!(
        "I'm continuing work on the {project_name} project.\n\
         Branch: {}\n\
         Status: {}\n\n\
         Please read .context/README.md and .context/current_state.md to understand\n\
         where we left off, then continue with the next task.\n",
        snap.branch, snap.status_text
    )
}

/// `handoff.md`, regenerated in full.
pub fn handoff(
    ts: &Timestamp,
    snap: &RepoSnapshot,
    project_name: &str,
    has_current_state: bool,
) -> String {
    let mut out = String::from("# Continuation Instructions for Next Session\n\n");
    out.push_str(&format!("**Generated:** {}\n", ts.datetime()));
    out.push_str(&format!("**Session ID:** {}\n\n---\n\n", snap.branch));

    out.push_str("## Quick Context\n\n");
    out.push_str(&format!("You're working on the {project_name} project.\n\n"));

    out.push_str("## Current State\n\n");
    push_snapshot_fields(&mut out, snap);

    out.push_str("\n## Key Files to Review\n\n");
    out.push_str("1. `.context/README.md` - Start here for overview\n");
    if has_current_state {
        out.push_str("2. `.context/current_state.md` - Detailed current status\n");
    } else {
        out.push_str(
            "2. `.context/current_state.md` - not saved yet, run `waymark save` first\n",
        );
    }
    out.push_str("3. `.context/decisions.log` - Architectural decisions\n");
    out.push_str("4. `.context/checkpoints/` - Milestone snapshots\n\n");

    out.push_str("## How to Continue\n\n### Recommended First Steps\n");
    out.push_str("1. Read `.context/README.md` for quick orientation\n");
    out.push_str("2. Check `.context/current_state.md` for detailed status\n");
    out.push_str("3. Review recent checkpoints in `.context/checkpoints/`\n");
    out.push_str("4. Check git status: `git status`\n\n");

    out.push_str("### Quick Commands\n```bash\n");
    out.push_str("waymark save \"What you did\"\n");
    out.push_str("waymark checkpoint \"Milestone reached\"\n");
    out.push_str("waymark status\n");
    out.push_str("waymark log-decision CATEGORY \"Decision\"\n");
    out.push_str("```\n\n");

    out.push_str("## Paste-Ready Continuation Prompt\n\n```markdown\n");
    out.push_str(&continuation_prompt(project_name, snap));
    out.push_str("```\n\n---\n\n*Generated by waymark. Run `waymark handoff` to regenerate.*\n");
    out
}

/// Seed content for `README.md`.
pub fn default_readme(project_name: &str, ts: &Timestamp) -> String {
    let mut out = format!("# {project_name} Context\n\n");
    out.push_str(&format!("{LAST_UPDATED_FIELD} {}\n\n", ts.date()));
    out.push_str("## Overview\n\n");
    out.push_str("Project state snapshots maintained by waymark.\n\n");
    out.push_str("## Files\n\n");
    out.push_str("- `current_state.md` - latest saved state\n");
    out.push_str("- `handoff.md` - continuation instructions for the next session\n");
    out.push_str("- `decisions.log` - architectural decision log\n");
    out.push_str("- `checkpoints/` - immutable milestone snapshots\n");
    out
}
