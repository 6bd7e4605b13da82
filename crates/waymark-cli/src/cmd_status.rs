use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    let status = store.status()?;
    let snap = &status.snapshot;

    println!("On branch {}", snap.branch);
    println!("Last commit: {}", snap.last_commit);
    println!("Status: {}", snap.status_text);

    println!();
    println!("Checkpoints: {}", status.checkpoint_count);
    for name in &status.recent_checkpoints {
        println!("  - {name}");
    }
    println!("Decisions logged: {}", status.decision_count);

    match &status.last_saved {
        Some(ts) => println!("Last context update: {}", ts.datetime()),
        None => println!("Last context update: (never, run `waymark save`)"),
    }
    Ok(())
}
