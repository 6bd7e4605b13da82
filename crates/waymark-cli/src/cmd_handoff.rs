use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    let report = store.handoff()?;

    println!("Handoff document updated: {}", report.path.display());
    println!();
    println!("Copy this to continue in a new session:");
    println!("{}", "-".repeat(60));
    print!("{}", report.prompt);
    println!("{}", "-".repeat(60));
    Ok(())
}
