use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path, description: &str) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    let report = store.checkpoint(description)?;

    println!("Checkpoint created: {}", report.file_name);
    println!("Description: {description}");
    Ok(())
}
