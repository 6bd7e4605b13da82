use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    let report = store.init()?;

    if report.created.is_empty() {
        println!("Already initialized at {}", store.paths.context_dir.display());
        return Ok(());
    }
    println!("Initialized {}", store.paths.context_dir.display());
    for path in &report.created {
        println!("  created {}", store.paths.display_relative(path));
    }
    Ok(())
}
