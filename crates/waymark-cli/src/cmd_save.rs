use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path, description: &str, auto: bool) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    let report = store.save(description, auto)?;

    // Hook-driven saves stay quiet.
    if auto {
        return Ok(());
    }
    let label = if report.description.is_empty() {
        "Manual save"
    } else {
        report.description.as_str()
    };
    println!("Context saved: {label}");
    println!("Branch: {}", report.snapshot.branch);
    println!("Status: {}", report.snapshot.status_text);
    Ok(())
}
