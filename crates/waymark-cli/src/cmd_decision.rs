use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path, category: &str, text: &str) -> anyhow::Result<()> {
    if category.trim().is_empty() {
        anyhow::bail!("category must not be empty");
    }
    let store = ContextStore::open(repo_root)?;
    let entry = store.log_decision(category, text)?;
    println!("Decision logged: [{}] {}", entry.category, entry.text);
    Ok(())
}
