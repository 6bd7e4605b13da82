use std::path::Path;
use waymark_store::ContextStore;

pub fn execute(repo_root: &Path, depth: Option<usize>) -> anyhow::Result<()> {
    let store = ContextStore::open(repo_root)?;
    println!("{}", store.tree(depth).trim_end());
    Ok(())
}
