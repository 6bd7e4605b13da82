use std::path::Path;
use std::process::ExitCode;

use waymark_mirror::{Mirror, MirrorConfig, SyncOutcome};

/// `waymark sync`: best-effort mirror, exit status 1 on failure.
pub fn sync(repo_root: &Path) -> anyhow::Result<ExitCode> {
    let mirror = Mirror::new(MirrorConfig::load(repo_root), repo_root);
    if report(mirror.sync()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print the outcome; `true` when the page was created.
fn report(outcome: SyncOutcome) -> bool {
    match outcome {
        SyncOutcome::Synced { page_id, page_url } => {
            println!("Context synced. Page ID: {page_id}");
            println!("View: {page_url}");
            true
        }
        SyncOutcome::Failed { diagnostic } => {
            eprintln!("[waymark] sync failed: {diagnostic}");
            if diagnostic.is_configuration() {
                eprintln!("  Set NOTION_TOKEN and NOTION_DATABASE_ID, or run `waymark setup`.");
            }
            false
        }
    }
}

/// `waymark create-page`: same protocol, errors propagate.
pub fn create_page(repo_root: &Path) -> anyhow::Result<()> {
    let mirror = Mirror::new(MirrorConfig::load(repo_root), repo_root);
    let page_id = mirror.create_status_page()?;
    println!("Created page: {page_id}");
    Ok(())
}
