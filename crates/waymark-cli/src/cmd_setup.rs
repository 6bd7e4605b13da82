use std::io::{BufRead, Write};
use std::path::Path;

use waymark_core::ContextPaths;
use waymark_mirror::write_credentials;

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    eprint!("{label}: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        anyhow::bail!("{label} must not be empty");
    }
    Ok(value)
}

/// Interactive credential setup; the merge itself lives in `waymark_mirror`.
pub fn execute(repo_root: &Path) -> anyhow::Result<()> {
    let paths = ContextPaths::discover(repo_root);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!("Notion integration setup");
    println!();
    println!("1. Create an integration at https://www.notion.so/my-integrations");
    println!("   and copy its Internal Integration Token.");
    let token = prompt(&mut input, "Integration token")?;

    println!();
    println!("2. Create a database with properties: Name (title), Status (select),");
    println!("   Last Updated (date). Share it with the integration and copy the");
    println!("   database ID from its URL (notion.so/<DATABASE_ID>?v=...).");
    let database_id = prompt(&mut input, "Database ID")?;

    write_credentials(&paths.env_file, &token, &database_id)?;

    println!();
    println!("Saved to {}", paths.env_file.display());
    println!("Next: `waymark sync` to test, and add .env to .gitignore.");
    Ok(())
}
