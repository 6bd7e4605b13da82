use std::collections::HashMap;
use std::path::Path;

use crate::error::MirrorError;

pub const TOKEN_VAR: &str = "NOTION_TOKEN";
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
pub const API_URL_VAR: &str = "NOTION_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
pub const API_VERSION: &str = "2022-06-28";

/// Mirror settings, resolved once at startup and passed to [`crate::Mirror`].
#[derive(Clone, Debug)]
pub struct MirrorConfig {
    pub token: Option<String>,
    pub database_id: Option<String>,
    pub api_url: String,
}

/// Validated credentials. Only obtainable through [`MirrorConfig::credentials`].
#[derive(Clone, Debug)]
pub struct Credentials<'a> {
    pub token: &'a str,
    pub database_id: &'a str,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl MirrorConfig {
    /// Process environment first, then `<root>/.env`. The `.env` file is read
    /// without exporting anything into the process environment.
    pub fn load(root: &Path) -> Self {
        let file_vars = read_env_file(&root.join(".env"));
        Self::from_sources(layered(|key| std::env::var(key).ok(), &file_vars))
    }

    /// Build from a key lookup. Blank values count as unset.
    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            token: get(TOKEN_VAR),
            database_id: get(DATABASE_ID_VAR),
            api_url: get(API_URL_VAR)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Presence check. The destination is checked first.
    pub fn credentials(&self) -> Result<Credentials<'_>, MirrorError> {
        let database_id = self
            .database_id
            .as_deref()
            .ok_or(MirrorError::MissingDatabaseId)?;
        let token = self.token.as_deref().ok_or(MirrorError::MissingToken)?;
        Ok(Credentials { token, database_id })
    }
}

/// Lookup that tries `env` first and falls back to `file`. A blank value in
/// one layer does not hide the other.
fn layered<'a>(
    env: impl Fn(&str) -> Option<String> + 'a,
    file: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        env(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file.get(key).cloned())
    }
}

fn read_env_file(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(it) => it,
        Err(_) => return HashMap::new(),
    };
    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((k, v)) => {
                vars.insert(k, v);
            }
            Err(e) => tracing::warn!("skipping malformed line in {}: {e}", path.display()),
        }
    }
    vars
}
