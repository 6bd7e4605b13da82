use serde::Deserialize;
use waymark_core::ContextPaths;

const DEFAULT_TREE_DEPTH: usize = 2;

/// Optional store settings from `.context/config.json`.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub tree_depth: Option<usize>,
}

impl StoreConfig {
    /// Load from `.context/config.json`.
    /// Returns defaults if the file is missing or unparseable.
    pub fn load(paths: &ContextPaths) -> Self {
        let content = match std::fs::read_to_string(&paths.config_json) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("ignoring {}: {e}", paths.config_json.display());
                Self::default()
            }
        }
    }

    /// Configured name, else the project root's directory name.
    pub fn project_name(&self, paths: &ContextPaths) -> String {
        if let Some(name) = self.project_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        paths
            .root
            .canonicalize()
            .unwrap_or_else(|_| paths.root.clone())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "this".to_string())
    }

    pub fn tree_depth(&self) -> usize {
        self.tree_depth.unwrap_or(DEFAULT_TREE_DEPTH)
    }
}
