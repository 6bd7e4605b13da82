use std::path::PathBuf;

/// Failures of the remote mirror. Configuration variants are raised before
/// any request is sent; none of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("NOTION_TOKEN not set; set it in the environment or .env (run `waymark setup`)")]
    MissingToken,

    #[error("NOTION_DATABASE_ID not set; set it in the environment or .env (run `waymark setup`)")]
    MissingDatabaseId,

    #[error("context directory not found: {0} (run `waymark init` or `waymark save` first)")]
    MissingContextDir(PathBuf),

    #[error("{action} failed with HTTP {status}: {body}")]
    Http {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MirrorError {
    /// Whether the failure is a missing credential or destination.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingToken | Self::MissingDatabaseId)
    }
}
