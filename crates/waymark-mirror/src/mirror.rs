//! Create-then-append mirroring of `.context/` into a database page.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use waymark_core::{ContextPaths, Timestamp};

use crate::blocks::{markdown_to_blocks, Block, MAX_BLOCKS};
use crate::config::{Credentials, MirrorConfig, API_VERSION};
use crate::error::MirrorError;
use crate::transport::{Method, Transport, UreqTransport};

/// Select value set on every created page.
pub const STATUS_LABEL: &str = "In Progress";
/// Paragraph used when there is no local content to attach.
pub const PLACEHOLDER_TEXT: &str = "Context synced from .context/ folder";

/// Result of [`Mirror::sync`]. Failures are values, never panics.
#[derive(Debug)]
pub enum SyncOutcome {
    Synced { page_id: String, page_url: String },
    Failed { diagnostic: MirrorError },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }
}

pub struct Mirror<T: Transport = UreqTransport> {
    config: MirrorConfig,
    paths: ContextPaths,
    transport: T,
}

impl Mirror<UreqTransport> {
    pub fn new(config: MirrorConfig, root: impl Into<PathBuf>) -> Self {
        Self::with_transport(config, root, UreqTransport::new())
    }
}

impl<T: Transport> Mirror<T> {
    pub fn with_transport(config: MirrorConfig, root: impl Into<PathBuf>, transport: T) -> Self {
        Self {
            config,
            paths: ContextPaths::discover(root),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a status page and attach the context documents to it.
    ///
    /// Configuration and the context directory are checked before the first
    /// request. Each request is tried once; any non-success status aborts
    /// with the raw response body.
    pub fn create_status_page(&self) -> Result<String, MirrorError> {
        let creds = self.config.credentials()?;
        if !self.paths.is_initialized() {
            return Err(MirrorError::MissingContextDir(self.paths.context_dir.clone()));
        }
        let body = self.page_blocks()?;
        let headers = auth_headers(&creds);
        let headers: Vec<(&str, &str)> = headers.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let now = Timestamp::now();
        let page = page_request(creds.database_id, &now);
        let url = format!("{}/pages", self.config.api_url);
        let resp = self.transport.send(Method::Post, &url, &headers, &page)?;
        if resp.status != 200 {
            return Err(MirrorError::Http {
                action: "create page",
                status: resp.status,
                body: resp.body,
            });
        }
        let page_id = parse_page_id(&resp.body)?;
        tracing::info!(page_id = %page_id, blocks = body.len(), "page created");

        let url = format!("{}/blocks/{page_id}/children", self.config.api_url);
        for chunk in body.chunks(MAX_BLOCKS) {
            let children: Vec<Value> = chunk.iter().map(Block::to_json).collect();
            let resp = self.transport.send(
                Method::Patch,
                &url,
                &headers,
                &json!({ "children": children }),
            )?;
            if !resp.is_success() {
                return Err(MirrorError::Http {
                    action: "append blocks",
                    status: resp.status,
                    body: resp.body,
                });
            }
        }
        Ok(page_id)
    }

    /// Best-effort sync. Never propagates a failure to the caller.
    pub fn sync(&self) -> SyncOutcome {
        match self.create_status_page() {
            Ok(page_id) => SyncOutcome::Synced {
                page_url: page_url(&page_id),
                page_id,
            },
            Err(error) => {
                tracing::warn!("sync failed: {error}");
                SyncOutcome::Failed { diagnostic: error }
            }
        }
    }

    /// Page body: overview heading, README, current state; a placeholder
    /// paragraph when both documents are empty.
    fn page_blocks(&self) -> Result<Vec<Block>, MirrorError> {
        let readme = markdown_to_blocks(&read_doc(&self.paths.readme)?);
        let state = markdown_to_blocks(&read_doc(&self.paths.current_state)?);

        let mut blocks = vec![Block::heading(1, "Quick Overview")];
        if readme.is_empty() && state.is_empty() {
            blocks.push(Block::paragraph(PLACEHOLDER_TEXT));
            return Ok(blocks);
        }
        blocks.extend(readme);
        if !state.is_empty() {
            blocks.push(Block::heading(1, "Current State"));
            blocks.extend(state);
        }
        Ok(blocks)
    }
}

fn read_doc(path: &Path) -> Result<String, MirrorError> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

fn auth_headers(creds: &Credentials<'_>) -> Vec<(&'static str, String)> {
    vec![
        ("Authorization", format!("Bearer {}", creds.token)),
        ("Content-Type", "application/json".to_string()),
        ("Notion-Version", API_VERSION.to_string()),
    ]
}

fn page_request(database_id: &str, now: &Timestamp) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": {
                "title": [{ "text": { "content": format!("Project Status - {}", now.minute()) } }]
            },
            "Status": { "select": { "name": STATUS_LABEL } },
            "Last Updated": { "date": { "start": now.rfc3339() } }
        }
    })
}

fn parse_page_id(body: &str) -> Result<String, MirrorError> {
    let val: Value = serde_json::from_str(body)
        .map_err(|e| MirrorError::MalformedResponse(format!("invalid JSON: {e}")))?;
    val.get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| MirrorError::MalformedResponse("missing page id".to_string()))
}

/// Browser link for a page id.
pub fn page_url(page_id: &str) -> String {
    format!("https://notion.so/{}", page_id.replace('-', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        url: String,
        headers: Vec<(String, String)>,
        body: Value,
    }

    #[derive(Default)]
    struct FakeTransport {
        requests: RefCell<Vec<Recorded>>,
        responses: RefCell<VecDeque<HttpResponse>>,
    }

    impl FakeTransport {
        fn replying(responses: &[(u16, &str)]) -> Self {
            let t = Self::default();
            for (status, body) in responses {
                t.responses.borrow_mut().push_back(HttpResponse {
                    status: *status,
                    body: body.to_string(),
                });
            }
            t
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn send(
            &self,
            method: Method,
            url: &str,
            headers: &[(&str, &str)],
            body: &Value,
        ) -> Result<HttpResponse, MirrorError> {
            self.requests.borrow_mut().push(Recorded {
                method,
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.clone(),
            });
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(HttpResponse {
                    status: 200,
                    body: "{}".into(),
                }))
        }
    }

    fn config() -> MirrorConfig {
        MirrorConfig {
            token: Some("secret_tok".into()),
            database_id: Some("db-123".into()),
            api_url: "http://api.test/v1".into(),
        }
    }

    fn context_root() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        ContextPaths::discover(tmp.path()).ensure_layout().unwrap();
        tmp
    }

    #[test]
    fn missing_database_id_sends_nothing() {
        let tmp = context_root();
        let cfg = MirrorConfig {
            database_id: None,
            ..config()
        };
        let mirror = Mirror::with_transport(cfg, tmp.path(), FakeTransport::default());
        let err = mirror.create_status_page().unwrap_err();
        assert!(matches!(err, MirrorError::MissingDatabaseId));
        assert!(mirror.transport().requests().is_empty());
    }

    #[test]
    fn missing_token_sends_nothing() {
        let tmp = context_root();
        let cfg = MirrorConfig {
            token: None,
            ..config()
        };
        let mirror = Mirror::with_transport(cfg, tmp.path(), FakeTransport::default());
        assert!(matches!(
            mirror.create_status_page(),
            Err(MirrorError::MissingToken)
        ));
        assert!(mirror.transport().requests().is_empty());
    }

    #[test]
    fn missing_context_dir_sends_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mirror = Mirror::with_transport(config(), tmp.path(), FakeTransport::default());
        assert!(matches!(
            mirror.create_status_page(),
            Err(MirrorError::MissingContextDir(_))
        ));
        assert!(mirror.transport().requests().is_empty());
    }

    #[test]
    fn create_then_append_with_placeholder() {
        let tmp = context_root();
        let transport = FakeTransport::replying(&[(200, r#"{"id":"ab-cd"}"#), (200, "{}")]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);

        let page_id = mirror.create_status_page().unwrap();
        assert_eq!(page_id, "ab-cd");

        let reqs = mirror.transport().requests();
        assert_eq!(reqs.len(), 2);

        let create = &reqs[0];
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.url, "http://api.test/v1/pages");
        assert_eq!(create.body["parent"]["database_id"], "db-123");
        let title = create.body["properties"]["Name"]["title"][0]["text"]["content"]
            .as_str()
            .unwrap();
        assert!(title.starts_with("Project Status - "));
        assert_eq!(
            create.body["properties"]["Status"]["select"]["name"],
            STATUS_LABEL
        );
        assert!(create.body["properties"]["Last Updated"]["date"]["start"].is_string());
        assert!(create
            .headers
            .contains(&("Authorization".into(), "Bearer secret_tok".into())));
        assert!(create
            .headers
            .contains(&("Notion-Version".into(), API_VERSION.into())));

        let append = &reqs[1];
        assert_eq!(append.method, Method::Patch);
        assert_eq!(append.url, "http://api.test/v1/blocks/ab-cd/children");
        let children = append.body["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["type"], "heading_1");
        assert_eq!(
            children[1]["paragraph"]["rich_text"][0]["text"]["content"],
            PLACEHOLDER_TEXT
        );
    }

    #[test]
    fn local_documents_are_attached_in_chunks() {
        let tmp = context_root();
        let paths = ContextPaths::discover(tmp.path());
        let lines: String = (0..100).map(|i| format!("- item {i}\n")).collect();
        std::fs::write(&paths.readme, &lines).unwrap();
        std::fs::write(&paths.current_state, &lines).unwrap();

        let transport = FakeTransport::replying(&[(200, r#"{"id":"p1"}"#)]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);
        mirror.create_status_page().unwrap();

        let reqs = mirror.transport().requests();
        let sizes: Vec<usize> = reqs[1..]
            .iter()
            .map(|r| r.body["children"].as_array().unwrap().len())
            .collect();
        // heading + 100 readme + heading + 100 state
        assert_eq!(sizes, [100, 100, 2]);
        assert!(reqs[1..].iter().all(|r| r.method == Method::Patch));
    }

    #[test]
    fn create_failure_surfaces_raw_body_without_retry() {
        let tmp = context_root();
        let transport =
            FakeTransport::replying(&[(401, r#"{"code":"unauthorized","message":"bad token"}"#)]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);

        match mirror.create_status_page() {
            Err(MirrorError::Http { status, body, .. }) => {
                assert_eq!(status, 401);
                assert!(body.contains("bad token"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
        assert_eq!(mirror.transport().requests().len(), 1);
    }

    #[test]
    fn missing_page_id_is_malformed() {
        let tmp = context_root();
        let transport = FakeTransport::replying(&[(200, r#"{"object":"page"}"#)]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);
        assert!(matches!(
            mirror.create_status_page(),
            Err(MirrorError::MalformedResponse(_))
        ));
    }

    #[test]
    fn append_failure_is_reported() {
        let tmp = context_root();
        let transport =
            FakeTransport::replying(&[(200, r#"{"id":"p1"}"#), (400, "validation_error")]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);
        match mirror.create_status_page() {
            Err(MirrorError::Http { action, status, .. }) => {
                assert_eq!(action, "append blocks");
                assert_eq!(status, 400);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn sync_returns_outcome_instead_of_failing() {
        let tmp = context_root();
        let cfg = MirrorConfig {
            token: None,
            ..config()
        };
        let mirror = Mirror::with_transport(cfg, tmp.path(), FakeTransport::default());
        let outcome = mirror.sync();
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome,
            SyncOutcome::Failed { ref diagnostic } if diagnostic.is_configuration()
        ));

        let transport = FakeTransport::replying(&[(200, r#"{"id":"1a-2b"}"#)]);
        let mirror = Mirror::with_transport(config(), tmp.path(), transport);
        match mirror.sync() {
            SyncOutcome::Synced { page_id, page_url } => {
                assert_eq!(page_id, "1a-2b");
                assert_eq!(page_url, "https://notion.so/1a2b");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
