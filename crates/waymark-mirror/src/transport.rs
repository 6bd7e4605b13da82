use std::time::Duration;

use serde_json::Value;

use crate::error::MirrorError;

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Status and raw body of a completed request, whatever the status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One JSON request, one attempt. Non-2xx statuses are responses, not errors;
/// `Err` is reserved for failures to complete the exchange.
pub trait Transport {
    fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<HttpResponse, MirrorError>;
}

/// Blocking HTTPS transport.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<HttpResponse, MirrorError> {
        tracing::debug!(method = method.as_str(), url, "mirror request");
        let payload = body.to_string();
        let result = match method {
            Method::Post => {
                let mut req = self.agent.post(url);
                for (k, v) in headers {
                    req = req.header(*k, *v);
                }
                req.send(payload)
            }
            Method::Patch => {
                let mut req = self.agent.patch(url);
                for (k, v) in headers {
                    req = req.header(*k, *v);
                }
                req.send(payload)
            }
        };
        let mut resp = result.map_err(|e| MirrorError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| MirrorError::Transport(e.to_string()))?;
        tracing::debug!(status, "mirror response");
        Ok(HttpResponse { status, body })
    }
}
