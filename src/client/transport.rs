//! The HTTP seam.
//!
//! `ApiClient` talks to the network through the `Transport` trait so the
//! retry/envelope logic can be exercised against a scripted mock. The
//! production implementation wraps `reqwest`; classification of transport
//! failures (connect vs timeout vs other) happens here, once.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

/// HTTP method subset the backend surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// One outbound attempt, fully resolved (absolute URL, captured timeout).
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// A response that made it back, whatever its status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// No response at all: the request died on the wire.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Transport error: {0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest)
        -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
///
/// The timeout is applied per request from `TransportRequest`, not on the
/// client builder, so a runtime config update reaches subsequent calls.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let timeout = request.timeout;
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        }
        .timeout(timeout);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else if e.is_connect() {
                TransportError::Connect(e.to_string())
            } else {
                TransportError::Other(e.to_string())
            }
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Other(e.to_string())
            }
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Scripted transport for tests — pops one outcome per call and records
/// every request it sees.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    calls: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Ok(TransportResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, outcome: Result<TransportResponse, TransportError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }

    /// Requests seen so far, in order.
    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        match self.script.lock() {
            // An exhausted script keeps failing like a dead backend.
            Ok(mut script) => script.pop_front().unwrap_or_else(|| {
                Err(TransportError::Connect("mock script exhausted".into()))
            }),
            Err(_) => Err(TransportError::Other("mock lock poisoned".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_pops_outcomes_in_order() {
        let transport = MockTransport::new()
            .respond(200, "{}")
            .respond(500, "boom");
        let req = TransportRequest {
            method: Method::Get,
            url: "http://test/x".into(),
            body: None,
            timeout: Duration::from_secs(1),
        };

        let first = transport.execute(req.clone()).await.unwrap();
        assert_eq!(first.status, 200);
        let second = transport.execute(req.clone()).await.unwrap();
        assert_eq!(second.status, 500);

        // Past the script: behaves like an unreachable backend.
        let third = transport.execute(req).await;
        assert!(matches!(third, Err(TransportError::Connect(_))));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn mock_records_request_shape() {
        let transport = MockTransport::new().respond(200, "{}");
        let req = TransportRequest {
            method: Method::Post,
            url: "http://test/patients/p1/ask".into(),
            body: Some(serde_json::json!({"question": "status?"})),
            timeout: Duration::from_secs(1),
        };
        transport.execute(req).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert!(calls[0].url.ends_with("/ask"));
        assert_eq!(calls[0].body.as_ref().unwrap()["question"], "status?");
    }

    #[test]
    fn status_classification() {
        let ok = TransportResponse {
            status: 204,
            status_text: String::new(),
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!ok.is_client_error());

        let not_found = TransportResponse {
            status: 404,
            status_text: "Not Found".into(),
            body: String::new(),
        };
        assert!(!not_found.is_success());
        assert!(not_found.is_client_error());

        let server_err = TransportResponse {
            status: 503,
            status_text: "Service Unavailable".into(),
            body: String::new(),
        };
        assert!(!server_err.is_success());
        assert!(!server_err.is_client_error());
    }
}
